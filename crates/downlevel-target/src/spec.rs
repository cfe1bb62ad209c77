//! Normalized target specifications.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::engine::{Engine, Version};

/// One engine at one minimum version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EngineConstraint {
    pub engine: Engine,
    pub version: Version,
}

impl EngineConstraint {
    pub const fn new(engine: Engine, version: Version) -> Self {
        Self { engine, version }
    }
}

impl fmt::Display for EngineConstraint {
    /// Formats back to the token that produced it (`chrome120`, `es2015`, `esnext`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.engine == Engine::Es && self.version.is_latest() {
            return f.write_str("esnext");
        }
        write!(f, "{}{}", self.engine, self.version)
    }
}

/// A validated, normalized deployment target.
///
/// Only [`crate::resolve`] constructs these from configuration, so holding one
/// means the shape has been checked. `List` holds at most one constraint per
/// engine; all of them must be satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSpec {
    /// `target: false` - no lowering at all
    Disabled,
    /// A single token
    Single(EngineConstraint),
    /// Several tokens, in the order first seen
    List(Vec<EngineConstraint>),
}

impl TargetSpec {
    pub fn is_disabled(&self) -> bool {
        matches!(self, TargetSpec::Disabled)
    }

    /// Every constraint the build must satisfy; empty when disabled.
    pub fn constraints(&self) -> &[EngineConstraint] {
        match self {
            TargetSpec::Disabled => &[],
            TargetSpec::Single(constraint) => std::slice::from_ref(constraint),
            TargetSpec::List(constraints) => constraints,
        }
    }

    /// The constraint for one engine, if the target names it.
    pub fn constraint_for(&self, engine: Engine) -> Option<&EngineConstraint> {
        self.constraints().iter().find(|c| c.engine == engine)
    }
}

impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetSpec::Disabled => f.write_str("false"),
            TargetSpec::Single(constraint) => write!(f, "{}", constraint),
            TargetSpec::List(constraints) => {
                let tokens: Vec<String> = constraints.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", tokens.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_display() {
        let chrome = EngineConstraint::new(Engine::Chrome, Version::major(120));
        assert_eq!(chrome.to_string(), "chrome120");

        let safari = EngineConstraint::new(Engine::Safari, Version::new(18, 4, 0));
        assert_eq!(safari.to_string(), "safari18.4");

        let next = EngineConstraint::new(Engine::Es, Version::LATEST);
        assert_eq!(next.to_string(), "esnext");
    }

    #[test]
    fn test_constraints_view() {
        assert!(TargetSpec::Disabled.constraints().is_empty());

        let chrome = EngineConstraint::new(Engine::Chrome, Version::major(120));
        let single = TargetSpec::Single(chrome);
        assert_eq!(single.constraints(), &[chrome]);
        assert_eq!(single.constraint_for(Engine::Chrome), Some(&chrome));
        assert_eq!(single.constraint_for(Engine::Firefox), None);
    }

    #[test]
    fn test_spec_display() {
        let list = TargetSpec::List(vec![
            EngineConstraint::new(Engine::Chrome, Version::major(120)),
            EngineConstraint::new(Engine::Es, Version::major(2020)),
        ]);
        assert_eq!(list.to_string(), "[chrome120, es2020]");
        assert_eq!(TargetSpec::Disabled.to_string(), "false");
    }
}
