//! Feature support lookups.

use downlevel_core::{Feature, FeatureSet, SyntaxFamily};
use downlevel_target::{Engine, EngineConstraint, TargetSpec, Version};

use crate::data::BUILTIN;

/// Native support of one feature on one engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Support {
    /// Supported from this version on
    Since(Version),
    /// The engine never shipped the feature; always lower
    Never,
}

impl Support {
    /// Does an engine at `version` have the feature natively?
    pub fn allows(self, version: Version) -> bool {
        match self {
            Support::Since(min) => version >= min,
            Support::Never => false,
        }
    }
}

/// Support data for one feature.
///
/// Engines missing from `support` are not relevant to the feature's family
/// and never restrict it.
#[derive(Debug, Clone, Copy)]
pub struct FeatureEntry {
    pub feature: Feature,
    pub support: &'static [(Engine, Support)],
}

impl FeatureEntry {
    pub fn support_for(&self, engine: Engine) -> Option<Support> {
        self.support
            .iter()
            .find(|(e, _)| *e == engine)
            .map(|(_, support)| *support)
    }

    /// Whether one constraint leaves this feature in place.
    pub fn satisfied_by(&self, constraint: &EngineConstraint) -> bool {
        self.support_for(constraint.engine)
            .is_none_or(|support| support.allows(constraint.version))
    }
}

/// Read-only table from feature to per-engine minimum versions.
///
/// Lookups are plain scans over static data; the matrix never changes once
/// built, so a single instance can be shared freely across threads.
#[derive(Debug, Clone, Copy)]
pub struct CompatibilityMatrix {
    entries: &'static [FeatureEntry],
}

impl CompatibilityMatrix {
    /// The data shipped with this crate.
    pub const fn builtin() -> Self {
        Self { entries: BUILTIN }
    }

    /// A matrix over caller-provided static data.
    pub const fn from_static(entries: &'static [FeatureEntry]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &'static [FeatureEntry] {
        self.entries
    }

    pub fn entry(&self, feature: Feature) -> Option<&'static FeatureEntry> {
        self.entries.iter().find(|entry| entry.feature == feature)
    }

    /// Support of `feature` on `engine`, or `None` when the engine is not
    /// relevant to it.
    pub fn support(&self, feature: Feature, engine: Engine) -> Option<Support> {
        self.entry(feature)?.support_for(engine)
    }

    /// True when every constraint in `target` supports `feature` natively.
    ///
    /// Constraints form a conjunction: one engine below its minimum makes the
    /// feature unsupported for the whole build. `Disabled` supports
    /// everything, and a feature without an entry counts as baseline.
    pub fn is_supported(&self, feature: Feature, target: &TargetSpec) -> bool {
        let Some(entry) = self.entry(feature) else {
            return true;
        };
        target
            .constraints()
            .iter()
            .all(|constraint| entry.satisfied_by(constraint))
    }

    /// Features of `family` that must be lowered for `target`.
    pub fn unsupported_features(&self, target: &TargetSpec, family: SyntaxFamily) -> FeatureSet {
        if target.is_disabled() {
            return FeatureSet::empty();
        }
        Feature::of_family(family)
            .filter(|feature| !self.is_supported(*feature, target))
            .collect()
    }
}

impl Default for CompatibilityMatrix {
    fn default() -> Self {
        Self::builtin()
    }
}

/// [`CompatibilityMatrix::unsupported_features`] as a free function.
pub fn unsupported_features(
    matrix: &CompatibilityMatrix,
    target: &TargetSpec,
    family: SyntaxFamily,
) -> FeatureSet {
    matrix.unsupported_features(target, family)
}
