//! Source units and transform results.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TransformError};
use crate::feature::{Feature, SyntaxFamily};

/// One file's worth of source handed to a downleveler.
///
/// The name is only used for diagnostics and for picking a parser dialect
/// (for example `.ts` vs `.js`); nothing here touches the filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceUnit {
    pub name: String,
    pub family: SyntaxFamily,
    pub source: String,
}

impl SourceUnit {
    pub fn new(name: impl Into<String>, family: SyntaxFamily, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            family,
            source: source.into(),
        }
    }

    pub fn script(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self::new(name, SyntaxFamily::Script, source)
    }

    pub fn style(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self::new(name, SyntaxFamily::Style, source)
    }

    /// Build a unit whose family is inferred from the name's extension.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::UnknownFamily`] when the extension is not a
    /// script or style extension.
    pub fn infer(name: impl Into<String>, source: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let family = SyntaxFamily::from_path(&name)
            .ok_or_else(|| TransformError::UnknownFamily { unit: name.clone() })?;
        Ok(Self::new(name, family, source))
    }
}

/// Output of one unit transform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformResult {
    /// Transformed text
    pub code: String,
    /// Features that were actually rewritten, in pass order
    pub features: Vec<Feature>,
}

impl TransformResult {
    /// A pass-through result.
    pub fn unchanged(source: impl Into<String>) -> Self {
        Self {
            code: source.into(),
            features: Vec::new(),
        }
    }

    pub fn is_unchanged(&self) -> bool {
        self.features.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_family() {
        let unit = SourceUnit::infer("src/index.ts", "export {}").unwrap();
        assert_eq!(unit.family, SyntaxFamily::Script);

        let unit = SourceUnit::infer("index.css", ".a {}").unwrap();
        assert_eq!(unit.family, SyntaxFamily::Style);
    }

    #[test]
    fn test_infer_unknown_extension() {
        let err = SourceUnit::infer("page.html", "<p></p>").unwrap_err();
        assert_eq!(
            err,
            TransformError::UnknownFamily {
                unit: "page.html".to_string()
            }
        );
        assert_eq!(err.unit(), "page.html");
    }

    #[test]
    fn test_unchanged_result() {
        let result = TransformResult::unchanged("a?.b");
        assert_eq!(result.code, "a?.b");
        assert!(result.is_unchanged());
    }
}
