//! Error types for per-unit transforms.

use miette::Diagnostic;
use thiserror::Error;

use crate::feature::SyntaxFamily;

/// Result type alias for per-unit transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;

/// Errors local to a single source unit.
///
/// These never abort a build: the coordinator reports them against the unit
/// and lets sibling units complete.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum TransformError {
    /// The unit could not be parsed, so no rewrite was attempted.
    #[error("Failed to parse {unit}: {message}")]
    #[diagnostic(
        code(downlevel::malformed_source),
        help("Fix the syntax error; the unit is left untransformed")
    )]
    MalformedSource { unit: String, message: String },

    /// A unit was handed to the downleveler of the other family.
    #[error("{unit} is a {found} unit but was sent to the {expected} downleveler")]
    #[diagnostic(code(downlevel::family_mismatch))]
    FamilyMismatch {
        unit: String,
        expected: SyntaxFamily,
        found: SyntaxFamily,
    },

    /// The unit's name does not map to a known syntax family.
    #[error("Cannot determine the syntax family of {unit}")]
    #[diagnostic(
        code(downlevel::unknown_family),
        help("Script units end in .js/.mjs/.cjs/.jsx/.ts/.mts/.cts/.tsx, style units in .css")
    )]
    UnknownFamily { unit: String },
}

impl TransformError {
    pub fn malformed_source(unit: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedSource {
            unit: unit.into(),
            message: message.into(),
        }
    }

    pub fn family_mismatch(unit: impl Into<String>, expected: SyntaxFamily, found: SyntaxFamily) -> Self {
        Self::FamilyMismatch {
            unit: unit.into(),
            expected,
            found,
        }
    }

    /// Name of the unit the error belongs to.
    pub fn unit(&self) -> &str {
        match self {
            Self::MalformedSource { unit, .. }
            | Self::FamilyMismatch { unit, .. }
            | Self::UnknownFamily { unit } => unit,
        }
    }
}
