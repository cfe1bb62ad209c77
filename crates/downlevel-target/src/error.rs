//! Error types for target resolution.

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for target resolution.
pub type Result<T> = std::result::Result<T, TargetError>;

/// Why a raw `target` value was rejected.
///
/// Every variant names the offending value so the message is actionable
/// without a backtrace.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum TargetError {
    /// The value has the wrong shape (number, object, `true`, empty list...).
    #[error(
        "Invalid target {value} ({kind}): expected `false`, an engine/version string such as \"es2015\" or \"chrome120\", or an array of such strings"
    )]
    #[diagnostic(
        code(downlevel::target::invalid_target),
        help("Use target: false to disable lowering, or e.g. target: [\"chrome120\", \"safari16\"]")
    )]
    InvalidTarget { value: String, kind: String },

    /// The token's engine prefix is not one we know.
    #[error("Unknown engine `{engine}` in target `{token}`")]
    #[diagnostic(
        code(downlevel::target::unknown_engine),
        help("Known engines: chrome, edge, firefox, safari, ios, opera, node, deno, es")
    )]
    UnknownEngine { token: String, engine: String },

    /// The engine is known but the version suffix does not parse.
    #[error("Invalid version in target `{token}`: {reason}")]
    #[diagnostic(code(downlevel::target::invalid_version))]
    InvalidVersion { token: String, reason: String },
}

impl TargetError {
    pub fn invalid_target(value: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::InvalidTarget {
            value: value.into(),
            kind: kind.into(),
        }
    }

    pub fn unknown_engine(token: impl Into<String>, engine: impl Into<String>) -> Self {
        Self::UnknownEngine {
            token: token.into(),
            engine: engine.into(),
        }
    }

    pub fn invalid_version(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidVersion {
            token: token.into(),
            reason: reason.into(),
        }
    }
}
