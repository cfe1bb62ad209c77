//! Build-level errors.
//!
//! Errors here abort a whole build. Per-unit failures are
//! [`TransformError`]s carried in that unit's outcome instead, so one broken
//! file never hides the results of its siblings.

use std::path::PathBuf;

use downlevel_core::TransformError;
use downlevel_target::TargetError;
use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for build operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// The configured target could not be resolved. Raised before any unit
    /// is looked at.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Target(#[from] TargetError),

    /// Configuration could not be loaded or is inconsistent.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    /// A unit failed; only produced when collapsing a [`BuildOutput`].
    ///
    /// [`BuildOutput`]: crate::BuildOutput
    #[error(transparent)]
    #[diagnostic(transparent)]
    Transform(#[from] TransformError),

    /// The worker pool could not be started.
    #[error("Failed to start worker pool: {0}")]
    #[diagnostic(code(downlevel::worker_pool))]
    WorkerPool(String),
}

/// Configuration-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist
    #[error("Config file not found: {}", .0.display())]
    #[diagnostic(
        code(downlevel::config::not_found),
        help("Create downlevel.toml or downlevel.json, or pass an existing path")
    )]
    NotFound(PathBuf),

    /// A field has a value of the wrong type or out of range
    #[error("Invalid value for '{field}': {value}")]
    #[diagnostic(code(downlevel::config::invalid_value), help("{hint}"))]
    InvalidValue {
        field: String,
        value: String,
        hint: String,
    },
}
