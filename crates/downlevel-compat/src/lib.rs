//! # downlevel-compat
//!
//! The compatibility matrix: one static table saying, per syntax feature,
//! from which version each engine supports it natively.
//!
//! The matrix is data, not control flow. Adding a lowerable feature means
//! adding a row here and a pass in the matching downleveler; nothing else
//! branches on feature/engine pairs.
//!
//! ```
//! use downlevel_compat::CompatibilityMatrix;
//! use downlevel_core::{Feature, SyntaxFamily};
//! use downlevel_target::resolve;
//! use serde_json::json;
//!
//! let matrix = CompatibilityMatrix::builtin();
//! let target = resolve(&json!("es2015")).unwrap();
//!
//! let lowered = matrix.unsupported_features(&target, SyntaxFamily::Script);
//! assert!(lowered.contains(Feature::OptionalChaining));
//! ```

mod data;
pub mod matrix;

pub use matrix::{CompatibilityMatrix, FeatureEntry, Support, unsupported_features};
