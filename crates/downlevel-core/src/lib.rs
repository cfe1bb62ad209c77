#![cfg_attr(docsrs, feature(doc_cfg))]

//! # downlevel-core
//!
//! Shared types for the downlevel workspace.
//!
//! This crate holds the vocabulary every other crate speaks: syntax families,
//! the closed set of lowerable features, source units and transform results,
//! plus the span patch buffer both downlevelers use to rewrite text without
//! touching anything outside the rewritten nodes. It depends on no other
//! downlevel crate.

pub mod downleveler;
pub mod error;
pub mod feature;
pub mod patch;
pub mod unit;

pub use downleveler::Downleveler;
pub use error::{Result, TransformError};
pub use feature::{Feature, FeatureSet, SyntaxFamily};
pub use patch::{PatchSet, Span};
pub use unit::{SourceUnit, TransformResult};
