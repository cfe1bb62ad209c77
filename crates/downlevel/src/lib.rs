#![cfg_attr(docsrs, feature(doc_cfg))]

//! # downlevel
//!
//! Target-driven syntax lowering for JavaScript, TypeScript and CSS.
//!
//! A build declares one deployment target. It can be `false`, a token like
//! `"es2018"` or `"safari15.4"`, or a list of such tokens. Every source unit
//! is then rewritten so that it only uses syntax all of those engines
//! understand. Syntax the target already supports is left alone. Scripts
//! keep every byte outside a rewritten node; stylesheets are reprinted
//! only when something in them was lowered.
//!
//! ```
//! use downlevel::{BuildConfig, Pipeline, SourceUnit};
//! use serde_json::json;
//!
//! let config = BuildConfig::new(json!(["chrome108", "firefox115"]));
//! let output = Pipeline::new(config)
//!     .run(&[
//!         SourceUnit::script("app.js", "export const n = 1_000;"),
//!         SourceUnit::style("app.css", ".card { & .title { color: red } }"),
//!     ])
//!     .unwrap();
//!
//! let results = output.into_results().unwrap();
//! assert_eq!(results[0].code, "export const n = 1_000;");
//! assert_eq!(results[1].code, ".card .title {\n  color: red;\n}\n");
//! ```
//!
//! ## Crates
//!
//! - `downlevel-target`: target resolution
//! - `downlevel-compat`: the compatibility matrix
//! - `downlevel-script` / `downlevel-style`: the two downlevelers
//!
//! ## Logging
//!
//! The library emits [`tracing`] events and installs nothing. Applications
//! can enable the `logging` feature for a ready-made subscriber.

pub mod config;
pub mod error;
#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub mod logging;
pub mod pipeline;

pub use config::BuildConfig;
pub use error::{ConfigError, Error, Result};
pub use pipeline::{BuildOutput, Pipeline, UnitOutcome};

pub use downlevel_compat::{CompatibilityMatrix, FeatureEntry, Support, unsupported_features};
pub use downlevel_core::{
    Downleveler, Feature, FeatureSet, SourceUnit, SyntaxFamily, TransformError, TransformResult,
};
pub use downlevel_script::ScriptDownleveler;
pub use downlevel_style::StyleDownleveler;
pub use downlevel_target::{Engine, EngineConstraint, TargetError, TargetSpec, Version, resolve};
