//! # downlevel-target
//!
//! Target resolution for downlevel.
//!
//! A build's `target` option arrives as loosely-typed configuration: `false`,
//! a token string such as `"es2015"` or `"chrome120"`, or a list of such
//! strings. [`resolve`] is the only function that looks at that raw value. It
//! validates the shape, parses every token, normalizes duplicates and hands
//! back a [`TargetSpec`]; nothing downstream ever sees the raw value.
//!
//! ```
//! use downlevel_target::{resolve, Engine, TargetSpec};
//! use serde_json::json;
//!
//! let spec = resolve(&json!(["chrome120", "safari16"])).unwrap();
//! assert_eq!(spec.constraints().len(), 2);
//! assert_eq!(spec.constraints()[0].engine, Engine::Chrome);
//!
//! assert_eq!(resolve(&json!(false)).unwrap(), TargetSpec::Disabled);
//! assert!(resolve(&json!(24)).is_err());
//! ```

pub mod engine;
pub mod error;
pub mod resolve;
pub mod spec;

pub use engine::{Engine, Version};
pub use error::{Result, TargetError};
pub use resolve::{parse_token, resolve};
pub use spec::{EngineConstraint, TargetSpec};
