//! # downlevel-script
//!
//! Lowers modern script syntax for older engines.
//!
//! Units are parsed with the OXC parser and walked once with a post-order
//! visitor. Every lowered node is recorded as a text patch over its span, so
//! code outside the rewritten nodes comes out byte for byte as it went in,
//! comments and formatting included.
//!
//! Lowered features, in pass order:
//!
//! - `numericSeparator`: `1_000` becomes `1000`
//! - `optionalCatchBinding`: `catch {` becomes `catch (_a) {`
//! - `exponentOperator`: `a ** b` becomes `Math.pow(a, b)`
//! - `logicalAssignment`: `a ||= b` becomes `(a || (a = b))`
//! - `nullishCoalescing`: `a ?? b` becomes `(a != null ? a : b)`
//! - `optionalChaining`: `a?.b` becomes `(a == null ? void 0 : a.b)`
//!
//! Temporaries (`_a`, `_b`, ...) never collide with identifiers already in
//! the unit and are declared with a single `var` at the top of the enclosing
//! function or program.
//!
//! ```
//! use downlevel_core::{Downleveler, Feature, FeatureSet, SourceUnit};
//! use downlevel_script::ScriptDownleveler;
//!
//! let unit = SourceUnit::script("index.js", "const x = a ?? b;");
//! let features: FeatureSet = [Feature::NullishCoalescing].into_iter().collect();
//!
//! let result = ScriptDownleveler::new().transform(&unit, features).unwrap();
//! assert_eq!(result.code, "const x = (a != null ? a : b);");
//! ```

mod chain;
mod downleveler;
mod names;
mod rewriter;

pub use downleveler::ScriptDownleveler;
