#![cfg_attr(docsrs, feature(doc_cfg))]

//! # downlevel-style
//!
//! Lowers modern CSS syntax for browsers that predate it, using
//! lightningcss to parse and print.
//!
//! Supported features:
//!
//! - media query range syntax: `(width >= 600px)` to `(min-width: 600px)`
//! - the `inset` shorthand, expanded to `top`/`right`/`bottom`/`left`
//! - `#rgba` and `#rrggbbaa` colors, rewritten as `rgba()`
//! - nesting, flattened into plain rules; `&` against a selector list
//!   becomes `:is(...)`
//!
//! A stylesheet that needs no lowering is returned byte for byte. One
//! that does is reprinted in lightningcss's format.
//!
//! ```
//! use downlevel_core::{Downleveler, Feature, SourceUnit};
//! use downlevel_style::StyleDownleveler;
//!
//! let unit = SourceUnit::style("app.css", ".foo { & .bar { color: red } }");
//! let result = StyleDownleveler::new()
//!     .transform(&unit, [Feature::CssNesting].into_iter().collect())
//!     .unwrap();
//! assert_eq!(result.code, ".foo .bar {\n  color: red;\n}\n");
//! ```

mod downleveler;
mod inset;
mod printer;

pub use downleveler::StyleDownleveler;
