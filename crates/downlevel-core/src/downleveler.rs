//! The seam between the coordinator and the per-family rewriters.

use crate::error::Result;
use crate::feature::{FeatureSet, SyntaxFamily};
use crate::unit::{SourceUnit, TransformResult};

/// A rewriter for one syntax family.
///
/// Implementations are pure: no I/O and no shared mutable state, so the
/// coordinator may call [`Downleveler::transform`] for many units at once.
pub trait Downleveler: Send + Sync {
    /// Family this downleveler accepts.
    fn family(&self) -> SyntaxFamily;

    /// Rewrite every occurrence of the features in `features`.
    ///
    /// Features of the other family are ignored. A unit with nothing to
    /// rewrite comes back byte for byte, and running the transform again on
    /// its own output with the same set is a no-op. How much of the rest is
    /// preserved is up to the implementation.
    fn transform(&self, unit: &SourceUnit, features: FeatureSet) -> Result<TransformResult>;
}
