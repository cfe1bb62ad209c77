//! [`Downleveler`] implementation for style units.

use downlevel_core::{
    Downleveler, Feature, FeatureSet, Result, SourceUnit, SyntaxFamily, TransformError,
    TransformResult,
};
use lightningcss::stylesheet::{ParserOptions, StyleSheet};
use lightningcss::targets::Features;
use tracing::{debug, trace};

use crate::{inset, printer};

/// Lowers style syntax through lightningcss.
///
/// The unit is parsed once. `inset` is expanded on the parsed tree, and
/// the remaining features are lowered by printing with their lightningcss
/// flags included. A unit with nothing to lower comes back untouched; one
/// with something to lower is reprinted as a whole.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleDownleveler;

impl StyleDownleveler {
    pub fn new() -> Self {
        Self
    }
}

impl Downleveler for StyleDownleveler {
    fn family(&self) -> SyntaxFamily {
        SyntaxFamily::Style
    }

    fn transform(&self, unit: &SourceUnit, features: FeatureSet) -> Result<TransformResult> {
        if unit.family != SyntaxFamily::Style {
            return Err(TransformError::family_mismatch(
                &unit.name,
                SyntaxFamily::Style,
                unit.family,
            ));
        }

        let features = features.for_family(SyntaxFamily::Style);
        if features.is_empty() {
            trace!(unit = %unit.name, "no style features to lower");
            return Ok(TransformResult::unchanged(unit.source.as_str()));
        }

        let options = ParserOptions {
            filename: unit.name.clone(),
            ..Default::default()
        };
        let mut sheet = StyleSheet::parse(&unit.source, options).map_err(|e| {
            let message = e.to_string();
            debug!(unit = %unit.name, %message, "style unit failed to parse");
            TransformError::malformed_source(&unit.name, message)
        })?;

        let expanded = if features.contains(Feature::InsetProperty) {
            inset::expand(&mut sheet)
        } else {
            0
        };

        // A flag counts as rewritten only if it changes the printed output.
        let baseline = printer::print(&sheet, Features::empty(), &unit.name)?;
        let mut include = Features::empty();
        let mut rewritten = Vec::new();
        for feature in features.iter() {
            let changed = match printer::flags(feature) {
                Some(flags) => {
                    let changed = printer::print(&sheet, flags, &unit.name)? != baseline;
                    if changed {
                        include |= flags;
                    }
                    changed
                }
                None => feature == Feature::InsetProperty && expanded > 0,
            };
            if changed {
                rewritten.push(feature);
            }
        }

        if rewritten.is_empty() {
            trace!(unit = %unit.name, requested = ?features, "nothing to lower");
            return Ok(TransformResult::unchanged(unit.source.as_str()));
        }

        let code = printer::print(&sheet, include, &unit.name)?;
        debug!(
            unit = %unit.name,
            requested = ?features,
            rewritten = ?rewritten,
            "lowered style unit"
        );
        Ok(TransformResult {
            code,
            features: rewritten,
        })
    }
}
