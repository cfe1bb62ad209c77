//! [`Downleveler`] implementation for script units.

use downlevel_core::{
    Downleveler, FeatureSet, Result, SourceUnit, SyntaxFamily, TransformError, TransformResult,
};
use oxc_allocator::Allocator;
use oxc_ast_visit::Visit;
use oxc_parser::{Parser, ParserReturn};
use oxc_span::SourceType;
use tracing::{debug, trace};

use crate::names::TempNames;
use crate::rewriter::Rewriter;

/// Lowers script syntax by patching the original text around OXC AST spans.
///
/// The dialect is picked from the unit name's extension (`.ts`, `.jsx`, ...)
/// and defaults to an ES module when the name has no known extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptDownleveler;

impl ScriptDownleveler {
    pub fn new() -> Self {
        Self
    }
}

impl Downleveler for ScriptDownleveler {
    fn family(&self) -> SyntaxFamily {
        SyntaxFamily::Script
    }

    fn transform(&self, unit: &SourceUnit, features: FeatureSet) -> Result<TransformResult> {
        if unit.family != SyntaxFamily::Script {
            return Err(TransformError::family_mismatch(
                &unit.name,
                SyntaxFamily::Script,
                unit.family,
            ));
        }

        let features = features.for_family(SyntaxFamily::Script);
        if features.is_empty() {
            trace!(unit = %unit.name, "no script features to lower");
            return Ok(TransformResult::unchanged(unit.source.as_str()));
        }

        let allocator = Allocator::default();
        let source_type = SourceType::from_path(&unit.name).unwrap_or_else(|_| SourceType::mjs());
        let ParserReturn {
            program,
            errors,
            panicked,
            ..
        } = Parser::new(&allocator, &unit.source, source_type).parse();

        if panicked || !errors.is_empty() {
            let message = errors
                .first()
                .map(|error| error.to_string())
                .unwrap_or_else(|| "parser aborted".to_string());
            debug!(unit = %unit.name, %message, "script unit failed to parse");
            return Err(TransformError::malformed_source(&unit.name, message));
        }

        let mut rewriter = Rewriter::new(&unit.source, features, TempNames::collect(&program));
        rewriter.visit_program(&program);
        let (code, rewritten) = rewriter.finish();

        debug!(
            unit = %unit.name,
            requested = ?features,
            rewritten = ?rewritten,
            "lowered script unit"
        );
        Ok(TransformResult {
            code,
            features: rewritten.iter().collect(),
        })
    }
}
