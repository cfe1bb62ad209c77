//! The lowering visitor.
//!
//! One post-order walk handles every requested feature. Each node first lets
//! its children record their rewrites, then renders its operands through the
//! patch set (so nested rewrites are already in the text) and records its own
//! replacement over its full span.

use downlevel_core::{Feature, FeatureSet, PatchSet, Span};
use oxc_ast::ast::{
    ArrowFunctionExpression, AssignmentExpression, AssignmentOperator, AssignmentTarget,
    BigIntLiteral, BinaryExpression, BinaryOperator, CallExpression, CatchClause,
    ChainExpression, ComputedMemberExpression, Expression, Function, FunctionBody,
    LogicalExpression, LogicalOperator, NumericLiteral, PrivateFieldExpression, Program,
    Statement, StaticMemberExpression, UnaryExpression, UnaryOperator,
};
use oxc_ast_visit::{Visit, walk};
use oxc_semantic::ScopeFlags;
use oxc_span::GetSpan;

use crate::chain::{ChainUse, ends_in_member, skip_trivia};
use crate::names::TempNames;

pub(crate) fn span_of(node: &impl GetSpan) -> Span {
    let span = node.span();
    Span::new(span.start as usize, span.end as usize)
}

/// Expressions that can be evaluated twice without caching.
pub(crate) fn is_simple(expr: &Expression<'_>) -> bool {
    matches!(
        expr,
        Expression::Identifier(_) | Expression::ThisExpression(_) | Expression::Super(_)
    )
}

/// A writable location, spelled twice: `first` evaluates (and caches) the
/// object and key, `again` re-reads them through the cache.
struct Reference {
    first: String,
    again: String,
    simple: bool,
}

impl Reference {
    fn identifier(name: &str) -> Self {
        Self {
            first: name.to_string(),
            again: name.to_string(),
            simple: true,
        }
    }
}

pub(crate) struct Rewriter<'s> {
    pub(crate) patches: PatchSet<'s>,
    features: FeatureSet,
    names: TempNames,
    /// Temporaries per function scope, innermost last
    scopes: Vec<Vec<String>>,
    rewritten: FeatureSet,
}

impl<'s> Rewriter<'s> {
    pub(crate) fn new(source: &'s str, features: FeatureSet, names: TempNames) -> Self {
        Self {
            patches: PatchSet::new(source),
            features,
            names,
            scopes: Vec::new(),
            rewritten: FeatureSet::empty(),
        }
    }

    /// Output text and the features that were actually lowered.
    pub(crate) fn finish(self) -> (String, FeatureSet) {
        (self.patches.finish(), self.rewritten)
    }

    pub(crate) fn enabled(&self, feature: Feature) -> bool {
        self.features.contains(feature)
    }

    pub(crate) fn mark(&mut self, feature: Feature) {
        self.rewritten.insert(feature);
    }

    pub(crate) fn render(&self, node: &impl GetSpan) -> String {
        self.patches.render(span_of(node))
    }

    /// A fresh temporary declared in the innermost function scope.
    pub(crate) fn temp(&mut self) -> String {
        let name = self.names.fresh();
        if let Some(scope) = self.scopes.last_mut() {
            scope.push(name.clone());
        }
        name
    }

    fn declare_in_body(&mut self, body: &FunctionBody<'_>, temps: &[String]) {
        if temps.is_empty() {
            return;
        }
        let at = body
            .directives
            .last()
            .map_or(body.span.start + 1, |directive| directive.span.end);
        self.patches
            .insert(at as usize, format!(" var {};", temps.join(", ")));
    }

    /// Evaluate `object` once, returning how to spell it the first time and
    /// every time after.
    fn cache(&mut self, object: &Expression<'_>) -> (String, String) {
        let text = self.render(object);
        if is_simple(object) {
            return (text.clone(), text);
        }
        let temp = self.temp();
        (format!("({temp} = {text})"), temp)
    }

    fn reference(&mut self, target: &AssignmentTarget<'_>) -> Option<Reference> {
        match target {
            AssignmentTarget::AssignmentTargetIdentifier(ident) => {
                Some(Reference::identifier(&ident.name))
            }
            AssignmentTarget::StaticMemberExpression(member) => {
                Some(self.static_reference(member))
            }
            AssignmentTarget::PrivateFieldExpression(member) => {
                Some(self.private_reference(member))
            }
            AssignmentTarget::ComputedMemberExpression(member) => {
                Some(self.computed_reference(member))
            }
            // Type-only wrappers: `x!`, `x as T`, `x satisfies T`, `<T>x`.
            AssignmentTarget::TSNonNullExpression(wrapped) => {
                self.inner_reference(&wrapped.expression)
            }
            AssignmentTarget::TSAsExpression(wrapped) => self.inner_reference(&wrapped.expression),
            AssignmentTarget::TSSatisfiesExpression(wrapped) => {
                self.inner_reference(&wrapped.expression)
            }
            AssignmentTarget::TSTypeAssertion(wrapped) => {
                self.inner_reference(&wrapped.expression)
            }
            _ => None,
        }
    }

    /// Reference for the target under parentheses and type wrappers.
    fn inner_reference(&mut self, expr: &Expression<'_>) -> Option<Reference> {
        match expr.get_inner_expression() {
            Expression::Identifier(ident) => Some(Reference::identifier(&ident.name)),
            Expression::StaticMemberExpression(member) => Some(self.static_reference(member)),
            Expression::PrivateFieldExpression(member) => Some(self.private_reference(member)),
            Expression::ComputedMemberExpression(member) => Some(self.computed_reference(member)),
            _ => None,
        }
    }

    fn static_reference(&mut self, member: &StaticMemberExpression<'_>) -> Reference {
        let (first, again) = self.cache(&member.object);
        let property = &member.property.name;
        Reference {
            first: format!("{first}.{property}"),
            again: format!("{again}.{property}"),
            simple: false,
        }
    }

    fn private_reference(&mut self, member: &PrivateFieldExpression<'_>) -> Reference {
        let (first, again) = self.cache(&member.object);
        let field = &member.field.name;
        Reference {
            first: format!("{first}.#{field}"),
            again: format!("{again}.#{field}"),
            simple: false,
        }
    }

    fn computed_reference(&mut self, member: &ComputedMemberExpression<'_>) -> Reference {
        let (first, again) = self.cache(&member.object);
        let key = self.render(&member.expression);
        let (key_first, key_again) = match &member.expression {
            Expression::StringLiteral(_) | Expression::NumericLiteral(_) => (key.clone(), key),
            _ => {
                let temp = self.temp();
                (format!("{temp} = {key}"), temp)
            }
        };
        Reference {
            first: format!("{first}[{key_first}]"),
            again: format!("{again}[{key_again}]"),
            simple: false,
        }
    }

    /// A plain call whose callee is a parenthesized member chain, with the
    /// offset of the `(` opening its arguments.
    fn parenthesized_chain_callee<'b, 'a>(
        &self,
        call: &'b CallExpression<'a>,
    ) -> Option<(&'b ChainExpression<'a>, usize)> {
        if call.optional || !self.enabled(Feature::OptionalChaining) {
            return None;
        }
        let Expression::ParenthesizedExpression(paren) = &call.callee else {
            return None;
        };
        let Expression::ChainExpression(chain) = paren.expression.without_parentheses() else {
            return None;
        };
        if !ends_in_member(chain) {
            return None;
        }

        let after_callee = call
            .type_arguments
            .as_ref()
            .map_or(call.callee.span().end, |arguments| arguments.span.end);
        let source = self.patches.source();
        let open = skip_trivia(source, after_callee as usize);
        source[open..].starts_with('(').then_some((&**chain, open))
    }

    fn strip_separators(&mut self, node: &impl GetSpan) {
        if !self.enabled(Feature::NumericSeparator) {
            return;
        }
        let span = span_of(node);
        let raw = self.patches.slice(span);
        if raw.contains('_') {
            self.patches.replace(span, raw.replace('_', ""));
            self.mark(Feature::NumericSeparator);
        }
    }
}

impl<'a> Visit<'a> for Rewriter<'_> {
    fn visit_program(&mut self, program: &Program<'a>) {
        self.scopes.push(Vec::new());
        walk::walk_program(self, program);
        let temps = self.scopes.pop().unwrap_or_default();
        if temps.is_empty() {
            return;
        }

        let declaration = format!("var {};", temps.join(", "));
        let after_prologue = program
            .directives
            .last()
            .map(|directive| directive.span.end)
            .or_else(|| program.hashbang.as_ref().map(|hashbang| hashbang.span.end));
        match after_prologue {
            Some(end) => self.patches.insert(end as usize, format!("\n{declaration}")),
            None => self
                .patches
                .insert(program.span.start as usize, format!("{declaration}\n")),
        }
    }

    fn visit_function(&mut self, func: &Function<'a>, _flags: ScopeFlags) {
        // Defaults are lowered in the enclosing scope.
        self.visit_formal_parameters(&func.params);
        if let Some(body) = &func.body {
            self.scopes.push(Vec::new());
            self.visit_function_body(body);
            let temps = self.scopes.pop().unwrap_or_default();
            self.declare_in_body(body, &temps);
        }
    }

    fn visit_arrow_function_expression(&mut self, arrow: &ArrowFunctionExpression<'a>) {
        self.visit_formal_parameters(&arrow.params);
        self.scopes.push(Vec::new());
        self.visit_function_body(&arrow.body);
        let temps = self.scopes.pop().unwrap_or_default();
        if temps.is_empty() {
            return;
        }
        if !arrow.expression {
            self.declare_in_body(&arrow.body, &temps);
            return;
        }

        if let Some(Statement::ExpressionStatement(stmt)) = arrow.body.statements.first() {
            let span = span_of(&stmt.expression);
            let value = self.patches.render(span);
            self.patches.replace(
                span,
                format!("{{ var {}; return {value}; }}", temps.join(", ")),
            );
        }
    }

    fn visit_chain_expression(&mut self, chain: &ChainExpression<'a>) {
        walk::walk_chain_expression(self, chain);
        if !self.enabled(Feature::OptionalChaining) {
            return;
        }
        let lowered = self.lower_chain(chain, ChainUse::Value);
        self.patches.replace(span_of(chain), lowered);
        self.mark(Feature::OptionalChaining);
    }

    fn visit_unary_expression(&mut self, expr: &UnaryExpression<'a>) {
        if expr.operator == UnaryOperator::Delete && self.enabled(Feature::OptionalChaining) {
            // `delete (a?.b)` still deletes the property.
            if let Expression::ChainExpression(chain) = expr.argument.without_parentheses() {
                walk::walk_chain_expression(self, chain);
                let lowered = self.lower_chain(chain, ChainUse::Delete);
                self.patches.replace(span_of(expr), lowered);
                self.mark(Feature::OptionalChaining);
                return;
            }
        }
        walk::walk_unary_expression(self, expr);
    }

    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        if let Some((chain, open)) = self.parenthesized_chain_callee(call) {
            // `(a?.b)()` calls `b` with `this` bound to `a`.
            walk::walk_chain_expression(self, chain);
            self.visit_arguments(&call.arguments);
            let (callee, receiver) = self.lower_callee(chain);
            let separator = if call.arguments.is_empty() { "" } else { ", " };
            self.patches
                .replace(span_of(&call.callee), format!("{callee}.call"));
            self.patches.insert(open + 1, format!("{receiver}{separator}"));
            self.mark(Feature::OptionalChaining);
            return;
        }
        walk::walk_call_expression(self, call);
    }

    fn visit_logical_expression(&mut self, expr: &LogicalExpression<'a>) {
        walk::walk_logical_expression(self, expr);
        if expr.operator != LogicalOperator::Coalesce
            || !self.enabled(Feature::NullishCoalescing)
        {
            return;
        }

        let fallback = self.render(&expr.right);
        let value = self.render(&expr.left);
        let lowered = if is_simple(&expr.left) {
            format!("({value} != null ? {value} : {fallback})")
        } else {
            let temp = self.temp();
            format!("(({temp} = {value}) != null ? {temp} : {fallback})")
        };
        self.patches.replace(span_of(expr), lowered);
        self.mark(Feature::NullishCoalescing);
    }

    fn visit_binary_expression(&mut self, expr: &BinaryExpression<'a>) {
        walk::walk_binary_expression(self, expr);
        if expr.operator != BinaryOperator::Exponential || !self.enabled(Feature::ExponentOperator)
        {
            return;
        }
        let base = self.render(&expr.left);
        let exponent = self.render(&expr.right);
        self.patches
            .replace(span_of(expr), format!("Math.pow({base}, {exponent})"));
        self.mark(Feature::ExponentOperator);
    }

    fn visit_assignment_expression(&mut self, expr: &AssignmentExpression<'a>) {
        walk::walk_assignment_expression(self, expr);
        let feature = match expr.operator {
            AssignmentOperator::Exponential => Feature::ExponentOperator,
            AssignmentOperator::LogicalOr
            | AssignmentOperator::LogicalAnd
            | AssignmentOperator::LogicalNullish => Feature::LogicalAssignment,
            _ => return,
        };
        if !self.enabled(feature) {
            return;
        }
        let Some(Reference {
            first,
            again,
            simple,
        }) = self.reference(&expr.left)
        else {
            return;
        };
        let value = self.render(&expr.right);

        let lowered = match expr.operator {
            AssignmentOperator::Exponential => {
                format!("({first} = Math.pow({again}, {value}))")
            }
            AssignmentOperator::LogicalOr => format!("({first} || ({again} = {value}))"),
            AssignmentOperator::LogicalAnd => format!("({first} && ({again} = {value}))"),
            _ if !self.enabled(Feature::NullishCoalescing) => {
                format!("({first} ?? ({again} = {value}))")
            }
            _ if simple => format!("({first} != null ? {first} : ({again} = {value}))"),
            _ => {
                let temp = self.temp();
                format!("(({temp} = {first}) != null ? {temp} : ({again} = {value}))")
            }
        };
        self.patches.replace(span_of(expr), lowered);
        self.mark(feature);
    }

    fn visit_catch_clause(&mut self, clause: &CatchClause<'a>) {
        walk::walk_catch_clause(self, clause);
        if clause.param.is_some() || !self.enabled(Feature::OptionalCatchBinding) {
            return;
        }
        // A catch binding, not a hoisted temporary.
        let name = self.names.fresh();
        self.patches
            .insert(clause.body.span.start as usize, format!("({name}) "));
        self.mark(Feature::OptionalCatchBinding);
    }

    fn visit_numeric_literal(&mut self, lit: &NumericLiteral<'a>) {
        self.strip_separators(lit);
    }

    fn visit_big_int_literal(&mut self, lit: &BigIntLiteral<'a>) {
        self.strip_separators(lit);
    }
}
