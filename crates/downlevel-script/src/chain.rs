//! Optional chain lowering.
//!
//! A chain such as `a.b?.c(d)?.[e]` is flattened into its base expression and
//! the ordered links applied to it. Lowering walks the links left to right,
//! turning every optional link into a `== null` check on the value so far and
//! gathering the checks into one conditional:
//!
//! ```text
//! a?.b?.()  =>  (a == null || (_a = a.b) == null ? void 0 : _a.call(a))
//! ```

use downlevel_core::Span;
use oxc_ast::ast::{
    Argument, CallExpression, ChainElement, ChainExpression, Expression, TSNonNullExpression,
};
use oxc_span::GetSpan;

use crate::rewriter::{Rewriter, is_simple};

/// What the lowered chain evaluates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChainUse {
    /// A plain read: short-circuits to `void 0`
    Value,
    /// The operand of `delete`: short-circuits to `true`
    Delete,
    /// A parenthesized callee, `(a?.b)()`: keeps the receiver for `.call`
    Callee,
}

enum LinkKind<'b, 'a> {
    /// `.x`, `.#x` (dotted) or `[x]`
    Member { dotted: bool },
    Call(&'b [Argument<'a>]),
    NonNull,
}

struct Link<'b, 'a> {
    kind: LinkKind<'b, 'a>,
    optional: bool,
    /// End of the object or callee this link applies to
    object_end: u32,
    end: u32,
}

impl Link<'_, '_> {
    fn is_call(&self) -> bool {
        matches!(self.kind, LinkKind::Call(_))
    }

    fn is_member(&self) -> bool {
        matches!(self.kind, LinkKind::Member { .. })
    }
}

type Peeled<'b, 'a> = (Link<'b, 'a>, &'b Expression<'a>);

fn member_link<'b, 'a>(
    object: &'b Expression<'a>,
    optional: bool,
    end: u32,
    dotted: bool,
) -> Peeled<'b, 'a> {
    let link = Link {
        kind: LinkKind::Member { dotted },
        optional,
        object_end: object.span().end,
        end,
    };
    (link, object)
}

fn call_link<'b, 'a>(call: &'b CallExpression<'a>) -> Peeled<'b, 'a> {
    let link = Link {
        kind: LinkKind::Call(&call.arguments),
        optional: call.optional,
        object_end: call.callee.span().end,
        end: call.span.end,
    };
    (link, &call.callee)
}

fn non_null_link<'b, 'a>(non_null: &'b TSNonNullExpression<'a>) -> Peeled<'b, 'a> {
    let link = Link {
        kind: LinkKind::NonNull,
        optional: false,
        object_end: non_null.expression.span().end,
        end: non_null.span.end,
    };
    (link, &non_null.expression)
}

/// Peel one member/call/non-null layer off `expr`.
fn peel<'b, 'a>(expr: &'b Expression<'a>) -> Option<Peeled<'b, 'a>> {
    let peeled = match expr {
        Expression::StaticMemberExpression(m) => member_link(&m.object, m.optional, m.span.end, true),
        Expression::PrivateFieldExpression(m) => member_link(&m.object, m.optional, m.span.end, true),
        Expression::ComputedMemberExpression(m) => {
            member_link(&m.object, m.optional, m.span.end, false)
        }
        Expression::CallExpression(c) => call_link(c),
        Expression::TSNonNullExpression(n) => non_null_link(n),
        _ => return None,
    };
    Some(peeled)
}

/// First offset at or after `from` that is not whitespace or a comment.
pub(crate) fn skip_trivia(source: &str, from: usize) -> usize {
    let mut at = from;
    while let Some(rest) = source.get(at..) {
        if let Some(body) = rest.strip_prefix("/*") {
            at += body.find("*/").map_or(rest.len(), |end| end + 4);
        } else if rest.starts_with("//") {
            at += rest
                .find(['\n', '\r', '\u{2028}', '\u{2029}'])
                .unwrap_or(rest.len());
        } else {
            match rest.chars().next() {
                Some(c) if c.is_whitespace() => at += c.len_utf8(),
                _ => break,
            }
        }
    }
    at
}

/// Whether the outermost link of `chain` is a property access.
pub(crate) fn ends_in_member(chain: &ChainExpression<'_>) -> bool {
    matches!(
        chain.expression,
        ChainElement::StaticMemberExpression(_)
            | ChainElement::PrivateFieldExpression(_)
            | ChainElement::ComputedMemberExpression(_)
    )
}

/// Split a chain into its base expression and links, innermost first.
fn flatten<'b, 'a>(element: &'b ChainElement<'a>) -> (&'b Expression<'a>, Vec<Link<'b, 'a>>) {
    let (outermost, mut cursor) = match element {
        ChainElement::CallExpression(c) => call_link(c),
        ChainElement::TSNonNullExpression(n) => non_null_link(n),
        ChainElement::StaticMemberExpression(m) => member_link(&m.object, m.optional, m.span.end, true),
        ChainElement::PrivateFieldExpression(m) => member_link(&m.object, m.optional, m.span.end, true),
        ChainElement::ComputedMemberExpression(m) => {
            member_link(&m.object, m.optional, m.span.end, false)
        }
    };

    let mut links = vec![outermost];
    while let Some((link, inner)) = peel(cursor) {
        links.push(link);
        cursor = inner;
    }
    links.reverse();
    (cursor, links)
}

impl Rewriter<'_> {
    pub(crate) fn lower_chain(&mut self, chain: &ChainExpression<'_>, usage: ChainUse) -> String {
        self.lower_links(chain, usage).0
    }

    /// Lowers a chain called through parentheses. Returns the callee and
    /// the receiver it has to be `.call`ed with.
    pub(crate) fn lower_callee(&mut self, chain: &ChainExpression<'_>) -> (String, String) {
        let (callee, receiver) = self.lower_links(chain, ChainUse::Callee);
        (callee, receiver.unwrap_or_else(|| "void 0".to_string()))
    }

    fn lower_links(
        &mut self,
        chain: &ChainExpression<'_>,
        usage: ChainUse,
    ) -> (String, Option<String>) {
        let (base, links) = flatten(&chain.expression);

        let mut checks: Vec<String> = Vec::new();
        let mut current = self.render(base);
        let mut simple = is_simple(base);
        let mut receiver: Option<String> = None;

        for (index, link) in links.iter().enumerate() {
            let this = receiver.take();

            if link.optional {
                if let (LinkKind::Call(arguments), Some(this)) = (&link.kind, &this) {
                    // Keep the receiver as `this` for an optional method call.
                    let callee = self.temp();
                    checks.push(format!("({callee} = {current}) == null"));
                    current = format!("{callee}.call({this}{})", self.call_arguments(arguments));
                    simple = false;
                    continue;
                }
                if simple {
                    checks.push(format!("{current} == null"));
                } else {
                    let temp = self.temp();
                    checks.push(format!("({temp} = {current}) == null"));
                    current = temp;
                }
            }

            let calls_next = match links.get(index + 1) {
                Some(next) => next.optional && next.is_call(),
                None => usage == ChainUse::Callee,
            };
            if link.is_member() && calls_next {
                if simple || link.optional {
                    receiver = Some(if current == "super" {
                        "this".to_string()
                    } else {
                        current.clone()
                    });
                } else {
                    let temp = self.temp();
                    current = format!("({temp} = {current})");
                    receiver = Some(temp);
                }
            }

            current.push_str(&self.link_text(link));
            simple = false;
        }

        let short_circuit = match usage {
            ChainUse::Value | ChainUse::Callee => "void 0",
            ChainUse::Delete => {
                current.insert_str(0, "delete ");
                "true"
            }
        };
        let lowered = format!("({} ? {short_circuit} : {current})", checks.join(" || "));
        (lowered, receiver)
    }

    /// Source of one link with its leading `?.` removed.
    fn link_text(&self, link: &Link<'_, '_>) -> String {
        let start = link.object_end as usize;
        let end = link.end as usize;
        if !link.optional {
            return self.patches.render(Span::new(start, end));
        }
        // Only comments and whitespace sit between the object and `?.`.
        let operator = skip_trivia(self.patches.source(), start);
        let after = if self.patches.source()[operator..].starts_with("?.") {
            operator + 2
        } else {
            start
        };
        let text = self.patches.render(Span::new(after, end));
        let rest = text.trim_start();
        match link.kind {
            LinkKind::Member { dotted: true } => format!(".{rest}"),
            _ => rest.to_string(),
        }
    }

    /// `, arg1, arg2` for a `.call(this, ...)` rewrite.
    fn call_arguments(&self, arguments: &[Argument<'_>]) -> String {
        match (arguments.first(), arguments.last()) {
            (Some(first), Some(last)) => format!(
                ", {}",
                self.patches.render(Span::new(
                    first.span().start as usize,
                    last.span().end as usize
                ))
            ),
            _ => String::new(),
        }
    }
}
