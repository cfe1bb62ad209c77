//! Span-based text patching.
//!
//! Downlevelers never re-print a whole unit. They record replacements and
//! insertions against byte spans of the original text, and the final output
//! is the original text with those patches spliced in. Nested patches
//! compose: when a rewrite needs the text of one of its operands it calls
//! [`PatchSet::render`] on the operand's span, which already includes every
//! patch recorded inside it. A replacement recorded later for an enclosing
//! span supersedes the ones inside it.

use std::cmp::{Ordering, Reverse};

/// Half-open byte range `[start, end)` into a unit's source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A zero-width span, used for insertions.
    pub const fn empty(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub const fn contains(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

#[derive(Debug, Clone)]
struct Patch {
    span: Span,
    text: String,
    seq: usize,
}

impl Patch {
    fn is_insert(&self) -> bool {
        self.span.is_empty()
    }

    /// Insertions first at a given offset (in recording order), then
    /// replacements from widest to narrowest, latest first on ties.
    fn apply_order(&self, other: &Patch) -> Ordering {
        self.span
            .start
            .cmp(&other.span.start)
            .then_with(|| other.is_insert().cmp(&self.is_insert()))
            .then_with(|| {
                if self.is_insert() {
                    self.seq.cmp(&other.seq)
                } else {
                    (Reverse(self.span.end), Reverse(self.seq))
                        .cmp(&(Reverse(other.span.end), Reverse(other.seq)))
                }
            })
    }
}

/// Patches recorded against one source text.
#[derive(Debug, Clone)]
pub struct PatchSet<'s> {
    source: &'s str,
    patches: Vec<Patch>,
}

impl<'s> PatchSet<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            patches: Vec::new(),
        }
    }

    pub fn source(&self) -> &'s str {
        self.source
    }

    /// Original text of `span`, ignoring patches.
    pub fn slice(&self, span: Span) -> &'s str {
        &self.source[span.start..span.end]
    }

    /// Replace the text of `span`.
    pub fn replace(&mut self, span: Span, text: impl Into<String>) {
        let seq = self.patches.len();
        self.patches.push(Patch {
            span,
            text: text.into(),
            seq,
        });
    }

    /// Insert text at a byte offset.
    pub fn insert(&mut self, at: usize, text: impl Into<String>) {
        self.replace(Span::empty(at), text);
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    /// Text of `span` with every patch inside it applied.
    pub fn render(&self, span: Span) -> String {
        let mut inside: Vec<&Patch> = self
            .patches
            .iter()
            .filter(|p| span.contains(p.span))
            .collect();
        inside.sort_by(|a, b| a.apply_order(b));

        let mut out = String::with_capacity(span.len());
        let mut cursor = span.start;
        for patch in inside {
            // Covered by a wider replacement already applied.
            if patch.span.start < cursor {
                continue;
            }
            out.push_str(&self.source[cursor..patch.span.start]);
            out.push_str(&patch.text);
            cursor = patch.span.end;
        }
        out.push_str(&self.source[cursor..span.end]);
        out
    }

    /// The whole source with all patches applied.
    pub fn finish(&self) -> String {
        if self.patches.is_empty() {
            return self.source.to_string();
        }
        self.render(Span::new(0, self.source.len()))
    }
}
