//! The `inset` shorthand, expanded into its four physical longhands.
//!
//! lightningcss only splits `inset` while minifying, and minifying would
//! also merge the longhands straight back. A visitor over the parsed
//! declaration blocks does the split instead.

use std::convert::Infallible;

use lightningcss::declaration::DeclarationBlock;
use lightningcss::properties::Property;
use lightningcss::stylesheet::StyleSheet;
use lightningcss::visit_types;
use lightningcss::visitor::{Visit, VisitTypes, Visitor};

/// Replaces every `inset` declaration in the stylesheet, nested rules
/// included. Returns how many declarations were expanded.
pub(crate) fn expand(sheet: &mut StyleSheet) -> usize {
    let mut expander = InsetExpander::default();
    sheet
        .visit(&mut expander)
        .unwrap_or_else(|never| match never {});
    expander.expanded
}

#[derive(Debug, Default)]
struct InsetExpander {
    expanded: usize,
}

impl<'i> Visitor<'i> for InsetExpander {
    type Error = Infallible;

    fn visit_types(&self) -> VisitTypes {
        visit_types!(PROPERTIES)
    }

    fn visit_declaration_block(
        &mut self,
        block: &mut DeclarationBlock<'i>,
    ) -> Result<(), Self::Error> {
        self.expanded += expand_declarations(&mut block.declarations);
        self.expanded += expand_declarations(&mut block.important_declarations);
        Ok(())
    }
}

fn expand_declarations(declarations: &mut Vec<Property<'_>>) -> usize {
    let count = declarations
        .iter()
        .filter(|property| matches!(property, Property::Inset(_)))
        .count();
    if count == 0 {
        return 0;
    }

    let mut expanded = Vec::with_capacity(declarations.len() + 3 * count);
    for property in declarations.drain(..) {
        match property {
            Property::Inset(inset) => expanded.extend([
                Property::Top(inset.top),
                Property::Right(inset.right),
                Property::Bottom(inset.bottom),
                Property::Left(inset.left),
            ]),
            other => expanded.push(other),
        }
    }
    *declarations = expanded;
    count
}

#[cfg(test)]
mod tests {
    use lightningcss::stylesheet::{ParserOptions, PrinterOptions};

    use super::*;

    fn expanded(source: &str) -> (usize, String) {
        let mut sheet = StyleSheet::parse(source, ParserOptions::default()).unwrap();
        let count = expand(&mut sheet);
        let code = sheet.to_css(PrinterOptions::default()).unwrap().code;
        (count, code)
    }

    #[test]
    fn one_value_fills_every_side() {
        let (count, code) = expanded(".a { inset: 0 }");
        assert_eq!(count, 1);
        assert!(code.contains("top: 0;"), "{code}");
        assert!(code.contains("right: 0;"), "{code}");
        assert!(code.contains("bottom: 0;"), "{code}");
        assert!(code.contains("left: 0"), "{code}");
        assert!(!code.contains("inset"), "{code}");
    }

    #[test]
    fn sides_follow_the_shorthand_order() {
        let (_, code) = expanded(".a { inset: 1px 2px 3px }");
        let top = code.find("top: 1px").unwrap();
        let right = code.find("right: 2px").unwrap();
        let bottom = code.find("bottom: 3px").unwrap();
        let left = code.find("left: 2px").unwrap();
        assert!(top < right && right < bottom && bottom < left, "{code}");
    }

    #[test]
    fn important_stays_important() {
        let (count, code) = expanded(".a { inset: 1px 2px !important }");
        assert_eq!(count, 1);
        assert!(code.contains("top: 1px !important"), "{code}");
        assert!(code.contains("left: 2px !important"), "{code}");
    }

    #[test]
    fn nested_blocks_are_visited() {
        let (count, _) = expanded(".a { inset: 0; .b { inset: auto } }");
        assert_eq!(count, 2);
    }

    #[test]
    fn other_declarations_are_left_alone() {
        let (count, code) = expanded(".a { color: red; margin: 0 }");
        assert_eq!(count, 0);
        assert!(code.contains("color: red"), "{code}");
    }
}
