//! Feature lowering done by the lightningcss printer.

use downlevel_core::{Feature, Result, TransformError};
use lightningcss::stylesheet::{PrinterOptions, StyleSheet};
use lightningcss::targets::{Features, Targets};

/// lightningcss flags that lower `feature` while printing. `None` for
/// features the printer does not handle.
pub(crate) fn flags(feature: Feature) -> Option<Features> {
    match feature {
        Feature::CssNesting => Some(Features::Nesting),
        // `(400px <= width <= 700px)` is a separate flag upstream
        Feature::MediaRangeSyntax => {
            Some(Features::MediaRangeSyntax | Features::MediaIntervalSyntax)
        }
        Feature::HexAlphaColors => Some(Features::HexAlphaColors),
        _ => None,
    }
}

/// Prints `sheet`, compiling exactly the `include` features.
///
/// No browser targets are passed, so nothing outside `include` is
/// compiled or prefixed.
pub(crate) fn print(sheet: &StyleSheet, include: Features, unit: &str) -> Result<String> {
    let options = PrinterOptions {
        targets: Targets {
            browsers: None,
            include,
            exclude: Features::empty(),
        },
        ..Default::default()
    };
    sheet
        .to_css(options)
        .map(|result| result.code)
        .map_err(|e| TransformError::malformed_source(unit, e.to_string()))
}

#[cfg(test)]
mod tests {
    use downlevel_core::SyntaxFamily;
    use lightningcss::stylesheet::ParserOptions;

    use super::*;

    #[test]
    fn only_printer_features_have_flags() {
        assert!(flags(Feature::InsetProperty).is_none());
        assert!(flags(Feature::OptionalChaining).is_none());
        let printed = Feature::of_family(SyntaxFamily::Style)
            .filter(|f| flags(*f).is_some())
            .count();
        assert_eq!(printed, 3);
    }

    #[test]
    fn empty_include_keeps_modern_syntax() {
        let sheet =
            StyleSheet::parse(".a { color: #ff000080; & .b { top: 0 } }", ParserOptions::default())
                .unwrap();
        let code = print(&sheet, Features::empty(), "a.css").unwrap();
        assert!(code.contains('&'), "{code}");
        assert!(code.contains("#ff000080"), "{code}");
    }

    #[test]
    fn include_lowers_only_what_it_names() {
        let sheet =
            StyleSheet::parse(".a { color: #ff000080; & .b { top: 0 } }", ParserOptions::default())
                .unwrap();
        let code = print(&sheet, Features::Nesting, "a.css").unwrap();
        assert!(!code.contains('&'), "{code}");
        assert!(code.contains(".a .b"), "{code}");
        assert!(code.contains("#ff000080"), "{code}");
    }
}
