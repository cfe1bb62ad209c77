//! Syntax families and the features that can be lowered within them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// The language family a source unit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyntaxFamily {
    /// JavaScript and TypeScript, including JSX dialects
    Script,
    /// CSS
    Style,
}

impl SyntaxFamily {
    /// Both families, in a stable order.
    pub const ALL: [SyntaxFamily; 2] = [SyntaxFamily::Script, SyntaxFamily::Style];

    /// Infer the family from a file extension.
    ///
    /// Returns `None` for extensions neither downleveler understands.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "js" | "mjs" | "cjs" | "jsx" | "ts" | "mts" | "cts" | "tsx" => Some(Self::Script),
            "css" => Some(Self::Style),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Script => "script",
            Self::Style => "style",
        }
    }
}

impl fmt::Display for SyntaxFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A syntax capability that may need lowering for older engines.
///
/// Variants are declared in pass order within each family: a feature whose
/// lowered form could contain another feature's syntax is listed before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum Feature {
    /// `1_000_000`
    NumericSeparator,
    /// `try {} catch {}`
    OptionalCatchBinding,
    /// `a ** b`, `a **= b`
    ExponentOperator,
    /// `a ||= b`, `a &&= b`, `a ??= b`
    LogicalAssignment,
    /// `a ?? b`
    NullishCoalescing,
    /// `a?.b`, `a?.[k]`, `a?.()`
    OptionalChaining,
    /// `@media (width >= 600px)`
    MediaRangeSyntax,
    /// `inset: 0`
    InsetProperty,
    /// `#rrggbbaa`, `#rgba`
    HexAlphaColors,
    /// `.a { & .b {} }`
    CssNesting,
}

impl Feature {
    /// Every feature, script family first, each family in pass order.
    pub const ALL: [Feature; 10] = [
        Feature::NumericSeparator,
        Feature::OptionalCatchBinding,
        Feature::ExponentOperator,
        Feature::LogicalAssignment,
        Feature::NullishCoalescing,
        Feature::OptionalChaining,
        Feature::MediaRangeSyntax,
        Feature::InsetProperty,
        Feature::HexAlphaColors,
        Feature::CssNesting,
    ];

    pub const fn family(self) -> SyntaxFamily {
        match self {
            Feature::NumericSeparator
            | Feature::OptionalCatchBinding
            | Feature::ExponentOperator
            | Feature::LogicalAssignment
            | Feature::NullishCoalescing
            | Feature::OptionalChaining => SyntaxFamily::Script,
            Feature::MediaRangeSyntax
            | Feature::InsetProperty
            | Feature::HexAlphaColors
            | Feature::CssNesting => SyntaxFamily::Style,
        }
    }

    /// The camelCase identifier used in configuration and diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Feature::NumericSeparator => "numericSeparator",
            Feature::OptionalCatchBinding => "optionalCatchBinding",
            Feature::ExponentOperator => "exponentOperator",
            Feature::LogicalAssignment => "logicalAssignment",
            Feature::NullishCoalescing => "nullishCoalescing",
            Feature::OptionalChaining => "optionalChaining",
            Feature::MediaRangeSyntax => "mediaRangeSyntax",
            Feature::InsetProperty => "insetProperty",
            Feature::HexAlphaColors => "hexAlphaColors",
            Feature::CssNesting => "cssNesting",
        }
    }

    /// Features of one family, in pass order.
    pub fn of_family(family: SyntaxFamily) -> impl Iterator<Item = Feature> {
        Self::ALL.into_iter().filter(move |f| f.family() == family)
    }

    const fn bit(self) -> u16 {
        1 << (self as u8)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| format!("Unknown feature: {}", s))
    }
}

/// A set of features, iterated in pass order.
///
/// `Copy` so one computed set can be handed to every worker without
/// allocation.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FeatureSet(u16);

impl FeatureSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, feature: Feature) {
        self.0 |= feature.bit();
    }

    pub fn remove(&mut self, feature: Feature) {
        self.0 &= !feature.bit();
    }

    pub const fn contains(&self, feature: Feature) -> bool {
        self.0 & feature.bit() != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Restrict the set to one family.
    pub fn for_family(self, family: SyntaxFamily) -> Self {
        self.iter().filter(|f| f.family() == family).collect()
    }

    /// Iterate in pass order.
    pub fn iter(&self) -> impl Iterator<Item = Feature> + '_ {
        Feature::ALL.into_iter().filter(|f| self.contains(*f))
    }
}

impl FromIterator<Feature> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        let mut set = Self::empty();
        set.extend(iter);
        set
    }
}

impl Extend<Feature> for FeatureSet {
    fn extend<I: IntoIterator<Item = Feature>>(&mut self, iter: I) {
        for feature in iter {
            self.insert(feature);
        }
    }
}

impl fmt::Debug for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_from_path() {
        assert_eq!(SyntaxFamily::from_path("index.ts"), Some(SyntaxFamily::Script));
        assert_eq!(SyntaxFamily::from_path("a/b/c.MJS"), Some(SyntaxFamily::Script));
        assert_eq!(SyntaxFamily::from_path("index.css"), Some(SyntaxFamily::Style));
        assert_eq!(SyntaxFamily::from_path("readme.md"), None);
        assert_eq!(SyntaxFamily::from_path("Makefile"), None);
    }

    #[test]
    fn test_every_feature_has_a_unique_bit() {
        let mut seen = 0u16;
        for feature in Feature::ALL {
            assert_eq!(seen & feature.bit(), 0, "{feature} shares a bit");
            seen |= feature.bit();
        }
    }

    #[test]
    fn test_feature_names_round_trip() {
        for feature in Feature::ALL {
            assert_eq!(feature.name().parse::<Feature>().unwrap(), feature);
        }
        assert!("arrowFunctions".parse::<Feature>().is_err());
    }

    #[test]
    fn test_feature_serde_uses_camel_case() {
        let json = serde_json::to_string(&Feature::OptionalChaining).unwrap();
        assert_eq!(json, "\"optionalChaining\"");
    }

    #[test]
    fn test_feature_set_iterates_in_pass_order() {
        let set: FeatureSet = [
            Feature::CssNesting,
            Feature::OptionalChaining,
            Feature::LogicalAssignment,
            Feature::NullishCoalescing,
        ]
        .into_iter()
        .collect();

        let order: Vec<_> = set.iter().collect();
        assert_eq!(
            order,
            vec![
                Feature::LogicalAssignment,
                Feature::NullishCoalescing,
                Feature::OptionalChaining,
                Feature::CssNesting,
            ]
        );
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_feature_set_for_family() {
        let set: FeatureSet = [Feature::CssNesting, Feature::OptionalChaining]
            .into_iter()
            .collect();

        let script = set.for_family(SyntaxFamily::Script);
        assert!(script.contains(Feature::OptionalChaining));
        assert!(!script.contains(Feature::CssNesting));

        let mut style = set.for_family(SyntaxFamily::Style);
        style.remove(Feature::CssNesting);
        assert!(style.is_empty());
    }

    #[test]
    fn test_of_family_matches_family() {
        assert!(Feature::of_family(SyntaxFamily::Style).all(|f| f.family() == SyntaxFamily::Style));
        assert_eq!(Feature::of_family(SyntaxFamily::Script).count(), 6);
        assert_eq!(Feature::of_family(SyntaxFamily::Style).count(), 4);
    }
}
