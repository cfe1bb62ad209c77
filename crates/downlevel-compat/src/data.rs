//! Built-in support data.
//!
//! Script features list every engine; style features list browsers only.
//! Versions are the first release that shipped the syntax unflagged.

use downlevel_core::Feature;
use downlevel_target::{Engine, Version};

use crate::matrix::{FeatureEntry, Support};

const fn since(major: u32, minor: u32) -> Support {
    Support::Since(Version::new(major, minor, 0))
}

pub(crate) static BUILTIN: &[FeatureEntry] = &[
    FeatureEntry {
        feature: Feature::NumericSeparator,
        support: &[
            (Engine::Es, since(2021, 0)),
            (Engine::Chrome, since(75, 0)),
            (Engine::Edge, since(79, 0)),
            (Engine::Firefox, since(70, 0)),
            (Engine::Safari, since(13, 0)),
            (Engine::Ios, since(13, 0)),
            (Engine::Opera, since(62, 0)),
            (Engine::Node, since(12, 5)),
            (Engine::Deno, since(1, 0)),
        ],
    },
    FeatureEntry {
        feature: Feature::OptionalCatchBinding,
        support: &[
            (Engine::Es, since(2019, 0)),
            (Engine::Chrome, since(66, 0)),
            (Engine::Edge, since(79, 0)),
            (Engine::Firefox, since(58, 0)),
            (Engine::Safari, since(11, 1)),
            (Engine::Ios, since(11, 3)),
            (Engine::Opera, since(53, 0)),
            (Engine::Node, since(10, 0)),
            (Engine::Deno, since(1, 0)),
        ],
    },
    FeatureEntry {
        feature: Feature::ExponentOperator,
        support: &[
            (Engine::Es, since(2016, 0)),
            (Engine::Chrome, since(52, 0)),
            (Engine::Edge, since(14, 0)),
            (Engine::Firefox, since(52, 0)),
            (Engine::Safari, since(10, 1)),
            (Engine::Ios, since(10, 3)),
            (Engine::Opera, since(39, 0)),
            (Engine::Node, since(7, 0)),
            (Engine::Deno, since(1, 0)),
        ],
    },
    FeatureEntry {
        feature: Feature::LogicalAssignment,
        support: &[
            (Engine::Es, since(2021, 0)),
            (Engine::Chrome, since(85, 0)),
            (Engine::Edge, since(85, 0)),
            (Engine::Firefox, since(79, 0)),
            (Engine::Safari, since(14, 0)),
            (Engine::Ios, since(14, 0)),
            (Engine::Opera, since(71, 0)),
            (Engine::Node, since(15, 0)),
            (Engine::Deno, since(1, 2)),
        ],
    },
    FeatureEntry {
        feature: Feature::NullishCoalescing,
        support: &[
            (Engine::Es, since(2020, 0)),
            (Engine::Chrome, since(80, 0)),
            (Engine::Edge, since(80, 0)),
            (Engine::Firefox, since(72, 0)),
            (Engine::Safari, since(13, 1)),
            (Engine::Ios, since(13, 4)),
            (Engine::Opera, since(67, 0)),
            (Engine::Node, since(14, 0)),
            (Engine::Deno, since(1, 0)),
        ],
    },
    FeatureEntry {
        feature: Feature::OptionalChaining,
        support: &[
            (Engine::Es, since(2020, 0)),
            (Engine::Chrome, since(80, 0)),
            (Engine::Edge, since(80, 0)),
            (Engine::Firefox, since(74, 0)),
            (Engine::Safari, since(13, 1)),
            (Engine::Ios, since(13, 4)),
            (Engine::Opera, since(67, 0)),
            (Engine::Node, since(14, 0)),
            (Engine::Deno, since(1, 0)),
        ],
    },
    FeatureEntry {
        feature: Feature::MediaRangeSyntax,
        support: &[
            (Engine::Chrome, since(104, 0)),
            (Engine::Edge, since(104, 0)),
            (Engine::Firefox, since(63, 0)),
            (Engine::Safari, since(16, 4)),
            (Engine::Ios, since(16, 4)),
            (Engine::Opera, since(91, 0)),
        ],
    },
    FeatureEntry {
        feature: Feature::InsetProperty,
        support: &[
            (Engine::Chrome, since(87, 0)),
            (Engine::Edge, since(87, 0)),
            (Engine::Firefox, since(66, 0)),
            (Engine::Safari, since(14, 1)),
            (Engine::Ios, since(14, 5)),
            (Engine::Opera, since(73, 0)),
        ],
    },
    FeatureEntry {
        feature: Feature::HexAlphaColors,
        support: &[
            (Engine::Chrome, since(62, 0)),
            (Engine::Edge, since(79, 0)),
            (Engine::Firefox, since(49, 0)),
            (Engine::Safari, since(10, 0)),
            (Engine::Ios, since(10, 0)),
            (Engine::Opera, since(49, 0)),
        ],
    },
    FeatureEntry {
        feature: Feature::CssNesting,
        support: &[
            (Engine::Chrome, since(112, 0)),
            (Engine::Edge, since(112, 0)),
            (Engine::Firefox, since(117, 0)),
            (Engine::Safari, since(16, 5)),
            (Engine::Ios, since(16, 5)),
            (Engine::Opera, since(98, 0)),
        ],
    },
];
