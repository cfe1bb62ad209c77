//! Every feature is reachable both ways: some target keeps it, some target
//! lowers it, and every engine relevant to its family is listed.

use downlevel_compat::{CompatibilityMatrix, Support};
use downlevel_core::{Feature, SyntaxFamily};
use downlevel_target::{Engine, EngineConstraint, TargetSpec, Version};

fn relevant_engines(family: SyntaxFamily) -> Vec<Engine> {
    Engine::ALL
        .into_iter()
        .filter(|engine| match family {
            SyntaxFamily::Script => true,
            SyntaxFamily::Style => engine.is_browser(),
        })
        .collect()
}

#[test]
fn every_feature_has_an_entry() {
    let matrix = CompatibilityMatrix::builtin();
    for feature in Feature::ALL {
        assert!(matrix.entry(feature).is_some(), "{feature} has no matrix entry");
    }
    assert_eq!(matrix.entries().len(), Feature::ALL.len());
}

#[test]
fn entries_list_exactly_the_relevant_engines() {
    let matrix = CompatibilityMatrix::builtin();
    for entry in matrix.entries() {
        let mut listed: Vec<Engine> = entry.support.iter().map(|(engine, _)| *engine).collect();
        listed.sort();
        let mut expected = relevant_engines(entry.feature.family());
        expected.sort();
        assert_eq!(listed, expected, "engines listed for {}", entry.feature);
    }
}

#[test]
fn every_feature_is_preserved_by_some_target() {
    let matrix = CompatibilityMatrix::builtin();
    for entry in matrix.entries() {
        let constraints: Vec<EngineConstraint> = entry
            .support
            .iter()
            .filter_map(|(engine, support)| match support {
                Support::Since(min) => Some(EngineConstraint::new(*engine, *min)),
                Support::Never => None,
            })
            .collect();
        assert!(!constraints.is_empty(), "{} is never supported", entry.feature);
        assert!(
            matrix.is_supported(entry.feature, &TargetSpec::List(constraints)),
            "{} should be preserved at its minimum versions",
            entry.feature
        );
    }
}

#[test]
fn every_feature_is_lowered_by_some_target() {
    let matrix = CompatibilityMatrix::builtin();
    for entry in matrix.entries() {
        let lowering = entry.support.iter().find_map(|(engine, support)| match support {
            Support::Since(min) if min.major > 0 => Some(EngineConstraint::new(
                *engine,
                Version::major(min.major - 1),
            )),
            Support::Never => Some(EngineConstraint::new(*engine, Version::LATEST)),
            Support::Since(_) => None,
        });
        let Some(constraint) = lowering else {
            panic!("no target lowers {}", entry.feature);
        };
        assert!(
            !matrix.is_supported(entry.feature, &TargetSpec::Single(constraint)),
            "{} should be lowered for {constraint}",
            entry.feature
        );
    }
}
