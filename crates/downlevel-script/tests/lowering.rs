//! End-to-end lowering of script units.

use downlevel_core::{
    Downleveler, Feature, FeatureSet, SourceUnit, SyntaxFamily, TransformError, TransformResult,
};
use downlevel_script::ScriptDownleveler;
use proptest::prelude::*;

fn lower_with(name: &str, source: &str, features: &[Feature]) -> TransformResult {
    let unit = SourceUnit::script(name, source);
    ScriptDownleveler::new()
        .transform(&unit, features.iter().copied().collect())
        .unwrap()
}

fn lower(source: &str, features: &[Feature]) -> TransformResult {
    lower_with("input.js", source, features)
}

fn lower_all(source: &str) -> TransformResult {
    let all: Vec<Feature> = Feature::of_family(SyntaxFamily::Script).collect();
    lower(source, &all)
}

#[test]
fn optional_call_chain_for_es2015() {
    let result = lower_all("a?.b?.();");
    assert_eq!(
        result.code,
        "var _a;\n(a == null || (_a = a.b) == null ? void 0 : _a.call(a));"
    );
    assert!(!result.code.contains("?."));
    assert_eq!(result.features, vec![Feature::OptionalChaining]);
}

#[test]
fn optional_chaining_kept_when_supported() {
    let result = lower("a?.b?.();", &[Feature::NullishCoalescing]);
    assert_eq!(result.code, "a?.b?.();");
    assert!(result.is_unchanged());
}

#[test]
fn optional_method_call_keeps_receiver() {
    let result = lower_all("obj.method?.(1, 2);");
    assert_eq!(
        result.code,
        "var _a;\n((_a = obj.method) == null ? void 0 : _a.call(obj, 1, 2));"
    );
}

#[test]
fn optional_member_on_computed_base() {
    let result = lower_all("function f(o) { return o.x?.y; }");
    assert_eq!(
        result.code,
        "function f(o) { var _a; return ((_a = o.x) == null ? void 0 : _a.y); }"
    );
}

#[test]
fn expression_bodied_arrow_gets_block_for_temps() {
    let result = lower_all("const g = (o) => o.x?.y;");
    assert_eq!(
        result.code,
        "const g = (o) => { var _a; return ((_a = o.x) == null ? void 0 : _a.y); };"
    );
}

#[test]
fn optional_delete() {
    let result = lower_all("delete a?.b;");
    assert_eq!(result.code, "(a == null ? true : delete a.b);");
}

#[test]
fn nested_rewrites_compose() {
    let result = lower_all("x = a?.[b ?? c];");
    assert_eq!(result.code, "x = (a == null ? void 0 : a[(b != null ? b : c)]);");
    assert_eq!(
        result.features,
        vec![Feature::NullishCoalescing, Feature::OptionalChaining]
    );
}

#[test]
fn chain_inside_call_arguments() {
    let result = lower_all("a?.b(c?.d);");
    assert_eq!(
        result.code,
        "(a == null ? void 0 : a.b((c == null ? void 0 : c.d)));"
    );
}

#[test]
fn nullish_coalescing() {
    assert_eq!(
        lower_all("const x = a ?? b;").code,
        "const x = (a != null ? a : b);"
    );
    assert_eq!(
        lower_all("const x = foo() ?? 1;").code,
        "var _a;\nconst x = ((_a = foo()) != null ? _a : 1);"
    );
}

#[test]
fn only_requested_features_are_lowered() {
    let result = lower("const x = a?.b ?? c;", &[Feature::NullishCoalescing]);
    assert_eq!(result.code, "var _a;\nconst x = ((_a = a?.b) != null ? _a : c);");
    assert_eq!(result.features, vec![Feature::NullishCoalescing]);
}

#[test]
fn logical_assignment() {
    assert_eq!(
        lower_all("a ||= b; a &&= c;").code,
        "(a || (a = b)); (a && (a = c));"
    );
    assert_eq!(
        lower_all("foo().p &&= v;").code,
        "var _a;\n((_a = foo()).p && (_a.p = v));"
    );
    assert_eq!(lower_all("a ??= b;").code, "(a != null ? a : (a = b));");
}

#[test]
fn nullish_assignment_without_nullish_lowering() {
    let result = lower("o[k] ??= v;", &[Feature::LogicalAssignment]);
    assert_eq!(result.code, "var _a;\n(o[_a = k] ?? (o[_a] = v));");
}

#[test]
fn nullish_assignment_with_nullish_lowering() {
    let result = lower(
        "o[k] ??= v;",
        &[Feature::LogicalAssignment, Feature::NullishCoalescing],
    );
    assert_eq!(
        result.code,
        "var _a, _b;\n((_b = o[_a = k]) != null ? _b : (o[_a] = v));"
    );
    assert_eq!(result.features, vec![Feature::LogicalAssignment]);
}

#[test]
fn exponent_operator() {
    assert_eq!(
        lower_all("y = a ** b; x **= 2;").code,
        "y = Math.pow(a, b); (x = Math.pow(x, 2));"
    );
    assert_eq!(
        lower_all("obj.count **= 2;").code,
        "(obj.count = Math.pow(obj.count, 2));"
    );
}

#[test]
fn optional_catch_binding() {
    let result = lower_all("try { f(); } catch { g(); }");
    assert_eq!(result.code, "try { f(); } catch (_a) { g(); }");
    assert_eq!(result.features, vec![Feature::OptionalCatchBinding]);

    let bound = lower_all("try { f(); } catch (e) { g(e); }");
    assert!(bound.is_unchanged());
}

#[test]
fn numeric_separators() {
    let result = lower_all("const n = 1_000_000; const big = 1_000n;");
    assert_eq!(result.code, "const n = 1000000; const big = 1000n;");
    assert_eq!(result.features, vec![Feature::NumericSeparator]);
}

#[test]
fn temps_skip_existing_names() {
    let result = lower_all("const _a = 1; foo()?.x;");
    assert_eq!(
        result.code,
        "var _b;\nconst _a = 1; ((_b = foo()) == null ? void 0 : _b.x);"
    );
}

#[test]
fn parameter_default_temps_belong_to_enclosing_scope() {
    let result = lower_all("function f(x = foo() ?? 1) { return x; }");
    assert_eq!(
        result.code,
        "var _a;\nfunction f(x = ((_a = foo()) != null ? _a : 1)) { return x; }"
    );
}

#[test]
fn declarations_follow_directives() {
    let result = lower_all("\"use strict\";\nfoo()?.x;");
    assert!(result.code.starts_with("\"use strict\""));
    assert!(result.code.contains("var _a;"));
    assert!(result.code.find("var _a;") > result.code.find("use strict"));
}

#[test]
fn untouched_code_is_byte_exact() {
    let source = "// keep me\nconst   spaced = 1; /* c */\nlet v = a?.b;\n";
    let result = lower_all(source);
    assert_eq!(
        result.code,
        "// keep me\nconst   spaced = 1; /* c */\nlet v = (a == null ? void 0 : a.b);\n"
    );
}

#[test]
fn typescript_units() {
    let result = lower_with(
        "index.ts",
        "const v: number | undefined = obj?.value;",
        &[Feature::OptionalChaining],
    );
    assert_eq!(
        result.code,
        "const v: number | undefined = (obj == null ? void 0 : obj.value);"
    );
}

#[test]
fn comments_between_object_and_operator() {
    assert_eq!(
        lower_all("a /* ?. */ ?.b;").code,
        "(a == null ? void 0 : a.b);"
    );
    assert_eq!(
        lower_all("a // ?.\n  ?.[k];").code,
        "(a == null ? void 0 : a[k]);"
    );
    assert_eq!(
        lower_all("a?./* x */b;").code,
        "(a == null ? void 0 : a./* x */b);"
    );
}

#[test]
fn parenthesized_delete_still_deletes() {
    assert_eq!(
        lower_all("delete (a?.b);").code,
        "(a == null ? true : delete a.b);"
    );
}

#[test]
fn parenthesized_callee_keeps_receiver() {
    assert_eq!(
        lower_all("(a?.b)();").code,
        "(a == null ? void 0 : a.b).call(a);"
    );
    assert_eq!(
        lower_all("(foo()?.b)(1);").code,
        "var _a;\n((_a = foo()) == null ? void 0 : _a.b).call(_a, 1);"
    );

    let plain = lower_all("(a.b)();");
    assert!(plain.is_unchanged());
}

#[test]
fn wrapped_assignment_targets() {
    let ts = |source: &str, feature: Feature| lower_with("index.ts", source, &[feature]).code;
    assert_eq!(ts("x! ||= 1;", Feature::LogicalAssignment), "(x || (x = 1));");
    assert_eq!(
        ts("(x as any) ||= 1;", Feature::LogicalAssignment),
        "(x || (x = 1));"
    );
    assert_eq!(
        ts("o.p! **= 2;", Feature::ExponentOperator),
        "(o.p = Math.pow(o.p, 2));"
    );
    assert_eq!(lower_all("(a) ??= b;").code, "(a != null ? a : (a = b));");
}

#[test]
fn lowering_is_idempotent() {
    let source = "\
function run(o, list) {
  const n = 1_000 ** 2;
  try { o.go?.(n); } catch { }
  list.total ??= o?.items?.[0] ?? 0;
  return (x) => x?.y;
}
";
    let once = lower_all(source);
    assert!(!once.code.contains("?."));
    assert!(!once.code.contains("??"));
    assert!(!once.code.contains("**"));

    let twice = lower_all(&once.code);
    assert_eq!(twice.code, once.code);
    assert!(twice.is_unchanged());
}

#[test]
fn empty_feature_set_passes_through() {
    let unit = SourceUnit::script("input.js", "const x = a ?? b;");
    let result = ScriptDownleveler::new()
        .transform(&unit, FeatureSet::empty())
        .unwrap();
    assert_eq!(result.code, "const x = a ?? b;");
}

#[test]
fn style_features_are_ignored() {
    let result = lower("a?.b;", &[Feature::CssNesting, Feature::InsetProperty]);
    assert!(result.is_unchanged());
    assert_eq!(result.code, "a?.b;");
}

#[test]
fn malformed_source() {
    let unit = SourceUnit::script("broken.js", "const = ;");
    let err = ScriptDownleveler::new()
        .transform(&unit, [Feature::OptionalChaining].into_iter().collect())
        .unwrap_err();
    assert!(matches!(err, TransformError::MalformedSource { .. }));
    assert_eq!(err.unit(), "broken.js");
}

#[test]
fn style_unit_is_rejected() {
    let unit = SourceUnit::style("index.css", ".a {}");
    let err = ScriptDownleveler::new()
        .transform(&unit, FeatureSet::empty())
        .unwrap_err();
    assert_eq!(
        err,
        TransformError::family_mismatch("index.css", SyntaxFamily::Script, SyntaxFamily::Style)
    );
}

proptest! {
    #[test]
    fn separators_are_stripped(head in 1u32..1000, groups in prop::collection::vec(0u32..1000, 1..4)) {
        let tail: Vec<String> = groups.iter().map(|g| format!("{g:03}")).collect();
        let source = format!("const n = {head}_{};", tail.join("_"));
        let expected = format!("const n = {head}{};", tail.join(""));
        prop_assert_eq!(lower(&source, &[Feature::NumericSeparator]).code, expected);
    }
}
