use super::*;
use crate::syntax::{Expression, RuleModifiers};

fn plain(name: &str, body: Expression) -> Rule {
    Rule::new(name, body)
}

fn final_rule(name: &str, body: Expression) -> Rule {
    Rule::new(name, body).with_modifiers(RuleModifiers {
        is_final: true,
        ..Default::default()
    })
}

fn override_rule(name: &str, body: Expression) -> Rule {
    Rule::new(name, body).with_modifiers(RuleModifiers {
        is_override: true,
        ..Default::default()
    })
}

fn lit(text: &str) -> Expression {
    Expression::literal(text)
}

fn names(resolution: &Resolution) -> Vec<&str> {
    resolution.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn test_override_replaces_earlier_definition() {
    let resolution = resolve_rules([plain("A", lit("'v1'")), override_rule("A", lit("'v2'"))]).unwrap();
    assert_eq!(resolution.len(), 1);
    assert_eq!(resolution.get("A").map(|r| &r.body), Some(&lit("'v2'")));
    assert!(resolution.warnings.is_empty());
}

#[test]
fn test_second_finalization_fails() {
    let err = resolve_rules([final_rule("A", lit("'v1'")), final_rule("A", lit("'v2'"))]).unwrap_err();
    assert_eq!(err, ResolveError::DuplicateFinalization { name: "A".into() });
}

#[test]
fn test_final_blocks_later_definition() {
    let resolution = resolve_rules([final_rule("A", lit("'v1'")), plain("A", lit("'v2'"))]).unwrap();
    assert_eq!(names(&resolution), vec!["A"]);
    assert_eq!(resolution.get("A").map(|r| &r.body), Some(&lit("'v1'")));
    assert_eq!(
        resolution.warnings,
        vec![ResolveWarning::BlockedByFinal { name: "A".into() }]
    );
}

#[test]
fn test_override_blocks_later_definitions() {
    let resolution = resolve_rules([
        override_rule("A", lit("'v1'")),
        plain("A", lit("'v2'")),
        override_rule("A", lit("'v3'")),
    ])
    .unwrap();
    assert_eq!(resolution.get("A").map(|r| &r.body), Some(&lit("'v1'")));
    assert_eq!(resolution.warnings.len(), 2);
    assert!(
        resolution
            .warnings
            .iter()
            .all(|w| matches!(w, ResolveWarning::BlockedByOverride { .. }) && w.name() == "A")
    );
}

#[test]
fn test_undefined_reference_reports_complete_set() {
    let err = resolve_rules([plain(
        "A",
        Expression::Sequence(vec![Expression::rule_call("C"), Expression::rule_call("B")]),
    )])
    .unwrap_err();
    assert_eq!(
        err,
        ResolveError::UndefinedRuleReference {
            names: ["B".into(), "C".into()].into_iter().collect()
        }
    );
    assert_eq!(err.to_string(), "undefined rule reference(s): B, C");
}

#[test]
fn test_single_undefined_reference() {
    let err = resolve_rules([plain("A", Expression::rule_call("B"))]).unwrap_err();
    assert_eq!(
        err,
        ResolveError::UndefinedRuleReference {
            names: ["B".into()].into_iter().collect()
        }
    );
}

#[test]
fn test_forward_references_resolve() {
    let resolution = resolve_rules([
        plain("A", Expression::rule_call("B")),
        plain("B", lit("'b'")),
    ])
    .unwrap();
    assert_eq!(names(&resolution), vec!["A", "B"]);
}

#[test]
fn test_replacing_rule_takes_its_own_position() {
    let resolution = resolve_rules([
        plain("A", lit("'a'")),
        plain("B", lit("'b'")),
        override_rule("A", lit("'a2'")),
        plain("C", lit("'c'")),
    ])
    .unwrap();
    assert_eq!(names(&resolution), vec!["B", "A", "C"]);
}

#[test]
fn test_plain_redefinition_replaces_earlier_definition() {
    let resolution = resolve_rules([
        plain("A", lit("'v1'")),
        plain("B", lit("'b'")),
        plain("A", lit("'v2'")),
    ])
    .unwrap();
    assert_eq!(names(&resolution), vec!["B", "A"]);
    assert_eq!(resolution.get("A").map(|r| &r.body), Some(&lit("'v2'")));
    assert!(resolution.warnings.is_empty());
}

#[test]
fn test_override_after_plain_redefinitions() {
    let resolution = resolve_rules([
        plain("A", lit("'v1'")),
        plain("A", lit("'v2'")),
        override_rule("A", lit("'v3'")),
    ])
    .unwrap();
    assert_eq!(resolution.len(), 1);
    assert_eq!(resolution.get("A").map(|r| &r.body), Some(&lit("'v3'")));
}

#[test]
fn test_override_and_final_on_same_rule() {
    let both = Rule::new("A", lit("'v2'")).with_modifiers(RuleModifiers {
        is_final: true,
        is_override: true,
        ..Default::default()
    });
    let resolution = resolve_rules([plain("A", lit("'v1'")), both, plain("A", lit("'v3'"))]).unwrap();
    assert_eq!(resolution.get("A").map(|r| &r.body), Some(&lit("'v2'")));
    assert_eq!(
        resolution.warnings,
        vec![ResolveWarning::BlockedByFinal { name: "A".into() }]
    );
}

#[test]
fn test_references_inside_skipped_rules_are_ignored() {
    let resolution = resolve_rules([
        final_rule("A", lit("'a'")),
        plain("A", Expression::rule_call("Missing")),
    ])
    .unwrap();
    assert_eq!(resolution.len(), 1);
}

#[test]
fn test_empty_input_resolves_to_empty_set() {
    let resolution = resolve_rules(Vec::new()).unwrap();
    assert!(resolution.is_empty());
    assert!(resolution.into_rules().is_empty());
}
