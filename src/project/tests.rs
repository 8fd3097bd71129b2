use super::*;
use crate::emit::EmitOptions;
use crate::resolve::{ResolveError, ResolveWarning};
use crate::transform::TransformError;

const BASE: &str = "\
grammar org.omg.kerml.xtext.KerML

Root : 'package' Name ';' ;
Name : ID ;
@Final
terminal ID : ('a'..'z')+ ;
";

const DERIVED: &str = "\
grammar org.omg.sysml.xtext.SysML with org.omg.kerml.xtext.KerML

@Override
Root : 'part' Name ;
terminal ID : 'x' ;
";

#[test]
fn test_convert_merges_files_in_order() {
    let sources = vec![
        GrammarSource::new("KerML.xtext", BASE),
        GrammarSource::new("SysML.xtext", DERIVED),
    ];
    let conversion = convert(&sources, &ConvertOptions::default()).unwrap();

    assert_eq!(
        conversion.grammar,
        "start: Name\n\n\
         Name: ID\n\n\
         ID: (/[a-z]/)+\n\n\
         Root: \"part\" Name\n\n"
    );
    assert_eq!(
        conversion.warnings,
        vec![ResolveWarning::BlockedByFinal { name: "ID".into() }]
    );
    assert!(conversion.failures.is_empty());
}

#[test]
fn test_failed_file_is_reported_and_skipped() {
    let sources = vec![
        GrammarSource::new("good.xtext", "A: 'a';"),
        GrammarSource::new("bad.xtext", "terminal B: 'bb'..'c';"),
    ];
    let conversion = convert(&sources, &ConvertOptions::default()).unwrap();

    assert_eq!(conversion.grammar, "start: A\n\nA: \"a\"\n\n");
    assert_eq!(conversion.failures.len(), 1);
    assert_eq!(conversion.failures[0].name, "bad.xtext");
    assert!(matches!(
        conversion.failures[0].error.root_cause(),
        TransformError::SingleCharacter { .. }
    ));
}

#[test]
fn test_no_rules_is_an_error() {
    let sources = vec![GrammarSource::new("bad.xtext", "A: (")];
    let err = convert(&sources, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, ConvertError::NoRules { failed: 1, total: 1 }));
}

#[test]
fn test_no_rules_counts_files_without_rule_statements() {
    let sources = vec![
        GrammarSource::new("header.xtext", "grammar org.example.Header\n"),
        GrammarSource::new("bad.xtext", "A: ("),
    ];
    let err = convert(&sources, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, ConvertError::NoRules { failed: 1, total: 2 }));
    assert_eq!(
        err.to_string(),
        "no rules to convert: 2 file(s) given, 1 failed to transform, 1 declared no rule statements"
    );
}

#[test]
fn test_resolve_errors_abort_conversion() {
    let sources = vec![GrammarSource::new("a.xtext", "A: B;")];
    let err = convert(&sources, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        ConvertError::Resolve(ResolveError::UndefinedRuleReference { .. })
    ));
}

#[test]
fn test_sequential_and_parallel_agree() {
    let sources: Vec<_> = (0..16)
        .map(|i| GrammarSource::new(format!("f{i}.xtext"), format!("R{i}: 'r{i}';")))
        .collect();
    let parallel = convert(&sources, &ConvertOptions::default()).unwrap();
    let sequential = convert(
        &sources,
        &ConvertOptions {
            parallel: false,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(parallel.grammar, sequential.grammar);
    assert!(parallel.grammar.starts_with("start: R0\n\nR0: \"r0\"\n\nR1: \"r1\"\n\n"));
}

#[test]
fn test_emit_options_flow_through() {
    let sources = vec![GrammarSource::new("a.xtext", "A: B; B: 'b';")];
    let options = ConvertOptions {
        emit: EmitOptions::default().with_start_rule("B"),
        ..Default::default()
    };
    let conversion = convert(&sources, &options).unwrap();
    assert!(conversion.grammar.starts_with("start: B\n\n"));
}
