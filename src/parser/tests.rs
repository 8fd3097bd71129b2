use super::*;

fn parse_ok(input: &str) -> SyntaxNode {
    let parse = parse_xtext(input);
    assert!(parse.ok(), "unexpected errors: {:?}\nInput: {}", parse.errors, input);
    parse.syntax()
}

fn first_rule(input: &str) -> SyntaxNode {
    let root = parse_ok(input);
    root.children()
        .find(|n| n.kind() == SyntaxKind::RULE_STATEMENT)
        .expect("no rule statement")
}

fn has_descendant(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    node.descendants().any(|n| n.kind() == kind)
}

#[test]
fn test_parse_is_lossless() {
    let input = "grammar a.b.C with x.Y\n\n// rule\nA : 'a' B? ;\nB: 'b';\n";
    let parse = parse_xtext(input);
    assert_eq!(parse.syntax().text().to_string(), input);
}

#[test]
fn test_header_statements_are_skipped_by_rules() {
    let root = parse_ok(
        "grammar org.omg.kerml.xtext.KerML with org.omg.kerml.expressions.xtext.KerMLExpressions\n\
         hidden(WS, ML_NOTE, SL_NOTE)\n\
         import \"https://www.omg.org/spec/SysML/20240201\" as SysML\n\
         Root : 'x' ;",
    );
    let file = SourceFile::cast(root.clone()).unwrap();
    assert_eq!(file.rules().count(), 1);
    assert!(has_descendant(&root, SyntaxKind::GRAMMAR_DECL));
    assert!(has_descendant(&root, SyntaxKind::IMPORT_DECL));
}

#[test]
fn test_rule_decorators_and_modifiers() {
    let rule = first_rule("@Override @Final terminal fragment DIGIT: '0'..'9';");
    let kinds: Vec<_> = rule.children().map(|n| n.kind()).collect();
    assert!(kinds.contains(&SyntaxKind::OVERRIDE_DEC));
    assert!(kinds.contains(&SyntaxKind::FINAL_DEC));
    assert!(kinds.contains(&SyntaxKind::TERMINAL_MOD));
    assert!(kinds.contains(&SyntaxKind::FRAGMENT_MOD));
    assert!(has_descendant(&rule, SyntaxKind::CHAR_RANGE));
}

#[test]
fn test_unknown_decorator_is_an_error() {
    let parse = parse_xtext("@Inline A: 'a';");
    assert!(!parse.ok());
}

#[test]
fn test_rule_name_and_data_type_return() {
    let rule = first_rule("OwnedExpression returns SysML::Expression : ConditionalExpression ;");
    let stmt = RuleStatement::cast(rule.clone()).unwrap();
    assert_eq!(stmt.name().and_then(|n| n.text()).as_deref(), Some("OwnedExpression"));
    let return_type = rule
        .children()
        .find(|n| n.kind() == SyntaxKind::RETURN_TYPE)
        .unwrap();
    assert!(has_descendant(&return_type, SyntaxKind::DATA_TYPE));
}

#[test]
fn test_bare_return_type_is_qualified_name() {
    let rule = first_rule("Name returns ecore.EString : ID ;");
    let return_type = rule
        .children()
        .find(|n| n.kind() == SyntaxKind::RETURN_TYPE)
        .unwrap();
    assert!(!has_descendant(&return_type, SyntaxKind::DATA_TYPE));
    let qualified = return_type
        .children()
        .find(|n| n.kind() == SyntaxKind::QUALIFIED_NAME)
        .unwrap();
    assert_eq!(
        qualified
            .children()
            .filter(|n| n.kind() == SyntaxKind::NAME)
            .count(),
        2
    );
}

#[test]
fn test_alternatives_and_sequences() {
    let rule = first_rule("A : 'a' B | C 'c' 'd' ;");
    let alternative = rule
        .descendants()
        .find(|n| n.kind() == SyntaxKind::ALTERNATIVE)
        .unwrap();
    let sequences: Vec<_> = alternative
        .children()
        .filter(|n| n.kind() == SyntaxKind::SEQUENCE)
        .collect();
    assert_eq!(sequences.len(), 2);
    assert_eq!(sequences[0].children().count(), 2);
    assert_eq!(sequences[1].children().count(), 3);
}

#[test]
fn test_cardinality_wraps_element_in_group() {
    let rule = first_rule("A : B* ;");
    let group = rule
        .descendants()
        .find(|n| n.kind() == SyntaxKind::GROUP)
        .unwrap();
    let kinds: Vec<_> = group.children().map(|n| n.kind()).collect();
    assert_eq!(kinds, vec![SyntaxKind::RULE_CALL, SyntaxKind::CARDINALITY]);
}

#[test]
fn test_negated_parenthesized_group_is_one_group() {
    let rule = first_rule("terminal SL: !('\\n' | '\\r')* ;");
    let groups: Vec<_> = rule
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::GROUP)
        .collect();
    assert_eq!(groups.len(), 1);
    let kinds: Vec<_> = groups[0].children().map(|n| n.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::NEGATION,
            SyntaxKind::ALTERNATIVE,
            SyntaxKind::CARDINALITY
        ]
    );
}

#[test]
fn test_assignments() {
    let rule = first_rule("A : name = ID items += Item* isAbstract ?= 'abstract' ;");
    let assignments: Vec<_> = rule
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::PROPERTY_ASSIGNMENT)
        .collect();
    assert_eq!(assignments.len(), 3);
    // cardinality applies to the whole assignment
    let group = assignments[1].parent().unwrap();
    assert_eq!(group.kind(), SyntaxKind::GROUP);
}

#[test]
fn test_name_resolution() {
    let rule = first_rule("A : type = [SysML::Type | QualifiedName] ;");
    let resolution = rule
        .descendants()
        .find(|n| n.kind() == SyntaxKind::NAME_RESOLUTION)
        .unwrap();
    let kinds: Vec<_> = resolution.children().map(|n| n.kind()).collect();
    assert_eq!(kinds, vec![SyntaxKind::DATA_TYPE, SyntaxKind::RULE_CALL]);
}

#[test]
fn test_actions() {
    let rule = first_rule(
        "A : {SysML::OperatorExpression} B \
         ( {SysML::OperatorExpression.operand += current} 'x' \
         | {Tree.left = current} 'y' ) ;",
    );
    assert!(has_descendant(&rule, SyntaxKind::NON_PARSING_TYPE));
    assert!(has_descendant(&rule, SyntaxKind::NON_PARSING_LIST));
    assert!(has_descendant(&rule, SyntaxKind::NON_PARSING_EQUALS));
}

#[test]
fn test_terminal_constructs() {
    let rule = first_rule("terminal T : '/*' -> '*/' | 'a' . 'b' | . ;");
    assert!(has_descendant(&rule, SyntaxKind::UNTIL));
    let wildcards = rule
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::WILDCARD)
        .count();
    assert_eq!(wildcards, 2);
}

#[test]
fn test_predicates_are_kept_inside_items() {
    let rule = first_rule("A : => B -> C ;");
    let items = rule
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::ITEM)
        .count();
    assert_eq!(items, 2);
}

#[test]
fn test_missing_semicolon_recovers() {
    let parse = parse_xtext("A : 'a'\nB : 'b' ;");
    assert!(!parse.ok());
}

#[test]
fn test_unbalanced_group_reports_error() {
    let parse = parse_xtext("A : ('a' | 'b' ;");
    assert!(!parse.ok());
}
