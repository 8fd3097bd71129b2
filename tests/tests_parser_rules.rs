//! Parser Tests - Rule Statements
//!
//! Front-end coverage for the Xtext constructs found in the KerML and SysML
//! grammars: every input here must parse without errors and keep the CST
//! lossless.

use rstest::rstest;
use xtext2lark::parser::{AstNode, SourceFile, SyntaxKind, parse_xtext};

/// Helper to check that input parses without errors and round-trips
fn parses_cleanly(input: &str) -> bool {
    let parsed = parse_xtext(input);
    parsed.ok() && parsed.syntax().text().to_string() == input
}

fn rule_count(input: &str) -> usize {
    let parsed = parse_xtext(input);
    SourceFile::cast(parsed.syntax())
        .map(|file| file.rules().count())
        .unwrap_or_default()
}

// ============================================================================
// Rule Headers
// ============================================================================

#[rstest]
#[case("A : 'a' ;")]
#[case("A returns SysML::Element : 'a' ;")]
#[case("A returns ecore::EString : ID ;")]
#[case("Name returns ecore.EString : ID ;")]
#[case("@Override A : 'a' ;")]
#[case("@Final @Deprecated A : 'a' ;")]
#[case("@Exported A : 'a' ;")]
#[case("terminal ID : ('a'..'z')+ ;")]
#[case("terminal fragment DIGIT : '0'..'9' ;")]
#[case("enum VisibilityKind returns SysML::VisibilityKind : public = 'public' | private = 'private' ;")]
#[case("^import : 'import' ;")]
#[case("A hidden(WS, ML_NOTE) : 'a' ;")]
fn test_rule_headers(#[case] input: &str) {
    assert!(parses_cleanly(input), "Failed to parse: {}", input);
    assert_eq!(rule_count(input), 1, "Expected one rule in: {}", input);
}

// ============================================================================
// Rule Bodies
// ============================================================================

#[rstest]
#[case("A : B C D ;")]
#[case("A : B | C | D ;")]
#[case("A : (B | C)* D? E+ ;")]
#[case("A : !('a' | 'b')* ;")]
#[case("A : name = Name ;")]
#[case("A : ownedRelationship += OwnedFeature* ;")]
#[case("A : isAbstract ?= 'abstract' ;")]
#[case("A : op = ('+' | '-') ;")]
#[case("A : type = [SysML::Type | QualifiedName] ;")]
#[case("A : [QualifiedName] ;")]
#[case("A : {SysML::Feature} 'feature' ;")]
#[case("A : B {SysML::OperatorExpression.operand += current} '+' C ;")]
#[case("A : B ({SysML::Chain.first = current} '.' C)* ;")]
#[case("A : => B | -> C ;")]
#[case("terminal ML_NOTE : '//*' -> '*/' ;")]
#[case("terminal SL_NOTE : '//' !('\\n' | '\\r')* ('\\r'? '\\n')? ;")]
#[case("terminal ANY : . ;")]
#[case("terminal X : 'a' . 'b' ;")]
fn test_rule_bodies(#[case] input: &str) {
    assert!(parses_cleanly(input), "Failed to parse: {}", input);
}

// ============================================================================
// Grammar Files
// ============================================================================

#[test]
fn test_header_and_comments() {
    let input = "\
/*
 * KerML textual notation
 */
grammar org.omg.kerml.xtext.KerML with org.omg.kerml.expressions.xtext.KerMLExpressions
hidden(WS, ML_NOTE, SL_NOTE)

import \"https://www.omg.org/spec/SysML/20240201\" as SysML
import \"http://www.eclipse.org/emf/2002/Ecore\" as Ecore

// Namespaces
Namespace returns SysML::Namespace :
    NamespaceDeclaration NamespaceBody
;

NamespaceDeclaration returns SysML::Namespace :
    'namespace' Identification
;
";
    assert!(parses_cleanly(input));
    assert_eq!(rule_count(input), 2);
}

// ============================================================================
// Errors
// ============================================================================

#[rstest]
#[case("A : 'a'")]
#[case("A : ('a' ;")]
#[case("A : [B ;")]
#[case("@Inline A : 'a' ;")]
#[case("A : !  ;")]
#[case("A : {Type.f - current} ;")]
fn test_errors_are_reported(#[case] input: &str) {
    let parsed = parse_xtext(input);
    assert!(!parsed.ok(), "Expected errors for: {}", input);
    assert_eq!(parsed.syntax().text().to_string(), input);
}

#[test]
fn test_error_nodes_are_kept_in_tree() {
    let parsed = parse_xtext("A : 'a' ) ;");
    assert!(!parsed.ok());
    assert!(
        parsed
            .syntax()
            .descendants()
            .any(|n| n.kind() == SyntaxKind::ERROR)
    );
}
