//! Tree-to-AST transformer
//!
//! Reduces each `RULE_STATEMENT` subtree of the CST into a [`Rule`] record.
//! The reduction is a structural fold: every node kind maps to a function
//! from its already-lowered children to an [`Expression`].
//!
//! ```text
//! RULE_STATEMENT
//!   ├─ *_DEC / *_MOD   → RuleModifiers
//!   ├─ RULE_NAME       → name
//!   ├─ RETURN_TYPE     → ReturnType
//!   └─ RULE_BODY       → Expression
//! ```

mod error;

pub use error::TransformError;

use crate::core::text_utils::{single_character, unquote};
use crate::parser::{
    AstNode, Name, RuleStatement, SourceFile, SyntaxKind, SyntaxNode, parse_xtext,
};
use crate::syntax::{
    Cardinality, DataType, Expression, NameResolution, RegularExpression, ReturnType, Rule,
    RuleDraft,
};
use smol_str::SmolStr;
use tracing::{debug, trace};

/// Parse grammar text and transform every rule statement in it.
///
/// Any syntax error fails the whole file, as does the first rule that
/// cannot be transformed.
pub fn transform_file(text: &str) -> Result<Vec<Rule>, TransformError> {
    let parse = parse_xtext(text);
    if !parse.ok() {
        return Err(TransformError::Syntax {
            errors: parse.errors,
        });
    }
    let root = parse.syntax();
    let file = SourceFile::cast(root).ok_or(TransformError::UnexpectedNode {
        kind: SyntaxKind::SOURCE_FILE,
    })?;
    transform_source(&file)
}

/// Transform all rule statements of a parsed file, in declaration order.
pub fn transform_source(file: &SourceFile) -> Result<Vec<Rule>, TransformError> {
    let rules = file
        .rules()
        .map(|stmt| {
            transform_rule(&stmt).map_err(|err| match stmt.name().and_then(|n| n.text()) {
                Some(name) => err.in_rule(name),
                None => err,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    debug!(count = rules.len(), "transformed rule statements");
    Ok(rules)
}

/// Reduce one rule statement to a rule record.
pub fn transform_rule(stmt: &RuleStatement) -> Result<Rule, TransformError> {
    let mut draft = RuleDraft::default();

    for child in stmt.syntax().children() {
        match child.kind() {
            SyntaxKind::OVERRIDE_DEC => draft.modifiers.is_override = true,
            SyntaxKind::FINAL_DEC => draft.modifiers.is_final = true,
            SyntaxKind::DEPRECATED_DEC => draft.modifiers.is_deprecated = true,
            SyntaxKind::EXPORTED_DEC => draft.modifiers.is_exported = true,
            SyntaxKind::TERMINAL_MOD => draft.modifiers.is_terminal = true,
            SyntaxKind::ENUM_MOD => draft.modifiers.is_enum = true,
            SyntaxKind::FRAGMENT_MOD => draft.modifiers.is_fragment = true,
            SyntaxKind::RULE_NAME => {
                let name = child
                    .children()
                    .find_map(Name::cast)
                    .and_then(|n| n.text())
                    .ok_or(TransformError::MissingFields {
                        fields: vec!["name"],
                    })?;
                draft.name = Some(name.into());
            }
            SyntaxKind::RETURN_TYPE => draft.return_type = lower_return_type(&child)?,
            SyntaxKind::RULE_BODY => draft.body = Some(lower(&single_child(&child, &[])?)?),
            kind => return Err(TransformError::UnexpectedNode { kind }),
        }
    }

    let rule = draft
        .finish()
        .map_err(|fields| TransformError::MissingFields { fields })?;
    trace!(rule = %rule.name, "transformed rule");
    Ok(rule)
}

/// Lower one body node to an expression.
fn lower(node: &SyntaxNode) -> Result<Expression, TransformError> {
    match node.kind() {
        SyntaxKind::ALTERNATIVE => Ok(Expression::alternation(lower_children(node)?)),
        SyntaxKind::SEQUENCE => Ok(Expression::sequence(lower_children(node)?)),
        SyntaxKind::ITEM => lower(&single_child(node, &[])?),
        SyntaxKind::GROUP => lower_group(node),
        SyntaxKind::PROPERTY_ASSIGNMENT => lower(&single_child(node, &[SyntaxKind::NAME])?),
        SyntaxKind::RULE_CALL => Ok(Expression::RuleCall(name_of(node)?)),
        SyntaxKind::LITERAL => Ok(Expression::Literal(literal_text(node)?)),
        SyntaxKind::CHAR_RANGE => {
            let (start, end) = boundary_characters(node)?;
            Ok(Expression::RegularExpression(RegularExpression::Range {
                start,
                end,
            }))
        }
        SyntaxKind::WILDCARD => {
            let bounds = if node.children().next().is_some() {
                Some(boundary_characters(node)?)
            } else {
                None
            };
            Ok(Expression::RegularExpression(RegularExpression::Wildcard {
                bounds,
            }))
        }
        SyntaxKind::UNTIL => {
            let (start, end) = boundary_literals(node)?;
            Ok(Expression::RegularExpression(RegularExpression::Until {
                start: unquote(&start).to_string(),
                end: unquote(&end).to_string(),
            }))
        }
        SyntaxKind::DATA_TYPE => Ok(Expression::DataType(lower_data_type(node)?)),
        SyntaxKind::NAME_RESOLUTION => lower_name_resolution(node),
        SyntaxKind::NON_PARSING_TYPE
        | SyntaxKind::NON_PARSING_EQUALS
        | SyntaxKind::NON_PARSING_LIST => Ok(Expression::Empty),
        kind => Err(TransformError::UnexpectedNode { kind }),
    }
}

fn lower_children(node: &SyntaxNode) -> Result<Vec<Expression>, TransformError> {
    node.children().map(|child| lower(&child)).collect()
}

/// The only child node of `node`, ignoring nodes of the `skip` kinds.
fn single_child(node: &SyntaxNode, skip: &[SyntaxKind]) -> Result<SyntaxNode, TransformError> {
    let mut children: Vec<_> = node
        .children()
        .filter(|c| !skip.contains(&c.kind()))
        .collect();
    match children.len() {
        1 => Ok(children.remove(0)),
        found => Err(TransformError::Arity {
            kind: node.kind(),
            found,
        }),
    }
}

/// `!`? inner cardinality?
///
/// A group with neither flag is its inner expression.
fn lower_group(node: &SyntaxNode) -> Result<Expression, TransformError> {
    let negated = node.children().any(|c| c.kind() == SyntaxKind::NEGATION);
    let cardinality = node
        .children()
        .find(|c| c.kind() == SyntaxKind::CARDINALITY)
        .and_then(|c| c.first_token())
        .and_then(|t| Cardinality::from_symbol(t.text()));
    let inner = lower(&single_child(
        node,
        &[SyntaxKind::NEGATION, SyntaxKind::CARDINALITY],
    )?)?;

    if !negated && cardinality.is_none() {
        Ok(inner)
    } else {
        Ok(Expression::group(inner, negated, cardinality))
    }
}

fn lower_name_resolution(node: &SyntaxNode) -> Result<Expression, TransformError> {
    let mut rule_calls = Vec::new();
    let mut data_types = Vec::new();
    for child in node.children() {
        match child.kind() {
            SyntaxKind::RULE_CALL => rule_calls.push(name_of(&child)?),
            SyntaxKind::DATA_TYPE => data_types.push(lower_data_type(&child)?),
            kind => return Err(TransformError::UnexpectedNode { kind }),
        }
    }
    Ok(Expression::NameResolution(NameResolution::new(
        rule_calls, data_types,
    )?))
}

fn lower_return_type(node: &SyntaxNode) -> Result<ReturnType, TransformError> {
    let child = single_child(node, &[])?;
    match child.kind() {
        SyntaxKind::DATA_TYPE => Ok(ReturnType::DataType(lower_data_type(&child)?)),
        SyntaxKind::QUALIFIED_NAME => Ok(ReturnType::Qualified(qualified_segments(&child))),
        kind => Err(TransformError::UnexpectedNode { kind }),
    }
}

/// `Namespace :: QualifiedName`
fn lower_data_type(node: &SyntaxNode) -> Result<DataType, TransformError> {
    let namespace = name_of(node)?;
    let qualified_name = node
        .children()
        .find(|c| c.kind() == SyntaxKind::QUALIFIED_NAME)
        .map(|qn| qualified_segments(&qn))
        .unwrap_or_default();
    Ok(DataType::new(namespace, qualified_name))
}

fn qualified_segments(node: &SyntaxNode) -> Vec<SmolStr> {
    node.children()
        .filter_map(Name::cast)
        .filter_map(|n| n.text())
        .map(SmolStr::from)
        .collect()
}

/// Text of the first NAME child.
fn name_of(node: &SyntaxNode) -> Result<SmolStr, TransformError> {
    node.children()
        .find_map(Name::cast)
        .and_then(|n| n.text())
        .map(SmolStr::from)
        .ok_or(TransformError::UnexpectedNode { kind: node.kind() })
}

fn literal_text(node: &SyntaxNode) -> Result<String, TransformError> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == SyntaxKind::STRING)
        .map(|t| t.text().to_string())
        .ok_or(TransformError::UnexpectedNode { kind: node.kind() })
}

/// The two LITERAL children of a range, wildcard or until node, verbatim.
fn boundary_literals(node: &SyntaxNode) -> Result<(String, String), TransformError> {
    let literals = node
        .children()
        .filter(|c| c.kind() == SyntaxKind::LITERAL)
        .map(|c| literal_text(&c))
        .collect::<Result<Vec<_>, _>>()?;
    match <[String; 2]>::try_from(literals) {
        Ok([start, end]) => Ok((start, end)),
        Err(literals) => Err(TransformError::Arity {
            kind: node.kind(),
            found: literals.len(),
        }),
    }
}

fn boundary_characters(node: &SyntaxNode) -> Result<(char, char), TransformError> {
    let (start, end) = boundary_literals(node)?;
    let single = |literal: String| {
        single_character(&literal).ok_or(TransformError::SingleCharacter { literal })
    };
    Ok((single(start)?, single(end)?))
}
