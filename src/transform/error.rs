//! Error types for the tree-to-AST transformation.

use crate::parser::{SyntaxError, SyntaxKind};
use crate::syntax::StructuralError;
use thiserror::Error;

/// Errors that abort the transformation of one rule (and with it, one file).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// Malformed cross reference.
    #[error(transparent)]
    Structural(#[from] StructuralError),

    /// Range or wildcard boundary that is not a single character.
    #[error("boundary literal {literal} must denote exactly one character")]
    SingleCharacter { literal: String },

    /// Rule statement without a name or body.
    #[error("rule is missing required field(s): {}", .fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },

    /// Node kind with no meaning at this position.
    #[error("unexpected {kind:?} node")]
    UnexpectedNode { kind: SyntaxKind },

    /// Wrapper node that does not hold exactly one expression.
    #[error("expected exactly one expression inside {kind:?}, found {found}")]
    Arity { kind: SyntaxKind, found: usize },

    /// The front end reported syntax errors for the file.
    #[error(
        "grammar has {} syntax error(s), first: {}",
        .errors.len(),
        .errors.first().map(ToString::to_string).unwrap_or_default()
    )]
    Syntax { errors: Vec<SyntaxError> },

    /// Failure inside a named rule.
    #[error("in rule `{rule}`: {source}")]
    InRule {
        rule: String,
        #[source]
        source: Box<TransformError>,
    },
}

impl TransformError {
    /// Attach the name of the rule being transformed.
    pub fn in_rule(self, rule: impl Into<String>) -> Self {
        Self::InRule {
            rule: rule.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, without rule context.
    pub fn root_cause(&self) -> &TransformError {
        match self {
            Self::InRule { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
