//! Negated-literal character classes
//!
//! Lark has no negation operator, so a negated group built only from
//! literals and terminal constructs is rewritten to a negated character
//! class:
//!
//! ```text
//! !('a' | 'b')*      →  /[^ab]/*
//! !('\n' | '\r')     →  /[^\n\r]/
//! !('0'..'9')        →  /[^0-9]/
//! ```
//!
//! Characters are collected in depth-first order without de-duplication or
//! range folding.

use crate::core::text_utils::{escape_regex, unquote};
use crate::syntax::{Cardinality, Expression};

/// Render `!inner` as a negated character class, if every leaf of `inner`
/// is a literal or a regular expression.
pub fn negated_char_class(inner: &Expression, cardinality: Option<Cardinality>) -> Option<String> {
    let mut run = String::new();
    collect_run(inner, &mut run)?;
    if run.is_empty() {
        return None;
    }
    let suffix = cardinality.map(Cardinality::symbol).unwrap_or_default();
    Some(format!("/[^{run}]/{suffix}"))
}

fn collect_run(expr: &Expression, run: &mut String) -> Option<()> {
    match expr {
        Expression::Literal(text) => run.push_str(&escape_regex(unquote(text))),
        Expression::RegularExpression(regex) => run.push_str(&escape_regex(&regex.pattern())),
        Expression::Sequence(items) | Expression::Alternation(items) => {
            for item in items {
                collect_run(item, run)?;
            }
        }
        Expression::Group { inner, .. } => collect_run(inner, run)?,
        Expression::RuleCall(_)
        | Expression::DataType(_)
        | Expression::NameResolution(_)
        | Expression::Empty => return None,
    }
    Some(())
}
