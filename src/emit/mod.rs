//! Lark grammar emitter
//!
//! Renders a resolved rule set as Lark grammar text:
//!
//! ```text
//! start: <start rule>
//!
//! <name>: <body>
//!
//! <name>: <body>
//! ```
//!
//! | Expression          | Lark rendering                         |
//! |---------------------|----------------------------------------|
//! | `'abc'`             | `"abc"`                                |
//! | `'a'..'z'`          | `/[a-z]/`                              |
//! | `'a' . 'b'` / `.`   | `/a.b/` / `/./`                        |
//! | `'/*' -> '*/'`      | `/\/\*.*?\*\//s`                       |
//! | `A B`, `A \| B`     | unchanged                              |
//! | `A \| {Action}`     | `(A)?`                                 |
//! | `!(...)?`           | `/[^...]/?` or `!(...)?`               |
//! | `[SysML::T \| Q]`   | `Q`                                    |

mod char_class;
mod error;
mod options;

pub use char_class::negated_char_class;
pub use error::EmitError;
pub use options::EmitOptions;

use crate::core::text_utils::{escape_regex, to_double_quoted};
use crate::syntax::{Expression, RegularExpression, Rule};
use rayon::prelude::*;
use tracing::debug;

/// Rendered text plus whether it is a bare top-level choice (`a | b`).
struct Fragment {
    text: String,
    choice: bool,
}

impl Fragment {
    fn atom(text: String) -> Self {
        Self {
            text,
            choice: false,
        }
    }
}

/// Render one expression.
pub fn render_expression(expr: &Expression) -> Result<String, EmitError> {
    render(expr).map(|fragment| fragment.text)
}

fn render(expr: &Expression) -> Result<Fragment, EmitError> {
    match expr {
        Expression::Literal(text) => Ok(Fragment::atom(to_double_quoted(text))),
        Expression::RegularExpression(regex) => Ok(Fragment::atom(render_regex(regex))),
        Expression::RuleCall(name) => Ok(Fragment::atom(name.to_string())),
        Expression::Sequence(items) => {
            let mut parts = Vec::with_capacity(items.len());
            for item in items {
                let fragment = render(item)?;
                if !fragment.text.is_empty() {
                    parts.push(fragment);
                }
            }
            if parts.len() <= 1 {
                return Ok(parts.pop().unwrap_or_else(|| Fragment::atom(String::new())));
            }
            // `|` binds looser than juxtaposition
            let text = parts
                .into_iter()
                .map(|part| {
                    if part.choice {
                        format!("({})", part.text)
                    } else {
                        part.text
                    }
                })
                .collect::<Vec<_>>()
                .join(" ");
            Ok(Fragment::atom(text))
        }
        Expression::Alternation(branches) => {
            let mut parts = Vec::with_capacity(branches.len());
            let mut has_empty = false;
            for branch in branches {
                let fragment = render(branch)?;
                if fragment.text.is_empty() {
                    has_empty = true;
                } else {
                    parts.push(fragment);
                }
            }
            if parts.is_empty() {
                return Ok(Fragment::atom(String::new()));
            }
            let texts: Vec<String> = parts.iter().map(|part| part.text.clone()).collect();
            if has_empty {
                // An empty branch still matches, so the remaining choice is optional.
                return Ok(Fragment::atom(format!("({})?", texts.join(" | "))));
            }
            if parts.len() == 1 {
                return Ok(parts.remove(0));
            }
            Ok(Fragment {
                text: texts.join(" | "),
                choice: true,
            })
        }
        Expression::Group {
            inner,
            negated,
            cardinality,
        } => {
            if *negated {
                if let Some(class) = negated_char_class(inner, *cardinality) {
                    return Ok(Fragment::atom(class));
                }
            }
            let fragment = render(inner)?;
            if fragment.text.is_empty() || (!*negated && cardinality.is_none()) {
                return Ok(fragment);
            }
            let prefix = if *negated { "!" } else { "" };
            let suffix = cardinality.map(|c| c.symbol()).unwrap_or_default();
            Ok(Fragment::atom(format!("{prefix}({}){suffix}", fragment.text)))
        }
        Expression::DataType(data_type) => Err(EmitError::UnsupportedExpressionShape {
            shape: format!("data type `{data_type}` outside a cross reference"),
        }),
        Expression::NameResolution(resolution) => {
            Ok(Fragment::atom(resolution.rule_call().to_string()))
        }
        Expression::Empty => Ok(Fragment::atom(String::new())),
    }
}

fn render_regex(regex: &RegularExpression) -> String {
    let escape = |c: &char| escape_regex(c.encode_utf8(&mut [0; 4]));
    match regex {
        RegularExpression::Range { start, end } => {
            format!("/[{}-{}]/", escape(start), escape(end))
        }
        RegularExpression::Wildcard {
            bounds: Some((start, end)),
        } => format!("/{}.{}/", escape(start), escape(end)),
        RegularExpression::Wildcard { bounds: None } => "/./".to_string(),
        // `->` stops at the first `end`, across line breaks
        RegularExpression::Until { start, end } => {
            format!("/{}.*?{}/s", escape_regex(start), escape_regex(end))
        }
    }
}

/// Render one rule as `<name>: <body>`.
pub fn render_rule(rule: &Rule) -> Result<String, EmitError> {
    let body = render_expression(&rule.body).map_err(|source| EmitError::InRule {
        rule: rule.name.to_string(),
        source: Box::new(source),
    })?;
    Ok(format!("{}: {}", rule.name, body))
}

/// Render a resolved rule set as a complete Lark grammar.
///
/// Rule bodies are rendered in parallel; the output keeps the order of
/// `rules`.
pub fn render_grammar(rules: &[Rule], options: &EmitOptions) -> Result<String, EmitError> {
    let mut out = String::new();

    if options.emit_start {
        let start = match (&options.start_rule, rules.first()) {
            (Some(name), _) => name.as_str(),
            (None, Some(first)) => first.name.as_str(),
            (None, None) => return Err(EmitError::EmptyRuleSet),
        };
        out.push_str("start: ");
        out.push_str(start);
        out.push_str("\n\n");
    }

    let rendered = rules
        .par_iter()
        .map(render_rule)
        .collect::<Result<Vec<_>, _>>()?;

    for line in &rendered {
        out.push_str(line);
        out.push_str("\n\n");
    }

    debug!(rules = rendered.len(), bytes = out.len(), "rendered grammar");
    Ok(out)
}
