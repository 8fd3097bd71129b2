use thiserror::Error;

/// Errors raised while rendering grammar text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmitError {
    /// An expression that has no Lark rendering on its own.
    #[error("unsupported expression shape: {shape}")]
    UnsupportedExpressionShape { shape: String },

    /// A start line was requested but there is no rule to point it at.
    #[error("cannot emit a start rule for an empty rule set")]
    EmptyRuleSet,

    /// Failure while rendering the body of a named rule.
    #[error("in rule `{rule}`: {source}")]
    InRule {
        rule: String,
        #[source]
        source: Box<EmitError>,
    },
}
