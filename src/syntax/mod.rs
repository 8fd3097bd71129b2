//! Grammar data model: rule-body expressions and rule records.

pub mod expression;
pub mod rule;

pub use expression::{
    Cardinality, DataType, Expression, NameResolution, RegularExpression, StructuralError,
};
pub use rule::{ReturnType, Rule, RuleDraft, RuleModifiers};
