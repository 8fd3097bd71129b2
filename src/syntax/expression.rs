//! Expression AST for rule bodies.

use smol_str::SmolStr;
use std::fmt;
use thiserror::Error;

/// Quantifier on a grouped sub-expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// `?`
    Optional,
    /// `+`
    AtLeastOne,
    /// `*`
    ZeroOrMore,
}

impl Cardinality {
    /// Map a cardinality token to its kind
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "?" => Some(Self::Optional),
            "+" => Some(Self::AtLeastOne),
            "*" => Some(Self::ZeroOrMore),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Optional => "?",
            Self::AtLeastOne => "+",
            Self::ZeroOrMore => "*",
        }
    }
}

/// A terminal construct lowered to a regular expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegularExpression {
    /// `'a'..'z'`
    Range { start: char, end: char },
    /// `'a' . 'b'`, or a bare `.` when `bounds` is `None`
    Wildcard { bounds: Option<(char, char)> },
    /// `'/*' -> '*/'`
    Until { start: String, end: String },
}

impl RegularExpression {
    /// The intermediate, unescaped pattern fragment
    pub fn pattern(&self) -> String {
        match self {
            Self::Range { start, end } => format!("{start}-{end}"),
            Self::Wildcard { bounds: Some((start, end)) } => format!("{start}.{end}"),
            Self::Wildcard { bounds: None } => ".".to_string(),
            Self::Until { start, end } => format!("{start}.*{end}"),
        }
    }
}

/// `Namespace::Qualified.Name` type reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataType {
    pub namespace: SmolStr,
    pub qualified_name: Vec<SmolStr>,
}

impl DataType {
    pub fn new(namespace: impl Into<SmolStr>, qualified_name: Vec<SmolStr>) -> Self {
        Self {
            namespace: namespace.into(),
            qualified_name,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.namespace, self.qualified_name.join("."))
    }
}

/// Malformed input detected while building an expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error(
        "cross reference needs exactly one rule call and at most one data type, \
         found {rule_calls} rule call(s) and {data_types} data type(s)"
    )]
    NameResolution { rule_calls: usize, data_types: usize },
}

/// Cross reference `[DataType | RuleCall]`
///
/// Holds exactly one rule call and at most one data type; the only way to
/// build one is [`NameResolution::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameResolution {
    rule_call: SmolStr,
    data_type: Option<DataType>,
}

impl NameResolution {
    pub fn new(
        mut rule_calls: Vec<SmolStr>,
        mut data_types: Vec<DataType>,
    ) -> Result<Self, StructuralError> {
        if rule_calls.len() != 1 || data_types.len() > 1 {
            return Err(StructuralError::NameResolution {
                rule_calls: rule_calls.len(),
                data_types: data_types.len(),
            });
        }
        Ok(Self {
            rule_call: rule_calls.swap_remove(0),
            data_type: data_types.pop(),
        })
    }

    pub fn rule_call(&self) -> &str {
        &self.rule_call
    }

    pub fn data_type(&self) -> Option<&DataType> {
        self.data_type.as_ref()
    }
}

/// A rule body expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    /// Keyword literal, verbatim including its quotes
    Literal(String),
    RegularExpression(RegularExpression),
    /// Reference to another rule by name, unresolved
    RuleCall(SmolStr),
    Sequence(Vec<Expression>),
    Alternation(Vec<Expression>),
    Group {
        inner: Box<Expression>,
        negated: bool,
        cardinality: Option<Cardinality>,
    },
    DataType(DataType),
    NameResolution(NameResolution),
    /// Parses but produces no grammar text (Xtext actions)
    Empty,
}

impl Expression {
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    pub fn rule_call(name: impl Into<SmolStr>) -> Self {
        Self::RuleCall(name.into())
    }

    pub fn group(inner: Expression, negated: bool, cardinality: Option<Cardinality>) -> Self {
        Self::Group {
            inner: Box::new(inner),
            negated,
            cardinality,
        }
    }

    /// Sequence that collapses to its only item
    pub fn sequence(mut items: Vec<Expression>) -> Self {
        match items.len() {
            0 => Self::Empty,
            1 => items.remove(0),
            _ => Self::Sequence(items),
        }
    }

    /// Alternation that collapses to its only branch
    pub fn alternation(mut branches: Vec<Expression>) -> Self {
        match branches.len() {
            0 => Self::Empty,
            1 => branches.remove(0),
            _ => Self::Alternation(branches),
        }
    }

    /// Every rule-call target in this expression, depth-first
    pub fn rule_calls(&self) -> Vec<&str> {
        let mut calls = Vec::new();
        self.collect_rule_calls(&mut calls);
        calls
    }

    fn collect_rule_calls<'a>(&'a self, calls: &mut Vec<&'a str>) {
        match self {
            Self::RuleCall(name) => calls.push(name.as_str()),
            Self::NameResolution(resolution) => calls.push(resolution.rule_call()),
            Self::Sequence(items) | Self::Alternation(items) => {
                for item in items {
                    item.collect_rule_calls(calls);
                }
            }
            Self::Group { inner, .. } => inner.collect_rule_calls(calls),
            Self::Literal(_) | Self::RegularExpression(_) | Self::DataType(_) | Self::Empty => {}
        }
    }
}
