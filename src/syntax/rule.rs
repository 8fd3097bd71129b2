//! Grammar rule records.

use super::expression::{DataType, Expression};
use smol_str::SmolStr;

/// Boolean rule modifiers set by decorators and rule-kind keywords
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RuleModifiers {
    pub is_override: bool,
    pub is_final: bool,
    pub is_deprecated: bool,
    pub is_exported: bool,
    pub is_terminal: bool,
    pub is_enum: bool,
    pub is_fragment: bool,
}

/// What a rule produces
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ReturnType {
    /// No `returns` clause: the rule's own name
    #[default]
    SameAsRuleName,
    /// `returns a.b.C`
    Qualified(Vec<SmolStr>),
    /// `returns SysML::Element`
    DataType(DataType),
}

/// One grammar rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub name: SmolStr,
    pub body: Expression,
    pub modifiers: RuleModifiers,
    pub return_type: ReturnType,
}

impl Rule {
    pub fn new(name: impl Into<SmolStr>, body: Expression) -> Self {
        Self {
            name: name.into(),
            body,
            modifiers: RuleModifiers::default(),
            return_type: ReturnType::default(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: RuleModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_return_type(mut self, return_type: ReturnType) -> Self {
        self.return_type = return_type;
        self
    }

    pub fn is_final(&self) -> bool {
        self.modifiers.is_final
    }

    pub fn is_override(&self) -> bool {
        self.modifiers.is_override
    }
}

/// A rule whose required fields are filled in while one rule statement is
/// folded. Each field may be set once; [`RuleDraft::finish`] checks that
/// everything required is present.
#[derive(Debug, Default)]
pub struct RuleDraft {
    pub name: Option<SmolStr>,
    pub body: Option<Expression>,
    pub modifiers: RuleModifiers,
    pub return_type: ReturnType,
}

impl RuleDraft {
    /// Whether every required field has been set
    pub fn is_complete(&self) -> bool {
        self.name.is_some() && self.body.is_some()
    }

    /// Names of the required fields that are still unset
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.is_none() {
            missing.push("name");
        }
        if self.body.is_none() {
            missing.push("body");
        }
        missing
    }

    /// Turn the draft into a rule, or report the missing required fields
    pub fn finish(self) -> Result<Rule, Vec<&'static str>> {
        let missing = self.missing_fields();
        match (self.name, self.body) {
            (Some(name), Some(body)) => Ok(Rule {
                name,
                body,
                modifiers: self.modifiers,
                return_type: self.return_type,
            }),
            _ => Err(missing),
        }
    }
}
