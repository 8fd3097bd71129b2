//! Rule-set resolution
//!
//! Turns the concatenated, declaration-ordered rule records of all grammar
//! files into the final rule set. Resolution is order-sensitive:
//!
//! - a `@Final` rule blocks every later definition of its name, and a second
//!   `@Final` definition of that name is an error;
//! - an `@Override` rule replaces the earlier definition and blocks every
//!   later one;
//! - a plain redefinition replaces the earlier definition;
//! - a replacing rule takes its own declaration position.
//!
//! Once all rules are accepted, every rule call must target a defined rule.

mod error;

pub use error::{ResolveError, ResolveWarning};

use crate::syntax::Rule;
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// The accepted rule set plus the redefinitions that were skipped.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub rules: IndexMap<SmolStr, Rule>,
    pub warnings: Vec<ResolveWarning>,
}

impl Resolution {
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    /// Accepted rules in rule-set order
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    pub fn into_rules(self) -> Vec<Rule> {
        self.rules.into_values().collect()
    }
}

/// Single-pass resolver state.
#[derive(Debug, Default)]
struct Resolver {
    defined: FxHashSet<SmolStr>,
    used: FxHashSet<SmolStr>,
    finalized: FxHashSet<SmolStr>,
    overridden: FxHashSet<SmolStr>,
    accepted: IndexMap<SmolStr, Rule>,
    warnings: Vec<ResolveWarning>,
}

impl Resolver {
    fn visit(&mut self, rule: Rule) -> Result<(), ResolveError> {
        if self.finalized.contains(&rule.name) {
            if rule.is_final() {
                return Err(ResolveError::DuplicateFinalization { name: rule.name });
            }
            self.skip(ResolveWarning::BlockedByFinal { name: rule.name });
            return Ok(());
        }
        if self.overridden.contains(&rule.name) {
            self.skip(ResolveWarning::BlockedByOverride { name: rule.name });
            return Ok(());
        }

        self.defined.insert(rule.name.clone());
        self.used
            .extend(rule.body.rule_calls().into_iter().map(SmolStr::from));

        if rule.is_final() {
            self.finalized.insert(rule.name.clone());
        }
        if rule.is_override() {
            self.overridden.insert(rule.name.clone());
        }
        // Any accepted definition is replaced; the new one takes its own position.
        if self.accepted.shift_remove(&rule.name).is_some() {
            debug!(rule = %rule.name, "replaced earlier definition");
        }
        self.accepted.insert(rule.name.clone(), rule);
        Ok(())
    }

    fn skip(&mut self, warning: ResolveWarning) {
        warn!("{warning}");
        self.warnings.push(warning);
    }

    fn finish(self) -> Result<Resolution, ResolveError> {
        let undefined: BTreeSet<SmolStr> = self.used.difference(&self.defined).cloned().collect();
        if !undefined.is_empty() {
            return Err(ResolveError::UndefinedRuleReference { names: undefined });
        }

        debug!(
            accepted = self.accepted.len(),
            skipped = self.warnings.len(),
            "resolved rule set"
        );
        Ok(Resolution {
            rules: self.accepted,
            warnings: self.warnings,
        })
    }
}

/// Resolve declaration-ordered rule records into the final rule set.
pub fn resolve_rules(rules: impl IntoIterator<Item = Rule>) -> Result<Resolution, ResolveError> {
    let mut resolver = Resolver::default();
    for rule in rules {
        resolver.visit(rule)?;
    }
    resolver.finish()
}

#[cfg(test)]
mod tests;
