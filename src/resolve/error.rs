//! Resolver errors and warnings.

use smol_str::SmolStr;
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

fn join(names: &BTreeSet<SmolStr>) -> String {
    names.iter().map(SmolStr::as_str).collect::<Vec<_>>().join(", ")
}

/// Failures that abort resolution of the whole rule set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A second `@Final` definition of an already finalized rule.
    #[error("rule `{name}` is finalized more than once")]
    DuplicateFinalization { name: SmolStr },

    /// Rule calls whose target is never defined.
    #[error("undefined rule reference(s): {}", join(.names))]
    UndefinedRuleReference { names: BTreeSet<SmolStr> },
}

/// A rule definition that was skipped during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolveWarning {
    /// Redefinition of a `@Final` rule
    BlockedByFinal { name: SmolStr },
    /// Redefinition of an `@Override` rule
    BlockedByOverride { name: SmolStr },
}

impl ResolveWarning {
    pub fn name(&self) -> &str {
        match self {
            Self::BlockedByFinal { name } | Self::BlockedByOverride { name } => name.as_str(),
        }
    }
}

impl fmt::Display for ResolveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlockedByFinal { name } => {
                write!(f, "skipping redefinition of final rule `{name}`")
            }
            Self::BlockedByOverride { name } => {
                write!(f, "skipping redefinition of overridden rule `{name}`")
            }
        }
    }
}
