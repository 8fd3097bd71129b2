//! End-to-end conversion: transform every source, resolve, emit.

use super::file_loader::GrammarSource;
use crate::emit::{EmitError, EmitOptions, render_grammar};
use crate::resolve::{ResolveError, ResolveWarning, resolve_rules};
use crate::syntax::Rule;
use crate::transform::{TransformError, transform_file};
use rayon::prelude::*;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// No source contributed a single rule, either because it failed to
    /// transform or because it declares no rule statements.
    #[error(
        "no rules to convert: {total} file(s) given, {failed} failed to transform, {} declared no rule statements",
        .total - .failed
    )]
    NoRules { failed: usize, total: usize },
}

/// Conversion settings
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub emit: EmitOptions,
    /// Transform sources on the rayon thread pool
    pub parallel: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            emit: EmitOptions::default(),
            parallel: true,
        }
    }
}

/// A source file that could not be transformed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub name: String,
    pub error: TransformError,
}

/// Result of a successful conversion
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Lark grammar text
    pub grammar: String,
    /// Redefinitions skipped by the resolver
    pub warnings: Vec<ResolveWarning>,
    /// Files that contributed no rules
    pub failures: Vec<FileFailure>,
}

/// Transform every source, keeping the input order.
///
/// Each element is either the file's rules or the reason the file failed.
pub fn transform_sources(
    sources: &[GrammarSource],
    parallel: bool,
) -> Vec<Result<Vec<Rule>, FileFailure>> {
    let transform_one = |source: &GrammarSource| {
        transform_file(&source.text).map_err(|error| FileFailure {
            name: source.name.clone(),
            error,
        })
    };
    if parallel {
        sources.par_iter().map(transform_one).collect()
    } else {
        sources.iter().map(transform_one).collect()
    }
}

/// Convert grammar sources into a single Lark grammar.
///
/// A source that fails to transform contributes no rules and is reported in
/// [`Conversion::failures`]; the remaining sources are still resolved.
pub fn convert(
    sources: &[GrammarSource],
    options: &ConvertOptions,
) -> Result<Conversion, ConvertError> {
    let mut rules = Vec::new();
    let mut failures = Vec::new();

    for result in transform_sources(sources, options.parallel) {
        match result {
            Ok(file_rules) => rules.extend(file_rules),
            Err(failure) => {
                tracing::warn!("Skipping {}: {}", failure.name, failure.error);
                failures.push(failure);
            }
        }
    }

    if rules.is_empty() && !sources.is_empty() {
        return Err(ConvertError::NoRules {
            failed: failures.len(),
            total: sources.len(),
        });
    }

    tracing::debug!(
        "Transformed {} rule(s) from {} file(s)",
        rules.len(),
        sources.len() - failures.len()
    );

    let resolution = resolve_rules(rules)?;
    let accepted: Vec<Rule> = resolution.rules.into_values().collect();
    let grammar = render_grammar(&accepted, &options.emit)?;

    Ok(Conversion {
        grammar,
        warnings: resolution.warnings,
        failures,
    })
}
