//! Grammar file discovery and loading.

use super::ConvertError;
use std::path::{Path, PathBuf};

/// Extension of Xtext grammar files
pub const XTEXT_EXTENSION: &str = "xtext";

/// One grammar file's text, tagged with where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarSource {
    pub name: String,
    pub text: String,
}

impl GrammarSource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Load a single grammar file.
pub fn load_file(path: &Path) -> Result<GrammarSource, ConvertError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConvertError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(GrammarSource::new(path.display().to_string(), text))
}

/// Load grammar files in the order given.
///
/// Directories are expanded to the `.xtext` files they contain, sorted by
/// path so the processing order is deterministic.
pub fn load_sources<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<GrammarSource>, ConvertError> {
    let mut sources = Vec::new();
    for path in paths {
        let path = path.as_ref();
        if path.is_dir() {
            for file in collect_file_paths(path)? {
                sources.push(load_file(&file)?);
            }
        } else {
            sources.push(load_file(path)?);
        }
    }
    tracing::debug!("Loaded {} grammar file(s)", sources.len());
    Ok(sources)
}

/// Recursively collect `.xtext` files under `dir`, sorted by path.
pub fn collect_file_paths(dir: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    let mut paths = Vec::new();
    collect_recursive(dir, &mut paths)?;
    paths.sort();
    Ok(paths)
}

fn collect_recursive(dir: &Path, results: &mut Vec<PathBuf>) -> Result<(), ConvertError> {
    let read_err = |source| ConvertError::Read {
        path: dir.to_path_buf(),
        source,
    };
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_dir() {
            collect_recursive(&path, results)?;
        } else if has_xtext_extension(&path) {
            results.push(path);
        }
    }
    Ok(())
}

fn has_xtext_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(XTEXT_EXTENSION))
}
