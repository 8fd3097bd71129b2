pub mod file_loader;
mod pipeline;

pub use file_loader::{GrammarSource, collect_file_paths, load_file, load_sources};
pub use pipeline::{
    ConvertError, ConvertOptions, Conversion, FileFailure, convert, transform_sources,
};

#[cfg(test)]
mod tests;
