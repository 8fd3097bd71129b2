pub mod text_utils;

pub use text_utils::{escape_regex, single_character, to_double_quoted, unquote};
