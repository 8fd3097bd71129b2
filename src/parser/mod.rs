//! Rowan-based parser for Xtext grammar definitions
//!
//! This module provides the front end that turns grammar source text into a
//! lossless CST using:
//! - **logos** for lexing
//! - **rowan** for the CST (Concrete Syntax Tree)
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind
//!     ↓
//! Parser → GreenNode tree
//!     ↓
//! SyntaxNode (rowan) → one RULE_STATEMENT subtree per rule
//!     ↓
//! transform → Rule records
//! ```

#[allow(clippy::module_inception)]
mod parser;

pub mod ast;
mod lexer;
mod syntax_kind;

pub use ast::{AstNode, Name, RuleStatement, SourceFile};
pub use lexer::{Lexer, Token, tokenize};
pub use parser::{Parse, SyntaxError, parse_xtext};
pub use syntax_kind::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken, XtextLanguage};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, TextRange, TextSize};

#[cfg(test)]
mod tests;
