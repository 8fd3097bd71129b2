//! # xtext2lark
//!
//! Converts Xtext grammar definitions (as used for KerML and SysML) into
//! grammars for the Lark parser generator.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project   → File loading, parallel per-file transform, convert()
//!   ↓
//! emit      → Lark text rendering, negated character classes
//!   ↓
//! resolve   → @Override / @Final handling, undefined reference check
//!   ↓
//! transform → CST rule statements → Rule records
//!   ↓
//! syntax    → Expression AST, Rule records
//!   ↓
//! parser    → Logos lexer, recursive-descent parser, rowan CST
//!   ↓
//! core      → Quoting and regex escaping helpers
//! ```
//!
//! ## Example
//!
//! ```
//! use xtext2lark::{ConvertOptions, GrammarSource, convert};
//!
//! let source = GrammarSource::new("Demo.xtext", "Root: 'a' Tail*; Tail: !('x' | 'y');");
//! let conversion = convert(&[source], &ConvertOptions::default()).unwrap();
//! assert_eq!(
//!     conversion.grammar,
//!     "start: Root\n\nRoot: \"a\" (Tail)*\n\nTail: /[^xy]/\n\n"
//! );
//! ```

// ============================================================================
// MODULES (dependency order: core → parser → syntax → transform → resolve → emit → project)
// ============================================================================

/// Quoting and escaping helpers
pub mod core;

/// Parser: Logos lexer, recursive-descent parser, rowan CST
pub mod parser;

/// Syntax: expression AST and rule records
pub mod syntax;

/// Tree-to-AST transformer
pub mod transform;

/// Rule-set resolution
pub mod resolve;

/// Lark grammar emitter
pub mod emit;

/// File loading and the end-to-end conversion pipeline
pub mod project;

// Re-export commonly needed items
pub use emit::{EmitError, EmitOptions, render_expression, render_grammar};
pub use parser::{Parse, SyntaxKind, SyntaxNode, parse_xtext};
pub use project::{ConvertError, ConvertOptions, Conversion, GrammarSource, convert};
pub use resolve::{Resolution, ResolveError, ResolveWarning, resolve_rules};
pub use syntax::{Cardinality, Expression, Rule};
pub use transform::{TransformError, transform_file};
