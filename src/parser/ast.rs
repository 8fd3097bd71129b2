//! Typed AST wrappers over the untyped rowan CST.
//!
//! Only the entry points the transformer needs are typed here; rule bodies
//! are folded directly over `SyntaxNode` kinds.

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    /// Rule statements in declaration order; header statements are skipped.
    pub fn rules(&self) -> impl Iterator<Item = RuleStatement> + '_ {
        self.0.children().filter_map(RuleStatement::cast)
    }
}

ast_node!(RuleStatement, RULE_STATEMENT);

impl RuleStatement {
    /// The declared rule name, if the statement has one
    pub fn name(&self) -> Option<Name> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::RULE_NAME)
            .and_then(|n| n.children().find_map(Name::cast))
    }
}

ast_node!(Name, NAME);

impl Name {
    pub fn ident(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind() == SyntaxKind::IDENT)
    }

    /// Identifier text with the Xtext keyword escape `^` removed
    pub fn text(&self) -> Option<String> {
        self.ident()
            .map(|t| t.text().strip_prefix('^').unwrap_or(t.text()).to_string())
    }
}
