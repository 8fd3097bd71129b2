//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all node and token kinds in an Xtext grammar tree.
//! Node kinds mirror the grammar-definition constructs the transformer folds.

/// All syntax kinds (tokens and nodes) of the Xtext dialect
///
/// Tokens are leaf nodes (identifiers, strings, punctuation).
/// Nodes are composite (rule statements, alternatives, groups).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,  // Name or ^escaped
    STRING, // 'keyword' or "keyword"

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_PAREN,     // (
    R_PAREN,     // )
    L_BRACE,     // {
    R_BRACE,     // }
    L_BRACKET,   // [
    R_BRACKET,   // ]
    COLON,       // :
    COLON_COLON, // ::
    SEMICOLON,   // ;
    COMMA,       // ,
    DOT,         // .
    DOT_DOT,     // ..
    EQ,          // =
    PLUS_EQ,     // +=
    QUESTION_EQ, // ?=
    PIPE,        // |
    QUESTION,    // ?
    PLUS,        // +
    STAR,        // *
    BANG,        // !
    AT,          // @
    ARROW,       // ->
    FAT_ARROW,   // =>

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    GRAMMAR_KW,
    WITH_KW,
    IMPORT_KW,
    AS_KW,
    HIDDEN_KW,
    RETURNS_KW,
    TERMINAL_KW,
    ENUM_KW,
    FRAGMENT_KW,
    CURRENT_KW,

    // =========================================================================
    // NODES
    // =========================================================================
    SOURCE_FILE,
    GRAMMAR_DECL,
    IMPORT_DECL,

    RULE_STATEMENT,
    OVERRIDE_DEC,
    FINAL_DEC,
    DEPRECATED_DEC,
    EXPORTED_DEC,
    TERMINAL_MOD,
    ENUM_MOD,
    FRAGMENT_MOD,
    RULE_NAME,
    RETURN_TYPE,
    RULE_BODY,

    // Rule body
    ALTERNATIVE,
    SEQUENCE,
    ITEM,
    RULE_CALL,
    GROUP,
    CARDINALITY,
    NEGATION,
    LITERAL,
    CHAR_RANGE,
    WILDCARD,
    UNTIL,

    // Names and types
    NAME,
    QUALIFIED_NAME,
    DATA_TYPE,
    NAME_RESOLUTION,

    // Assignments and actions
    PROPERTY_ASSIGNMENT,
    NON_PARSING_TYPE,
    NON_PARSING_EQUALS,
    NON_PARSING_LIST,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT)
    }

    /// Rule decorators and modifiers that may precede a rule name
    pub fn is_rule_prefix(self) -> bool {
        matches!(
            self,
            Self::AT | Self::TERMINAL_KW | Self::ENUM_KW | Self::FRAGMENT_KW
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum XtextLanguage {}

impl rowan::Language for XtextLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<XtextLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<XtextLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<XtextLanguage>;
