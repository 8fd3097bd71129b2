//! Logos-based lexer for Xtext grammar files
//!
//! Fast tokenization using the logos crate.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"\^?[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"'([^'\\]|\\.)*'")]
    #[regex(r#""([^"\\]|\\.)*""#)]
    String,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("::")]
    ColonColon,
    #[token("..")]
    DotDot,
    #[token("+=")]
    PlusEq,
    #[token("?=")]
    QuestionEq,
    #[token("->")]
    Arrow,
    #[token("=>")]
    FatArrow,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("=")]
    Eq,
    #[token("|")]
    Pipe,
    #[token("?")]
    Question,
    #[token("+")]
    Plus,
    #[token("*")]
    Star,
    #[token("!")]
    Bang,
    #[token("@")]
    At,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("grammar")]
    GrammarKw,
    #[token("with")]
    WithKw,
    #[token("import")]
    ImportKw,
    #[token("as")]
    AsKw,
    #[token("hidden")]
    HiddenKw,
    #[token("returns")]
    ReturnsKw,
    #[token("terminal")]
    TerminalKw,
    #[token("enum")]
    EnumKw,
    #[token("fragment")]
    FragmentKw,
    #[token("current")]
    CurrentKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            Whitespace => SyntaxKind::WHITESPACE,
            LineComment => SyntaxKind::LINE_COMMENT,
            BlockComment => SyntaxKind::BLOCK_COMMENT,
            Ident => SyntaxKind::IDENT,
            String => SyntaxKind::STRING,
            ColonColon => SyntaxKind::COLON_COLON,
            DotDot => SyntaxKind::DOT_DOT,
            PlusEq => SyntaxKind::PLUS_EQ,
            QuestionEq => SyntaxKind::QUESTION_EQ,
            Arrow => SyntaxKind::ARROW,
            FatArrow => SyntaxKind::FAT_ARROW,
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            Colon => SyntaxKind::COLON,
            Semicolon => SyntaxKind::SEMICOLON,
            Comma => SyntaxKind::COMMA,
            Dot => SyntaxKind::DOT,
            Eq => SyntaxKind::EQ,
            Pipe => SyntaxKind::PIPE,
            Question => SyntaxKind::QUESTION,
            Plus => SyntaxKind::PLUS,
            Star => SyntaxKind::STAR,
            Bang => SyntaxKind::BANG,
            At => SyntaxKind::AT,
            GrammarKw => SyntaxKind::GRAMMAR_KW,
            WithKw => SyntaxKind::WITH_KW,
            ImportKw => SyntaxKind::IMPORT_KW,
            AsKw => SyntaxKind::AS_KW,
            HiddenKw => SyntaxKind::HIDDEN_KW,
            ReturnsKw => SyntaxKind::RETURNS_KW,
            TerminalKw => SyntaxKind::TERMINAL_KW,
            EnumKw => SyntaxKind::ENUM_KW,
            FragmentKw => SyntaxKind::FRAGMENT_KW,
            CurrentKw => SyntaxKind::CURRENT_KW,
        }
    }
}
