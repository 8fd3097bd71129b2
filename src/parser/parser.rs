//! Recursive descent parser for Xtext grammar files
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST.

use super::lexer::{Token, tokenize};
use super::syntax_kind::SyntaxKind;
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.range, self.message)
    }
}

/// Parse Xtext grammar source into a CST
pub fn parse_xtext(input: &str) -> Parse {
    let tokens = tokenize(input);
    let mut parser = Parser::new(&tokens);
    parser.parse_source_file();
    parser.finish()
}

/// Tokens that end a sequence inside a rule body
const SEQUENCE_END: &[SyntaxKind] = &[
    SyntaxKind::PIPE,
    SyntaxKind::R_PAREN,
    SyntaxKind::SEMICOLON,
];

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current_kind())
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        // Look ahead, skipping trivia
        let mut idx = self.pos;
        let mut count = 0;
        while idx < self.tokens.len() {
            if !self.tokens[idx].kind.is_trivia() {
                if count == n {
                    return self.tokens[idx].kind;
                }
                count += 1;
            }
            idx += 1;
        }
        SyntaxKind::ERROR
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        if let Some(token) = self.current() {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {:?}, found {:?}", kind, self.current_kind()));
            false
        }
    }

    fn skip_trivia(&mut self) {
        while self.current().map(|t| t.kind.is_trivia()).unwrap_or(false) {
            self.bump();
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = self
            .current()
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .unwrap_or_else(|| {
                let end = self
                    .tokens
                    .last()
                    .map(|t| t.offset + TextSize::of(t.text))
                    .unwrap_or_default();
                TextRange::empty(end)
            });
        self.errors.push(SyntaxError::new(message, range));
    }

    fn error_recover(&mut self, message: impl Into<String>, recovery: &[SyntaxKind]) {
        self.error(message);
        self.builder.start_node(SyntaxKind::ERROR.into());
        // Always consume at least one token to make progress
        let mut consumed = false;
        while !self.at_eof() && !self.at_any(recovery) {
            self.bump();
            consumed = true;
        }
        if !consumed && !self.at_eof() {
            self.bump();
        }
        self.builder.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    fn checkpoint(&self) -> Checkpoint {
        self.builder.checkpoint()
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    // =========================================================================
    // Grammar rules
    // =========================================================================

    /// SourceFile = (GrammarDecl | ImportDecl | RuleStatement)*
    fn parse_source_file(&mut self) {
        self.start_node(SyntaxKind::SOURCE_FILE);

        loop {
            self.skip_trivia();
            if self.at_eof() {
                break;
            }
            let pos_before = self.pos;
            match self.current_kind() {
                SyntaxKind::GRAMMAR_KW => self.parse_grammar_decl(),
                SyntaxKind::IMPORT_KW => self.parse_import_decl(),
                SyntaxKind::IDENT => self.parse_rule_statement(),
                kind if kind.is_rule_prefix() => self.parse_rule_statement(),
                kind => self.error_recover(
                    format!("unexpected token at top level: {:?}", kind),
                    &[SyntaxKind::SEMICOLON],
                ),
            }
            self.eat(SyntaxKind::SEMICOLON);
            if self.pos == pos_before && !self.at_eof() {
                self.error(format!("stuck on token: {:?}", self.current_kind()));
                self.bump();
            }
        }

        self.finish_node();
    }

    /// Whether the upcoming tokens start a rule statement
    fn at_rule_start(&self) -> bool {
        let kind = self.nth(0);
        kind.is_rule_prefix()
            || (kind == SyntaxKind::IDENT
                && matches!(self.nth(1), SyntaxKind::COLON | SyntaxKind::RETURNS_KW))
    }

    /// GrammarDecl = 'grammar' QualifiedName ('with' ...)? ('hidden' '(' ... ')')?
    ///
    /// Header contents are kept in the tree but not interpreted.
    fn parse_grammar_decl(&mut self) {
        self.start_node(SyntaxKind::GRAMMAR_DECL);
        self.expect(SyntaxKind::GRAMMAR_KW);
        loop {
            self.skip_trivia();
            if self.at_eof() || self.at(SyntaxKind::IMPORT_KW) || self.at_rule_start() {
                break;
            }
            self.bump();
        }
        self.finish_node();
    }

    /// ImportDecl = 'import' STRING ('as' IDENT)?
    fn parse_import_decl(&mut self) {
        self.start_node(SyntaxKind::IMPORT_DECL);
        self.expect(SyntaxKind::IMPORT_KW);
        self.skip_trivia();
        self.expect(SyntaxKind::STRING);
        self.skip_trivia();
        if self.eat(SyntaxKind::AS_KW) {
            self.skip_trivia();
            self.expect(SyntaxKind::IDENT);
        }
        self.finish_node();
    }

    /// RuleStatement = Decorator* Modifier* RuleName ReturnType? Hidden? ':' RuleBody ';'
    fn parse_rule_statement(&mut self) {
        self.start_node(SyntaxKind::RULE_STATEMENT);

        while self.at(SyntaxKind::AT) {
            self.parse_decorator();
            self.skip_trivia();
        }

        loop {
            let modifier = match self.current_kind() {
                SyntaxKind::TERMINAL_KW => SyntaxKind::TERMINAL_MOD,
                SyntaxKind::ENUM_KW => SyntaxKind::ENUM_MOD,
                SyntaxKind::FRAGMENT_KW => SyntaxKind::FRAGMENT_MOD,
                _ => break,
            };
            self.start_node(modifier);
            self.bump();
            self.finish_node();
            self.skip_trivia();
        }

        self.start_node(SyntaxKind::RULE_NAME);
        self.parse_name();
        self.finish_node();
        self.skip_trivia();

        if self.at(SyntaxKind::RETURNS_KW) {
            self.start_node(SyntaxKind::RETURN_TYPE);
            self.bump();
            self.skip_trivia();
            self.parse_type_reference(true);
            self.finish_node();
            self.skip_trivia();
        }

        if self.at(SyntaxKind::HIDDEN_KW) {
            self.parse_hidden_clause();
            self.skip_trivia();
        }

        if self.expect(SyntaxKind::COLON) {
            self.skip_trivia();
            self.start_node(SyntaxKind::RULE_BODY);
            self.parse_alternative();
            self.finish_node();
        }

        self.skip_trivia();
        if !self.at(SyntaxKind::SEMICOLON) {
            self.error_recover("expected ';' after rule body", &[SyntaxKind::SEMICOLON]);
        }
        self.expect(SyntaxKind::SEMICOLON);

        self.finish_node();
    }

    /// Decorator = '@' ('Override' | 'Final' | 'Deprecated' | 'Exported')
    fn parse_decorator(&mut self) {
        let kind = match self.tokens.get(self.pos + 1).map(|t| t.text) {
            Some("Override") => SyntaxKind::OVERRIDE_DEC,
            Some("Final") => SyntaxKind::FINAL_DEC,
            Some("Deprecated") => SyntaxKind::DEPRECATED_DEC,
            Some("Exported") => SyntaxKind::EXPORTED_DEC,
            other => {
                let message = format!("unknown rule decorator: @{}", other.unwrap_or(""));
                self.error(message);
                SyntaxKind::ERROR
            }
        };
        self.start_node(kind);
        self.bump(); // @
        self.eat(SyntaxKind::IDENT);
        self.finish_node();
    }

    /// Hidden = 'hidden' '(' (IDENT (',' IDENT)*)? ')'
    fn parse_hidden_clause(&mut self) {
        self.bump(); // hidden
        self.skip_trivia();
        if self.expect(SyntaxKind::L_PAREN) {
            while !self.at_eof() && !self.at(SyntaxKind::R_PAREN) {
                self.bump();
            }
            self.expect(SyntaxKind::R_PAREN);
        }
    }

    /// Name = IDENT
    fn parse_name(&mut self) {
        self.start_node(SyntaxKind::NAME);
        self.expect(SyntaxKind::IDENT);
        self.finish_node();
    }

    /// TypeReference = DataType | QualifiedName
    ///
    /// DataType = Name '::' QualifiedName, where dotted segments are only
    /// accepted when `dotted` is set (return types). Inside actions a dot
    /// separates the type from the assigned feature.
    fn parse_type_reference(&mut self, dotted: bool) {
        let checkpoint = self.checkpoint();
        self.parse_name();
        if self.nth(0) == SyntaxKind::COLON_COLON {
            self.skip_trivia();
            self.bump(); // ::
            self.skip_trivia();
            self.parse_qualified_name(dotted);
            self.start_node_at(checkpoint, SyntaxKind::DATA_TYPE);
            self.finish_node();
        } else {
            while dotted && self.nth(0) == SyntaxKind::DOT && self.nth(1) == SyntaxKind::IDENT {
                self.skip_trivia();
                self.bump();
                self.skip_trivia();
                self.parse_name();
            }
            self.start_node_at(checkpoint, SyntaxKind::QUALIFIED_NAME);
            self.finish_node();
        }
    }

    /// QualifiedName = Name ('.' Name)*
    fn parse_qualified_name(&mut self, dotted: bool) {
        self.start_node(SyntaxKind::QUALIFIED_NAME);
        self.parse_name();
        while dotted && self.nth(0) == SyntaxKind::DOT && self.nth(1) == SyntaxKind::IDENT {
            self.skip_trivia();
            self.bump();
            self.skip_trivia();
            self.parse_name();
        }
        self.finish_node();
    }

    // =========================================================================
    // Rule bodies
    // =========================================================================

    /// Alternative = Sequence ('|' Sequence)*
    fn parse_alternative(&mut self) {
        self.start_node(SyntaxKind::ALTERNATIVE);
        self.parse_sequence();
        loop {
            self.skip_trivia();
            if !self.eat(SyntaxKind::PIPE) {
                break;
            }
            self.skip_trivia();
            self.parse_sequence();
        }
        self.finish_node();
    }

    /// Sequence = Item+
    fn parse_sequence(&mut self) {
        self.start_node(SyntaxKind::SEQUENCE);
        loop {
            self.skip_trivia();
            if self.at_eof() || self.at_any(SEQUENCE_END) {
                break;
            }
            let pos_before = self.pos;
            self.parse_item();
            if self.pos == pos_before {
                self.error_recover(
                    format!("unexpected token in rule body: {:?}", self.current_kind()),
                    SEQUENCE_END,
                );
            }
        }
        self.finish_node();
    }

    /// Item = ('=>' | '->')? Element
    fn parse_item(&mut self) {
        self.start_node(SyntaxKind::ITEM);
        if self.at_any(&[SyntaxKind::FAT_ARROW, SyntaxKind::ARROW]) {
            self.bump();
            self.skip_trivia();
        }
        self.parse_element();
        self.finish_node();
    }

    /// Element = '!'? (ParenthesizedGroup | Assignment | Atom) Cardinality?
    ///
    /// Negated, quantified and parenthesized elements are wrapped in a GROUP.
    fn parse_element(&mut self) {
        let checkpoint = self.checkpoint();

        let negated = self.at(SyntaxKind::BANG);
        if negated {
            self.start_node(SyntaxKind::NEGATION);
            self.bump();
            self.finish_node();
            self.skip_trivia();
        }

        let parenthesized = self.at(SyntaxKind::L_PAREN);
        if parenthesized {
            self.parse_parenthesized();
        } else if self.at(SyntaxKind::IDENT) && self.at_assignment_operator(1) {
            self.parse_assignment();
        } else if !self.parse_atom() {
            if negated {
                self.error("expected element after '!'");
            }
            return;
        }

        let quantified = self.at_cardinality();
        if quantified {
            self.skip_trivia();
            self.start_node(SyntaxKind::CARDINALITY);
            self.bump();
            self.finish_node();
        }

        if negated || parenthesized || quantified {
            self.start_node_at(checkpoint, SyntaxKind::GROUP);
            self.finish_node();
        }
    }

    fn at_assignment_operator(&self, n: usize) -> bool {
        matches!(
            self.nth(n),
            SyntaxKind::EQ | SyntaxKind::PLUS_EQ | SyntaxKind::QUESTION_EQ
        )
    }

    fn at_cardinality(&self) -> bool {
        matches!(
            self.nth(0),
            SyntaxKind::QUESTION | SyntaxKind::PLUS | SyntaxKind::STAR
        )
    }

    /// ParenthesizedGroup = '(' Alternative ')'
    fn parse_parenthesized(&mut self) {
        self.bump(); // (
        self.skip_trivia();
        self.parse_alternative();
        self.skip_trivia();
        self.expect(SyntaxKind::R_PAREN);
    }

    /// Assignment = Name ('=' | '+=' | '?=') AssignableTerminal
    fn parse_assignment(&mut self) {
        self.start_node(SyntaxKind::PROPERTY_ASSIGNMENT);
        self.parse_name();
        self.skip_trivia();
        self.bump(); // = | += | ?=
        self.skip_trivia();
        if self.at(SyntaxKind::L_PAREN) {
            let checkpoint = self.checkpoint();
            self.parse_parenthesized();
            self.start_node_at(checkpoint, SyntaxKind::GROUP);
            self.finish_node();
        } else if !self.parse_atom() {
            self.error("expected assignable terminal");
        }
        self.finish_node();
    }

    /// Atom = Literal | CharRange | Until | Wildcard | RuleCall | NameResolution | Action
    ///
    /// Returns false without consuming anything when no atom starts here.
    fn parse_atom(&mut self) -> bool {
        match self.current_kind() {
            SyntaxKind::STRING => self.parse_literal_or_terminal(),
            SyntaxKind::DOT => {
                self.start_node(SyntaxKind::WILDCARD);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::IDENT => {
                self.start_node(SyntaxKind::RULE_CALL);
                self.parse_name();
                self.finish_node();
            }
            SyntaxKind::L_BRACKET => self.parse_name_resolution(),
            SyntaxKind::L_BRACE => self.parse_action(),
            _ => return false,
        }
        true
    }

    /// Literal, or a terminal construct built from two literals:
    /// `'a'..'z'`, `'a' . 'b'`, `'/*' -> '*/'`
    fn parse_literal_or_terminal(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_literal();

        let construct = match (self.nth(0), self.nth(1)) {
            (SyntaxKind::DOT_DOT, SyntaxKind::STRING) => SyntaxKind::CHAR_RANGE,
            (SyntaxKind::DOT, SyntaxKind::STRING) => SyntaxKind::WILDCARD,
            (SyntaxKind::ARROW, SyntaxKind::STRING) => SyntaxKind::UNTIL,
            _ => return,
        };

        self.skip_trivia();
        self.bump(); // .. | . | ->
        self.skip_trivia();
        self.parse_literal();
        self.start_node_at(checkpoint, construct);
        self.finish_node();
    }

    fn parse_literal(&mut self) {
        self.start_node(SyntaxKind::LITERAL);
        self.expect(SyntaxKind::STRING);
        self.finish_node();
    }

    /// NameResolution = '[' Reference ('|' Reference)* ']'
    ///
    /// Namespace-qualified references become DATA_TYPE, bare names RULE_CALL.
    fn parse_name_resolution(&mut self) {
        self.start_node(SyntaxKind::NAME_RESOLUTION);
        self.bump(); // [
        loop {
            self.skip_trivia();
            if !self.at(SyntaxKind::IDENT) {
                self.error("expected type or rule name in cross reference");
                break;
            }
            if self.nth(1) == SyntaxKind::COLON_COLON {
                self.parse_type_reference(true);
            } else {
                self.start_node(SyntaxKind::RULE_CALL);
                self.parse_name();
                self.finish_node();
            }
            self.skip_trivia();
            if !self.eat(SyntaxKind::PIPE) {
                break;
            }
        }
        self.skip_trivia();
        if !self.eat(SyntaxKind::R_BRACKET) {
            self.error_recover("expected ']'", &[SyntaxKind::R_BRACKET, SyntaxKind::SEMICOLON]);
            self.eat(SyntaxKind::R_BRACKET);
        }
        self.finish_node();
    }

    /// Action = '{' TypeReference ('.' Name ('=' | '+=') 'current')? '}'
    fn parse_action(&mut self) {
        let checkpoint = self.checkpoint();
        self.bump(); // {
        self.skip_trivia();
        self.parse_type_reference(false);

        let mut kind = SyntaxKind::NON_PARSING_TYPE;
        if self.nth(0) == SyntaxKind::DOT {
            self.skip_trivia();
            self.bump();
            self.skip_trivia();
            self.parse_name();
            self.skip_trivia();
            kind = match self.current_kind() {
                SyntaxKind::EQ => SyntaxKind::NON_PARSING_EQUALS,
                SyntaxKind::PLUS_EQ => SyntaxKind::NON_PARSING_LIST,
                other => {
                    self.error(format!("expected '=' or '+=' in action, found {:?}", other));
                    SyntaxKind::NON_PARSING_EQUALS
                }
            };
            self.bump();
            self.skip_trivia();
            self.expect(SyntaxKind::CURRENT_KW);
        }

        self.skip_trivia();
        if !self.eat(SyntaxKind::R_BRACE) {
            self.error_recover("expected '}'", &[SyntaxKind::R_BRACE, SyntaxKind::SEMICOLON]);
            self.eat(SyntaxKind::R_BRACE);
        }
        self.start_node_at(checkpoint, kind);
        self.finish_node();
    }
}
