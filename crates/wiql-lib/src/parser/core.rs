//! Parser state machine and low-level operations.

use std::cell::Cell;

use rowan::{TextRange, TextSize};

use super::cst::{KindSet, SyntaxKind};
use super::symbol::{Symbol, SymbolTree, Token};
use crate::Error;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Default limit on parenthesized nesting.
///
/// Fits the stack of a spawned thread (2 MiB), parse and drop included.
pub const DEFAULT_RECURSION_FUEL: u32 = 256;

#[derive(Debug)]
pub struct ParseResult {
    pub tokens: Vec<Token>,
    /// The top-level select, absent when a syntax error stopped the parse.
    pub root: Option<SymbolTree>,
    pub diagnostics: Diagnostics,
}

/// Recursive-descent parser over a lexed token stream.
///
/// Productions return `None` after reporting a syntax error; the caller
/// propagates it with `?`, so parsing stops at the first error.
pub struct Parser {
    pub(super) tokens: Vec<Token>,
    pub(super) pos: usize,
    pub(super) diagnostics: Diagnostics,
    pub(super) depth: u32,
    pub(super) last_diagnostic_pos: Option<TextSize>,
    pub(super) debug_fuel: Cell<u32>,
    recursion_fuel_limit: Option<u32>,
    fatal_error: Option<Error>,
}

impl Parser {
    /// `tokens` must end with the EOF token produced by [`lex`](super::lexer::lex).
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(Token::kind) != Some(SyntaxKind::Eof) {
            let prev = tokens.last().cloned();
            let end = prev.as_ref().map_or(TextSize::from(0), |t| t.span().end());
            let (line, column) = prev
                .as_ref()
                .map_or((1, 1), |t| (t.line(), t.end_column()));
            tokens.push(Token::eof(line, column, prev).at_offset(end));
        }
        Self {
            tokens,
            pos: 0,
            diagnostics: Diagnostics::new(),
            depth: 0,
            last_diagnostic_pos: None,
            debug_fuel: Cell::new(256),
            recursion_fuel_limit: Some(DEFAULT_RECURSION_FUEL),
            fatal_error: None,
        }
    }

    /// Set recursion depth limit. `None` = infinite.
    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_fuel_limit = limit;
        self
    }

    pub fn parse(mut self) -> Result<ParseResult, Error> {
        self.report_lexical_errors();
        let root = self.parse_root();
        if let Some(err) = self.fatal_error {
            return Err(err);
        }
        Ok(ParseResult {
            tokens: self.tokens,
            root,
            diagnostics: self.diagnostics,
        })
    }

    /// Lexical error tokens are reported once, up front.
    fn report_lexical_errors(&mut self) {
        for token in &self.tokens {
            let kind = match token.kind() {
                SyntaxKind::NonterminatingString => DiagnosticKind::UnterminatedString,
                SyntaxKind::UnexpectedToken => DiagnosticKind::UnrecognizedToken,
                _ => continue,
            };
            self.diagnostics
                .report(kind, token.span())
                .message(format!("`{}`", token.text()))
                .emit();
        }
    }

    pub(super) fn has_fatal_error(&self) -> bool {
        self.fatal_error.is_some()
    }

    pub(super) fn current_token(&self) -> &Token {
        self.ensure_progress();
        // `new` guarantees a trailing EOF, and `bump` never moves past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    pub(super) fn current(&self) -> SyntaxKind {
        self.current_token().kind()
    }

    /// LL(k) lookahead. Past the end of the stream everything is EOF.
    pub(super) fn nth(&self, lookahead: usize) -> SyntaxKind {
        self.ensure_progress();
        self.tokens
            .get(self.pos + lookahead)
            .map_or(SyntaxKind::Eof, Token::kind)
    }

    pub(super) fn currently_is(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(super) fn currently_is_one_of(&self, set: KindSet) -> bool {
        set.contains(self.current())
    }

    fn reset_debug_fuel(&self) {
        self.debug_fuel.set(256);
    }

    pub(super) fn bump(&mut self) -> Token {
        self.assert_not_at_eof();
        self.reset_debug_fuel();
        let token = self.tokens[self.pos].clone();
        self.pos += 1;
        token
    }

    pub(super) fn eat(&mut self, kind: SyntaxKind) -> Option<Token> {
        self.currently_is(kind).then(|| self.bump())
    }

    pub(super) fn eat_one_of(&mut self, set: KindSet) -> Option<Token> {
        self.currently_is_one_of(set).then(|| self.bump())
    }

    /// On mismatch: report `kind` at the current token and consume nothing.
    pub(super) fn expect(&mut self, token: SyntaxKind, kind: DiagnosticKind) -> Option<Token> {
        if let Some(t) = self.eat(token) {
            return Some(t);
        }
        self.error(kind);
        None
    }

    /// Like [`expect`](Self::expect), reporting the expected token by name.
    pub(super) fn expect_token(&mut self, token: SyntaxKind) -> Option<Token> {
        if let Some(t) = self.eat(token) {
            return Some(t);
        }
        let what = token.describe();
        let found = self.found();
        self.report_current(
            DiagnosticKind::ExpectedToken,
            format!("expected {}", what),
            format!("{}, found {}", what, found),
        );
        None
    }

    /// Builds a node from matched children.
    ///
    /// A rejected shape is a grammar bug, not a user error: it becomes the
    /// fatal [`Error::MalformedProduction`].
    pub(super) fn node(&mut self, kind: SyntaxKind, children: Vec<Symbol>) -> Option<SymbolTree> {
        match SymbolTree::new(kind, children) {
            Ok(tree) => Some(tree),
            Err(err) => {
                if self.fatal_error.is_none() {
                    self.fatal_error = Some(Error::MalformedProduction(err));
                }
                None
            }
        }
    }

    /// Folds the elements of a list right to left into a linked chain of `kind`.
    ///
    /// Every element but the last ends with its separator token; the folded
    /// tail is appended after it.
    pub(super) fn chain(
        &mut self,
        kind: SyntaxKind,
        elements: Vec<Vec<Symbol>>,
    ) -> Option<SymbolTree> {
        let mut tail: Option<SymbolTree> = None;
        for mut children in elements.into_iter().rev() {
            if let Some(rest) = tail.take() {
                children.push(rest.into());
            }
            tail = Some(self.node(kind, children)?);
        }
        tail
    }

    /// Runs a production one level deeper, failing fatally when out of fuel.
    pub(super) fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        if !self.enter_recursion() {
            return None;
        }
        let result = f(self);
        self.exit_recursion();
        result
    }

    fn enter_recursion(&mut self) -> bool {
        if let Some(limit) = self.recursion_fuel_limit
            && self.depth >= limit
        {
            if self.fatal_error.is_none() {
                self.fatal_error = Some(Error::RecursionLimitExceeded);
            }
            return false;
        }
        self.depth += 1;
        self.reset_debug_fuel();
        true
    }

    fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.reset_debug_fuel();
    }

    fn should_report(&mut self, pos: TextSize) -> bool {
        if self.has_fatal_error() || self.last_diagnostic_pos == Some(pos) {
            return false;
        }
        self.last_diagnostic_pos = Some(pos);
        true
    }

    /// Where input ran out: the end of the token before EOF.
    pub(super) fn eof_range(&self) -> TextRange {
        let end = self
            .tokens
            .last()
            .and_then(Token::prev)
            .map_or(TextSize::from(0), |t| t.span().end());
        TextRange::empty(end)
    }

    /// The current token as shown in messages.
    pub(super) fn found(&self) -> String {
        let token = self.current_token();
        match token.kind() {
            SyntaxKind::Eof => token.kind().describe(),
            kind if kind.is_keyword() => kind.describe(),
            _ => format!("`{}`", token.text()),
        }
    }

    /// Reports at the current token.
    ///
    /// At EOF the diagnostic becomes `UnexpectedEof` carrying `expected`.
    /// Lexical error tokens were reported up front and stay silent here.
    fn report_current(&mut self, kind: DiagnosticKind, expected: String, detail: String) {
        let current = self.current();
        if current.is_error() {
            return;
        }
        if current == SyntaxKind::Eof {
            let range = self.eof_range();
            if self.should_report(range.start()) {
                self.diagnostics
                    .report(DiagnosticKind::UnexpectedEof, range)
                    .message(expected)
                    .emit();
            }
            return;
        }
        let range = self.current_token().span();
        if self.should_report(range.start()) {
            self.diagnostics.report(kind, range).message(detail).emit();
        }
    }

    pub(super) fn error(&mut self, kind: DiagnosticKind) {
        let found = format!("found {}", self.found());
        self.report_current(kind, kind.fallback_message().to_string(), found);
    }

    /// Reports from the current token to the last real token.
    pub(super) fn error_trailing_input(&mut self) {
        let current = self.current_token();
        if current.kind().is_error() {
            return;
        }
        let start = current.span();
        let end = self
            .tokens
            .last()
            .and_then(Token::prev)
            .map_or(start, Token::span);
        let found = self.found();
        if self.should_report(start.start()) {
            self.diagnostics
                .report(DiagnosticKind::TrailingInput, start.cover(end))
                .message(format!("found {}", found))
                .emit();
        }
    }

    /// Consumes `)` closing the group opened at `open`.
    pub(super) fn close_paren(&mut self, open: TextRange) -> Option<Token> {
        if let Some(t) = self.eat(SyntaxKind::RParen) {
            return Some(t);
        }
        match self.current() {
            kind if kind.is_error() => {}
            SyntaxKind::Eof => {
                let range = TextRange::new(open.start(), self.eof_range().end());
                if self.should_report(range.start()) {
                    self.diagnostics
                        .report(DiagnosticKind::UnclosedParen, range)
                        .related_to("`(` opened here", open)
                        .emit();
                }
            }
            _ => {
                let range = self.current_token().span();
                let detail = format!("`)`, found {}", self.found());
                if self.should_report(range.start()) {
                    self.diagnostics
                        .report(DiagnosticKind::ExpectedToken, range)
                        .message(detail)
                        .related_to("`(` opened here", open)
                        .emit();
                }
            }
        }
        None
    }
}
