//! Lexer for WIQL.
//!
//! Produces position-tagged tokens with owned text. Trivia is recognized by the
//! Logos automaton and dropped here, so the parser never sees whitespace.
//!
//! ## Error handling
//!
//! Lexing always completes. Consecutive unrecognized characters are coalesced
//! into a single `UnexpectedToken`; an unclosed string literal becomes a
//! `NonterminatingString`. Both are ordinary tokens that the parser reports.

use std::ops::Range;

use logos::Logos;
use rowan::TextSize;

use super::cst::SyntaxKind;
use super::symbol::Token;

/// Byte offsets of line starts, for 1-based line/column positions.
struct LineIndex<'src> {
    source: &'src str,
    starts: Vec<usize>,
}

impl<'src> LineIndex<'src> {
    fn new(source: &'src str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { source, starts }
    }

    /// Line and character column of a byte offset.
    fn position(&self, offset: usize) -> (u32, u32) {
        let line = self.starts.partition_point(|&start| start <= offset);
        let line_start = self.starts[line - 1];
        let column = self.source[line_start..offset].chars().count() + 1;
        (line as u32, column as u32)
    }

    fn token(&self, kind: SyntaxKind, range: Range<usize>) -> Token {
        let (line, column) = self.position(range.start);
        Token::new(kind, line, column, &self.source[range.clone()])
            .at_offset(TextSize::from(range.start as u32))
    }
}

/// Tokenizes source into a vector of tokens terminated by exactly one EOF.
///
/// The EOF token sits at the end of the source and carries the last real token
/// as `prev`.
pub fn lex(source: &str) -> Vec<Token> {
    let lines = LineIndex::new(source);
    let mut tokens = Vec::new();
    let mut lexer = SyntaxKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                let span = lexer.span();
                if let Some(start) = error_start.take() {
                    tokens.push(lines.token(SyntaxKind::UnexpectedToken, start..span.start));
                }
                if !kind.is_trivia() {
                    tokens.push(lines.token(kind, span));
                }
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(lines.token(SyntaxKind::UnexpectedToken, start..source.len()));
                }
                break;
            }
        }
    }

    let (line, column) = lines.position(source.len());
    let eof = Token::eof(line, column, tokens.last().cloned()).at_offset(TextSize::of(source));
    tokens.push(eof);
    tokens
}
