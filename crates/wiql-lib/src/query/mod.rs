//! Query facade.
//!
//! Stages: lex → parse → (optional) field validation.
//! Each stage keeps its own diagnostics. Use `is_valid()` to check
//! if any stage produced errors.

mod dump;
mod printer;
mod validate;

pub use printer::format_select;

#[cfg(test)]
mod validate_tests;

use crate::diagnostics::Diagnostics;
use crate::parser::ast::Select;
use crate::parser::{DEFAULT_RECURSION_FUEL, ParseResult, Parser, SymbolTree, Token, lex};
use crate::{Error, Result};

/// Configures and runs the parse of one query.
#[derive(Debug, Clone)]
pub struct QueryBuilder<'a> {
    source: &'a str,
    recursion_fuel: Option<u32>,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            recursion_fuel: Some(DEFAULT_RECURSION_FUEL),
        }
    }

    /// Set recursion depth limit. None = infinite.
    ///
    /// Recursion fuel restores when exiting recursion. It protects against
    /// deeply nested expressions and very long lists.
    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_fuel = limit;
        self
    }

    /// Returns `Err` only on fatal failures; syntax errors are diagnostics.
    pub fn build(self) -> Result<Query<'a>> {
        let ParseResult {
            tokens,
            root,
            diagnostics,
        } = Parser::new(lex(self.source))
            .with_recursion_fuel(self.recursion_fuel)
            .parse()?;

        Ok(Query {
            source: self.source,
            tokens,
            root,
            parse_diagnostics: diagnostics,
            validate_diagnostics: Diagnostics::new(),
        })
    }
}

/// A parsed query.
///
/// Check [`is_valid`](Self::is_valid) or [`diagnostics`](Self::diagnostics)
/// to determine if the query has syntax or field issues.
#[derive(Debug, Clone)]
pub struct Query<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    root: Option<SymbolTree>,
    parse_diagnostics: Diagnostics,
    validate_diagnostics: Diagnostics,
}

impl<'a> Query<'a> {
    pub fn parse(source: &'a str) -> Result<Self> {
        QueryBuilder::new(source).build()
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// The full token stream, EOF included.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The top-level select node, absent after a syntax error.
    pub fn root(&self) -> Option<&SymbolTree> {
        self.root.as_ref()
    }

    pub fn select(&self) -> Option<Select<'_>> {
        self.root.as_ref().and_then(Select::cast)
    }

    /// All diagnostics combined from all stages.
    ///
    /// Of several reports starting at the same offset only the
    /// highest-priority one is kept.
    pub fn diagnostics(&self) -> Diagnostics {
        let mut all = self.parse_diagnostics.clone();
        all.extend(self.validate_diagnostics.clone());
        all.filtered()
    }

    /// Query is valid if there are no error-severity diagnostics (warnings are allowed).
    pub fn is_valid(&self) -> bool {
        self.root.is_some()
            && !self.parse_diagnostics.has_errors()
            && !self.validate_diagnostics.has_errors()
    }

    pub fn into_valid(self) -> Result<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(Error::QueryParseError(self.diagnostics()))
        }
    }
}

impl<'a> TryFrom<&'a str> for Query<'a> {
    type Error = crate::Error;

    fn try_from(source: &'a str) -> Result<Self> {
        Self::parse(source)
    }
}

impl<'a> TryFrom<&'a String> for Query<'a> {
    type Error = crate::Error;

    fn try_from(source: &'a String) -> Result<Self> {
        Self::parse(source.as_str())
    }
}
