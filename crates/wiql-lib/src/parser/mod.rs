//! Parser infrastructure for WIQL.
//!
//! # Architecture
//!
//! Lexing produces owned, position-tagged [`Token`]s. The recursive-descent
//! parser hands each production's matched children, in source order, to
//! [`SymbolTree::new`], which checks that the children can fill the node
//! kind's required roles. Typed wrappers in [`ast`] bind roles by kind over
//! those children.
//!
//! # Error Strategy
//!
//! - Lexical errors are tokens (`UnexpectedToken`, `NonterminatingString`),
//!   reported once before parsing starts
//! - A syntax error stops the parse: the first diagnostic is the root cause,
//!   and the query has no root
//! - Trailing input after a complete query is reported, the root is kept
//!
//! Recursion fuel exhaustion and rejected node shapes return an actual error.

pub mod ast;
pub mod cst;
pub mod lexer;
pub mod symbol;

mod core;
mod grammar;
mod invariants;

#[cfg(test)]
mod lexer_tests;
#[cfg(test)]
mod symbol_tests;

pub use cst::{KindSet, SyntaxKind, kind_name, kind_sets};
pub use symbol::{Descendants, ShapeError, Symbol, SymbolTree, Token};

pub use ast::{
    Comparison, Condition, ConditionalExpression, ConditionalOperator, ContainsWords, DateTime,
    Field, FieldList, FlatSelect, InGroup, LinkCondition, LinkExpression, LinkMode,
    LinkOrderByFieldList, LinkPrefix, LinkSide, LogicalExpression, Number, OneHopSelect, Operand,
    OrderByFieldList, RecursiveSelect, Select, SourcePrefix, TargetPrefix, Term, Value, ValueList,
};

pub use self::core::{DEFAULT_RECURSION_FUEL, ParseResult, Parser};
pub use lexer::lex;

/// Main entry point. Returns `Err` on fuel exhaustion or a rejected node shape.
pub fn parse(source: &str) -> crate::Result<ParseResult> {
    Parser::new(lex(source)).parse()
}
