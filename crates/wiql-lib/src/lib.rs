//! WIQL compiler front end: lexer, symbol model, typed AST and diagnostics.
//!
//! # Example
//!
//! ```
//! use wiql_lib::Query;
//!
//! let source = "SELECT [System.Id] FROM WorkItems WHERE [System.State] = 'Active'";
//!
//! let query = Query::try_from(source).expect("out of fuel");
//! assert!(query.is_valid());
//! eprintln!("{}", query.diagnostics().render(source));
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod parser;
pub mod query;

pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use parser::{ShapeError, Symbol, SymbolTree, SyntaxKind, Token};
pub use query::{Query, QueryBuilder, format_select};

/// Fatal failures. Syntax problems in the query are diagnostics, not errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Recursion fuel exhausted (input nested or chained too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    /// A node was built from children that cannot fill its required roles.
    #[error("malformed production: {0}")]
    MalformedProduction(#[from] ShapeError),

    /// A raw kind value outside the `SyntaxKind` table.
    #[error("unknown symbol kind {0}")]
    UnknownSymbolKind(u16),

    #[error("query parsing failed with {} errors", .0.error_count())]
    QueryParseError(Diagnostics),
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, Error>;
