pub mod ast;
pub mod check;
pub mod fmt;
pub mod query_loader;
pub mod tokens;

#[cfg(test)]
mod query_loader_tests;
