//! Deterministic text dumps for inspection and snapshots.

use std::fmt::Write;

use crate::parser::{Symbol, SymbolTree, Token};

use super::Query;

impl Query<'_> {
    /// One token per line: `Kind line:start-end "text"`.
    pub fn dump_tokens(&self) -> String {
        let mut out = String::new();
        for token in self.tokens() {
            format_token(token, &mut out).expect("String write never fails");
            out.push('\n');
        }
        out
    }

    /// Indented symbol tree. Empty when the query has no root.
    pub fn dump_cst(&self) -> String {
        let mut out = String::new();
        if let Some(root) = self.root() {
            format_tree(root, 0, &mut out).expect("String write never fails");
        }
        out
    }

    /// Rendered diagnostics against this query's source.
    pub fn dump_diagnostics(&self) -> String {
        self.diagnostics().render(self.source())
    }
}

fn format_token(token: &Token, w: &mut impl Write) -> std::fmt::Result {
    write!(
        w,
        "{} {}:{}-{} {:?}",
        token.kind(),
        token.line(),
        token.start_column(),
        token.end_column(),
        token.text()
    )
}

fn format_tree(tree: &SymbolTree, indent: usize, w: &mut impl Write) -> std::fmt::Result {
    writeln!(w, "{:indent$}{}", "", tree.kind(), indent = indent * 2)?;
    for child in tree.children() {
        match child {
            Symbol::Token(token) => writeln!(
                w,
                "{:indent$}{} {:?}",
                "",
                token.kind(),
                token.text(),
                indent = (indent + 1) * 2
            )?,
            Symbol::Tree(inner) => format_tree(inner, indent + 1, w)?,
        }
    }
    Ok(())
}
