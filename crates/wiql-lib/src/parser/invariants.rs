//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use super::core::Parser;
use super::cst::SyntaxKind;
use super::symbol::SymbolTree;

impl Parser {
    #[inline]
    pub(super) fn ensure_progress(&self) {
        assert!(
            self.debug_fuel.get() != 0,
            "parser is stuck: too many lookaheads"
        );
        self.debug_fuel.set(self.debug_fuel.get() - 1);
    }

    #[inline]
    pub(super) fn assert_current(&self, expected_kind: SyntaxKind) {
        let current_kind = self.current();
        assert_eq!(
            current_kind, expected_kind,
            "broken parser invariant: expected {:?} but found {:?} (upstream caller's responsibility)",
            expected_kind, current_kind,
        );
    }

    #[inline]
    pub(super) fn assert_not_at_eof(&self) {
        assert!(
            self.current() != SyntaxKind::Eof,
            "broken parser invariant: bump called at EOF"
        );
    }
}

/// Unwraps a required role. Shapes are checked in `SymbolTree::new`, so a
/// missing role here means a tree was built around the constructor.
#[inline]
#[track_caller]
pub(super) fn required<T>(role: Option<T>, node: &SymbolTree, name: &str) -> T {
    match role {
        Some(value) => value,
        None => panic!(
            "broken shape invariant: `{}` without {} (checked at construction)",
            node.kind(),
            name
        ),
    }
}
