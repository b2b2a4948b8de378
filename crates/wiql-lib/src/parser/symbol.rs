//! Symbol model: every parse artifact is a `Symbol`.
//!
//! A `Token` is a lexical terminal. A `SymbolTree` is a composite node that owns
//! the exact children the parser matched for its production, in source order.
//! Named roles (see [`super::ast`]) are views over those children, resolved by
//! kind through [`SymbolTree::nth_input`]. Nothing is stored twice and nothing is
//! mutated after construction.

use rowan::{TextRange, TextSize};
use serde::Serialize;

use super::ast::check_shape;
use super::cst::{KindSet, SyntaxKind};

/// A lexical terminal with its source position.
///
/// Lines and columns are 1-based; columns count characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    kind: SyntaxKind,
    line: u32,
    start_column: u32,
    end_column: u32,
    #[serde(skip)]
    offset: TextSize,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    prev: Option<Box<Token>>,
}

impl Token {
    pub fn new(kind: SyntaxKind, line: u32, start_column: u32, text: impl Into<String>) -> Self {
        let text = text.into();
        let width = text.chars().count() as u32;
        Self {
            kind,
            line,
            start_column,
            end_column: start_column + width,
            offset: TextSize::from(0),
            text,
            prev: None,
        }
    }

    /// End-of-input marker remembering where real input stopped.
    pub fn eof(line: u32, start_column: u32, prev: Option<Token>) -> Self {
        let mut token = Self::new(SyntaxKind::Eof, line, start_column, "");
        token.prev = prev.map(Box::new);
        token
    }

    /// Places the token at a byte offset in the source.
    pub fn at_offset(mut self, offset: TextSize) -> Self {
        self.offset = offset;
        self
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn start_column(&self) -> u32 {
        self.start_column
    }

    pub fn end_column(&self) -> u32 {
        self.end_column
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Byte range in the source.
    pub fn span(&self) -> TextRange {
        TextRange::at(self.offset, TextSize::of(self.text.as_str()))
    }

    /// The token before EOF. Always `None` for other kinds.
    pub fn prev(&self) -> Option<&Token> {
        self.prev.as_deref()
    }

    /// Content of a string literal with quotes removed and doubled quotes collapsed.
    pub fn string_value(&self) -> Option<String> {
        if !matches!(
            self.kind,
            SyntaxKind::Str | SyntaxKind::NonterminatingString
        ) {
            return None;
        }
        let mut chars = self.text.chars();
        let quote = chars.next()?;
        let mut body = chars.as_str();
        if self.kind == SyntaxKind::Str {
            body = body.strip_suffix(quote).unwrap_or(body);
        }
        let doubled: String = [quote, quote].iter().collect();
        Some(body.replace(&doubled, &quote.to_string()))
    }
}

/// Terminal or composite parse artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Symbol {
    Token(Token),
    Tree(SymbolTree),
}

impl Symbol {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            Symbol::Token(token) => token.kind(),
            Symbol::Tree(tree) => tree.kind(),
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Symbol::Token(token) => Some(token),
            Symbol::Tree(_) => None,
        }
    }

    pub fn as_tree(&self) -> Option<&SymbolTree> {
        match self {
            Symbol::Tree(tree) => Some(tree),
            Symbol::Token(_) => None,
        }
    }

    /// Byte range covered by the symbol. `None` for a tree without tokens.
    pub fn span(&self) -> Option<TextRange> {
        match self {
            Symbol::Token(token) => Some(token.span()),
            Symbol::Tree(tree) => tree.span(),
        }
    }
}

impl From<Token> for Symbol {
    fn from(token: Token) -> Self {
        Symbol::Token(token)
    }
}

impl From<SymbolTree> for Symbol {
    fn from(tree: SymbolTree) -> Self {
        Symbol::Tree(tree)
    }
}

/// Why a child list cannot form a node of the requested kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("`{0}` is not a node kind")]
    NotANodeKind(SyntaxKind),

    #[error("`{node}` is missing its {role}")]
    MissingRole {
        node: SyntaxKind,
        role: &'static str,
    },

    #[error("`{0}` has both a nested expression and a comparison")]
    AmbiguousCondition(SyntaxKind),

    #[error("`{0}` has neither a nested expression nor a complete comparison")]
    EmptyCondition(SyntaxKind),
}

/// Composite node: a kind plus the ordered children of its production.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolTree {
    kind: SyntaxKind,
    children: Vec<Symbol>,
}

impl SymbolTree {
    /// Builds a node from the children matched for its production.
    ///
    /// Fails when the children cannot satisfy the kind's required roles.
    pub fn new(kind: SyntaxKind, children: Vec<Symbol>) -> Result<Self, ShapeError> {
        if !kind.is_node() {
            return Err(ShapeError::NotANodeKind(kind));
        }
        let tree = Self { kind, children };
        check_shape(&tree)?;
        Ok(tree)
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn children(&self) -> &[Symbol] {
        &self.children
    }

    /// First child whose kind is in `kinds`.
    pub fn input(&self, kinds: KindSet) -> Option<&Symbol> {
        self.nth_input(kinds, 1)
    }

    /// The `occurrence`-th child (1-based, in child order) whose kind is in `kinds`.
    pub fn nth_input(&self, kinds: KindSet, occurrence: usize) -> Option<&Symbol> {
        let skip = occurrence.checked_sub(1)?;
        self.children
            .iter()
            .filter(|child| kinds.contains(child.kind()))
            .nth(skip)
    }

    pub fn token(&self, kinds: KindSet) -> Option<&Token> {
        self.input(kinds).and_then(Symbol::as_token)
    }

    pub fn tree(&self, kinds: KindSet) -> Option<&SymbolTree> {
        self.nth_tree(kinds, 1)
    }

    pub fn nth_tree(&self, kinds: KindSet, occurrence: usize) -> Option<&SymbolTree> {
        self.nth_input(kinds, occurrence).and_then(Symbol::as_tree)
    }

    pub fn has(&self, kinds: KindSet) -> bool {
        self.input(kinds).is_some()
    }

    /// Composite nodes in pre-order, starting with `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// All terminals under this node in source order.
    pub fn tokens(&self) -> Vec<&Token> {
        let mut out = Vec::new();
        collect_tokens(self, &mut out);
        out
    }

    pub fn first_token(&self) -> Option<&Token> {
        self.children.iter().find_map(|child| match child {
            Symbol::Token(token) => Some(token),
            Symbol::Tree(tree) => tree.first_token(),
        })
    }

    pub fn last_token(&self) -> Option<&Token> {
        self.children.iter().rev().find_map(|child| match child {
            Symbol::Token(token) => Some(token),
            Symbol::Tree(tree) => tree.last_token(),
        })
    }

    pub fn span(&self) -> Option<TextRange> {
        let first = self.first_token()?.span();
        let last = self.last_token()?.span();
        Some(first.cover(last))
    }
}

fn collect_tokens<'a>(tree: &'a SymbolTree, out: &mut Vec<&'a Token>) {
    for child in &tree.children {
        match child {
            Symbol::Token(token) => out.push(token),
            Symbol::Tree(inner) => collect_tokens(inner, out),
        }
    }
}

/// Pre-order walk over composite nodes.
pub struct Descendants<'a> {
    stack: Vec<&'a SymbolTree>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SymbolTree;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.stack.pop()?;
        self.stack
            .extend(tree.children.iter().rev().filter_map(Symbol::as_tree));
        Some(tree)
    }
}
