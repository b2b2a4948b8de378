//! Typed AST wrappers over symbol trees.
//!
//! Each struct borrows a `SymbolTree` of one kind and exposes the production's
//! named roles. Roles are resolved by kind over the node's own children, so a
//! role value is always one of the children, never a copy.
//!
//! Shapes are checked once, in [`check_shape`], when the tree is built. Required
//! accessors rely on that check.

use super::cst::kind_sets::{
    AND_OR, ASC_DESC, CONDITION_TOKENS, EVER_NOT, LINK_MODE, LINK_PREFIX, PLUS_MINUS,
    VALUE_KINDS,
};
use super::cst::{KindSet, SyntaxKind};
use super::invariants::required;
use super::symbol::{ShapeError, Symbol, SymbolTree, Token};

const fn one(kind: SyntaxKind) -> KindSet {
    KindSet::single(kind)
}

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name<'a>(&'a SymbolTree);

        impl<'a> $name<'a> {
            pub fn cast(tree: &'a SymbolTree) -> Option<Self> {
                (tree.kind() == SyntaxKind::$kind).then_some(Self(tree))
            }

            pub fn from_symbol(symbol: &'a Symbol) -> Option<Self> {
                symbol.as_tree().and_then(Self::cast)
            }

            pub fn as_tree(&self) -> &'a SymbolTree {
                self.0
            }
        }
    };
}

ast_node!(Number, Number);
ast_node!(Field, Field);
ast_node!(ContainsWords, ContainsWords);
ast_node!(InGroup, InGroup);
ast_node!(DateTime, DateTime);
ast_node!(FieldList, FieldList);
ast_node!(OrderByFieldList, OrderByFieldList);
ast_node!(LinkOrderByFieldList, LinkOrderByFieldList);
ast_node!(ValueList, ValueList);
ast_node!(ConditionalOperator, ConditionalOperator);
ast_node!(Value, Value);
ast_node!(LogicalExpression, LogicalExpression);
ast_node!(ConditionalExpression, ConditionalExpression);
ast_node!(FlatSelect, FlatSelect);
ast_node!(SourcePrefix, SourcePrefix);
ast_node!(TargetPrefix, TargetPrefix);
ast_node!(LinkCondition, LinkCondition);
ast_node!(LinkExpression, LinkExpression);
ast_node!(OneHopSelect, OneHopSelect);
ast_node!(RecursiveSelect, RecursiveSelect);

fn child<'a, T>(
    tree: &'a SymbolTree,
    kind: SyntaxKind,
    cast: fn(&'a SymbolTree) -> Option<T>,
) -> Option<T> {
    tree.tree(one(kind)).and_then(cast)
}

// ============================================================================
// Literals and field references
// ============================================================================

impl<'a> Number<'a> {
    pub fn digits(&self) -> &'a Token {
        required(self.0.token(one(SyntaxKind::Digits)), self.0, "digits")
    }

    pub fn minus(&self) -> Option<&'a Token> {
        self.0.token(one(SyntaxKind::Minus))
    }

    /// Signed value. `None` when the digits overflow `i64`.
    pub fn value(&self) -> Option<i64> {
        let digits = self.digits().text();
        match self.minus() {
            Some(_) => format!("-{digits}").parse().ok(),
            None => digits.parse().ok(),
        }
    }
}

impl<'a> Field<'a> {
    pub fn identifier(&self) -> &'a Token {
        required(
            self.0.token(one(SyntaxKind::Identifier)),
            self.0,
            "identifier",
        )
    }

    /// Field reference without surrounding brackets: `[System.Id]` -> `System.Id`.
    pub fn name(&self) -> &'a str {
        let text = self.identifier().text();
        text.strip_prefix('[')
            .and_then(|t| t.strip_suffix(']'))
            .unwrap_or(text)
            .trim()
    }
}

impl<'a> ContainsWords<'a> {
    pub fn contains(&self) -> &'a Token {
        required(self.0.token(one(SyntaxKind::Contains)), self.0, "contains")
    }

    pub fn words(&self) -> &'a Token {
        required(self.0.token(one(SyntaxKind::Words)), self.0, "words")
    }
}

impl<'a> DateTime<'a> {
    pub fn date_string(&self) -> &'a Token {
        required(self.0.token(one(SyntaxKind::Str)), self.0, "date string")
    }
}

// ============================================================================
// Lists (right-recursive chains)
// ============================================================================

impl<'a> FieldList<'a> {
    pub fn field(&self) -> Field<'a> {
        required(child(self.0, SyntaxKind::Field, Field::cast), self.0, "field")
    }

    pub fn rest_of_list(&self) -> Option<FieldList<'a>> {
        child(self.0, SyntaxKind::FieldList, FieldList::cast)
    }

    /// This link and every following one.
    pub fn iter(self) -> impl Iterator<Item = FieldList<'a>> {
        std::iter::successors(Some(self), |list| list.rest_of_list())
    }

    pub fn fields(self) -> impl Iterator<Item = Field<'a>> {
        self.iter().map(|list| list.field())
    }
}

impl<'a> OrderByFieldList<'a> {
    pub fn field(&self) -> Field<'a> {
        required(child(self.0, SyntaxKind::Field, Field::cast), self.0, "field")
    }

    pub fn asc_desc(&self) -> Option<&'a Token> {
        self.0.token(ASC_DESC)
    }

    pub fn is_descending(&self) -> bool {
        self.asc_desc()
            .is_some_and(|t| t.kind() == SyntaxKind::Desc)
    }

    pub fn rest_of_list(&self) -> Option<OrderByFieldList<'a>> {
        child(self.0, SyntaxKind::OrderByFieldList, OrderByFieldList::cast)
    }

    pub fn iter(self) -> impl Iterator<Item = OrderByFieldList<'a>> {
        std::iter::successors(Some(self), |list| list.rest_of_list())
    }
}

impl<'a> LinkOrderByFieldList<'a> {
    pub fn prefix(&self) -> Option<LinkPrefix<'a>> {
        self.0.input(LINK_PREFIX).and_then(LinkPrefix::from_symbol)
    }

    pub fn field(&self) -> Field<'a> {
        required(child(self.0, SyntaxKind::Field, Field::cast), self.0, "field")
    }

    pub fn asc_desc(&self) -> Option<&'a Token> {
        self.0.token(ASC_DESC)
    }

    pub fn is_descending(&self) -> bool {
        self.asc_desc()
            .is_some_and(|t| t.kind() == SyntaxKind::Desc)
    }

    pub fn rest_of_list(&self) -> Option<LinkOrderByFieldList<'a>> {
        child(
            self.0,
            SyntaxKind::LinkOrderByFieldList,
            LinkOrderByFieldList::cast,
        )
    }

    pub fn iter(self) -> impl Iterator<Item = LinkOrderByFieldList<'a>> {
        std::iter::successors(Some(self), |list| list.rest_of_list())
    }
}

impl<'a> ValueList<'a> {
    pub fn value(&self) -> Value<'a> {
        required(child(self.0, SyntaxKind::Value, Value::cast), self.0, "value")
    }

    pub fn rest_of_list(&self) -> Option<ValueList<'a>> {
        child(self.0, SyntaxKind::ValueList, ValueList::cast)
    }

    pub fn iter(self) -> impl Iterator<Item = ValueList<'a>> {
        std::iter::successors(Some(self), |list| list.rest_of_list())
    }

    pub fn values(self) -> impl Iterator<Item = Value<'a>> {
        self.iter().map(|list| list.value())
    }
}

// ============================================================================
// Operators and values
// ============================================================================

impl<'a> ConditionalOperator<'a> {
    /// The operator proper: a token, or a `ContainsWords` / `InGroup` node.
    pub fn condition_token(&self) -> &'a Symbol {
        required(self.0.input(CONDITION_TOKENS), self.0, "condition token")
    }

    pub fn operator_kind(&self) -> SyntaxKind {
        self.condition_token().kind()
    }

    pub fn ever(&self) -> Option<&'a Token> {
        self.0.token(one(SyntaxKind::Ever))
    }

    pub fn not(&self) -> Option<&'a Token> {
        self.0.token(one(SyntaxKind::Not))
    }
}

/// What a `Value` is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term<'a> {
    Number(Number<'a>),
    String(&'a Token),
    DateTime(DateTime<'a>),
    Variable(&'a Token),
    Boolean(&'a Token),
    Field(Field<'a>),
}

impl<'a> Term<'a> {
    pub fn from_symbol(symbol: &'a Symbol) -> Option<Self> {
        match symbol {
            Symbol::Token(token) => match token.kind() {
                SyntaxKind::Str => Some(Term::String(token)),
                SyntaxKind::Variable => Some(Term::Variable(token)),
                SyntaxKind::True | SyntaxKind::False => Some(Term::Boolean(token)),
                _ => None,
            },
            Symbol::Tree(tree) => match tree.kind() {
                SyntaxKind::Number => Number::cast(tree).map(Term::Number),
                SyntaxKind::DateTime => DateTime::cast(tree).map(Term::DateTime),
                SyntaxKind::Field => Field::cast(tree).map(Term::Field),
                _ => None,
            },
        }
    }
}

impl<'a> Value<'a> {
    pub fn value(&self) -> Term<'a> {
        required(
            self.0.input(VALUE_KINDS).and_then(Term::from_symbol),
            self.0,
            "value",
        )
    }

    /// `+` or `-` of an offset expression such as `@Today - 7`.
    pub fn operator(&self) -> Option<&'a Token> {
        self.0.token(PLUS_MINUS)
    }

    /// The offset after `operator`.
    pub fn num(&self) -> Option<Number<'a>> {
        offset_number(self.0).and_then(Number::cast)
    }
}

/// The Number following `+`/`-`. When the value itself is a Number it is the second one.
fn offset_number(tree: &SymbolTree) -> Option<&SymbolTree> {
    tree.input(PLUS_MINUS)?;
    let leading_number = tree
        .input(VALUE_KINDS)
        .is_some_and(|s| s.kind() == SyntaxKind::Number);
    let occurrence = if leading_number { 2 } else { 1 };
    tree.nth_tree(one(SyntaxKind::Number), occurrence)
}

// ============================================================================
// Boolean expressions
// ============================================================================

/// A condition is either a parenthesized subexpression or a leaf comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition<'a, E> {
    Nested(E),
    Leaf(Comparison<'a>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison<'a> {
    pub field: Field<'a>,
    /// `NOT` of `NOT IN`.
    pub not: Option<&'a Token>,
    pub operand: Operand<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand<'a> {
    Compare {
        operator: ConditionalOperator<'a>,
        value: Value<'a>,
    },
    In {
        in_token: &'a Token,
        list: ValueList<'a>,
    },
}

fn comparison(tree: &SymbolTree) -> Comparison<'_> {
    let field = required(child(tree, SyntaxKind::Field, Field::cast), tree, "field");
    let operator = child(
        tree,
        SyntaxKind::ConditionalOperator,
        ConditionalOperator::cast,
    );
    let value = child(tree, SyntaxKind::Value, Value::cast);
    let operand = match (operator, value) {
        (Some(operator), Some(value)) => Operand::Compare { operator, value },
        _ => Operand::In {
            in_token: required(tree.token(one(SyntaxKind::In)), tree, "IN"),
            list: required(
                child(tree, SyntaxKind::ValueList, ValueList::cast),
                tree,
                "value list",
            ),
        },
    };
    Comparison {
        field,
        not: tree.token(one(SyntaxKind::Not)),
        operand,
    }
}

impl<'a> LogicalExpression<'a> {
    pub fn condition(&self) -> ConditionalExpression<'a> {
        required(
            child(
                self.0,
                SyntaxKind::ConditionalExpression,
                ConditionalExpression::cast,
            ),
            self.0,
            "condition",
        )
    }

    pub fn ever_not(&self) -> Option<&'a Token> {
        self.0.token(EVER_NOT)
    }

    pub fn or_and(&self) -> Option<&'a Token> {
        self.0.token(AND_OR)
    }

    /// The rest of the chain after `or_and`.
    pub fn expression(&self) -> Option<LogicalExpression<'a>> {
        child(self.0, SyntaxKind::LogicalExpression, LogicalExpression::cast)
    }

    pub fn iter(self) -> impl Iterator<Item = LogicalExpression<'a>> {
        std::iter::successors(Some(self), |expr| expr.expression())
    }
}

impl<'a> ConditionalExpression<'a> {
    pub fn expression(&self) -> Option<LogicalExpression<'a>> {
        child(self.0, SyntaxKind::LogicalExpression, LogicalExpression::cast)
    }

    pub fn field(&self) -> Option<Field<'a>> {
        child(self.0, SyntaxKind::Field, Field::cast)
    }

    pub fn conditional_operator(&self) -> Option<ConditionalOperator<'a>> {
        child(
            self.0,
            SyntaxKind::ConditionalOperator,
            ConditionalOperator::cast,
        )
    }

    pub fn in_operator(&self) -> Option<&'a Token> {
        self.0.token(one(SyntaxKind::In))
    }

    pub fn value(&self) -> Option<Value<'a>> {
        child(self.0, SyntaxKind::Value, Value::cast)
    }

    pub fn not(&self) -> Option<&'a Token> {
        self.0.token(one(SyntaxKind::Not))
    }

    pub fn value_list(&self) -> Option<ValueList<'a>> {
        child(self.0, SyntaxKind::ValueList, ValueList::cast)
    }

    pub fn shape(&self) -> Condition<'a, LogicalExpression<'a>> {
        match self.expression() {
            Some(expr) => Condition::Nested(expr),
            None => Condition::Leaf(comparison(self.0)),
        }
    }
}

// ============================================================================
// Link queries
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkSide {
    Source,
    Target,
}

/// `[Source].` or `[Target].` in front of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkPrefix<'a> {
    Source(SourcePrefix<'a>),
    Target(TargetPrefix<'a>),
}

impl<'a> LinkPrefix<'a> {
    pub fn from_symbol(symbol: &'a Symbol) -> Option<Self> {
        let tree = symbol.as_tree()?;
        match tree.kind() {
            SyntaxKind::SourcePrefix => SourcePrefix::cast(tree).map(LinkPrefix::Source),
            SyntaxKind::TargetPrefix => TargetPrefix::cast(tree).map(LinkPrefix::Target),
            _ => None,
        }
    }

    pub fn side(&self) -> LinkSide {
        match self {
            LinkPrefix::Source(_) => LinkSide::Source,
            LinkPrefix::Target(_) => LinkSide::Target,
        }
    }

    pub fn as_tree(&self) -> &'a SymbolTree {
        match self {
            LinkPrefix::Source(n) => n.as_tree(),
            LinkPrefix::Target(n) => n.as_tree(),
        }
    }
}

impl<'a> SourcePrefix<'a> {
    pub fn source(&self) -> &'a Token {
        required(self.0.token(one(SyntaxKind::Source)), self.0, "source")
    }
}

impl<'a> TargetPrefix<'a> {
    pub fn target(&self) -> &'a Token {
        required(self.0.token(one(SyntaxKind::Target)), self.0, "target")
    }
}

impl<'a> LinkCondition<'a> {
    pub fn expression(&self) -> Option<LinkExpression<'a>> {
        child(self.0, SyntaxKind::LinkExpression, LinkExpression::cast)
    }

    pub fn prefix(&self) -> Option<LinkPrefix<'a>> {
        self.0.input(LINK_PREFIX).and_then(LinkPrefix::from_symbol)
    }

    pub fn field(&self) -> Option<Field<'a>> {
        child(self.0, SyntaxKind::Field, Field::cast)
    }

    pub fn conditional_operator(&self) -> Option<ConditionalOperator<'a>> {
        child(
            self.0,
            SyntaxKind::ConditionalOperator,
            ConditionalOperator::cast,
        )
    }

    pub fn in_operator(&self) -> Option<&'a Token> {
        self.0.token(one(SyntaxKind::In))
    }

    pub fn value(&self) -> Option<Value<'a>> {
        child(self.0, SyntaxKind::Value, Value::cast)
    }

    pub fn not(&self) -> Option<&'a Token> {
        self.0.token(one(SyntaxKind::Not))
    }

    pub fn value_list(&self) -> Option<ValueList<'a>> {
        child(self.0, SyntaxKind::ValueList, ValueList::cast)
    }

    pub fn shape(&self) -> Condition<'a, LinkExpression<'a>> {
        match self.expression() {
            Some(expr) => Condition::Nested(expr),
            None => Condition::Leaf(comparison(self.0)),
        }
    }
}

impl<'a> LinkExpression<'a> {
    pub fn condition(&self) -> LinkCondition<'a> {
        required(
            child(self.0, SyntaxKind::LinkCondition, LinkCondition::cast),
            self.0,
            "condition",
        )
    }

    pub fn ever_not(&self) -> Option<&'a Token> {
        self.0.token(EVER_NOT)
    }

    pub fn or_and(&self) -> Option<&'a Token> {
        self.0.token(AND_OR)
    }

    pub fn expression(&self) -> Option<LinkExpression<'a>> {
        child(self.0, SyntaxKind::LinkExpression, LinkExpression::cast)
    }

    pub fn iter(self) -> impl Iterator<Item = LinkExpression<'a>> {
        std::iter::successors(Some(self), |expr| expr.expression())
    }
}

// ============================================================================
// Queries
// ============================================================================

/// Link-existence quantifier of a one-hop query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkMode {
    #[default]
    MustContain,
    MayContain,
    DoesNotContain,
}

impl<'a> FlatSelect<'a> {
    pub fn field_list(&self) -> FieldList<'a> {
        required(
            child(self.0, SyntaxKind::FieldList, FieldList::cast),
            self.0,
            "field list",
        )
    }

    pub fn where_exp(&self) -> Option<LogicalExpression<'a>> {
        child(self.0, SyntaxKind::LogicalExpression, LogicalExpression::cast)
    }

    pub fn order_by(&self) -> Option<OrderByFieldList<'a>> {
        child(self.0, SyntaxKind::OrderByFieldList, OrderByFieldList::cast)
    }

    pub fn as_of(&self) -> Option<DateTime<'a>> {
        child(self.0, SyntaxKind::DateTime, DateTime::cast)
    }
}

impl<'a> OneHopSelect<'a> {
    pub fn field_list(&self) -> FieldList<'a> {
        required(
            child(self.0, SyntaxKind::FieldList, FieldList::cast),
            self.0,
            "field list",
        )
    }

    pub fn where_exp(&self) -> Option<LinkExpression<'a>> {
        child(self.0, SyntaxKind::LinkExpression, LinkExpression::cast)
    }

    pub fn order_by(&self) -> Option<LinkOrderByFieldList<'a>> {
        child(
            self.0,
            SyntaxKind::LinkOrderByFieldList,
            LinkOrderByFieldList::cast,
        )
    }

    pub fn as_of(&self) -> Option<DateTime<'a>> {
        child(self.0, SyntaxKind::DateTime, DateTime::cast)
    }

    pub fn mode(&self) -> Option<&'a Token> {
        self.0.token(LINK_MODE)
    }

    /// Effective mode; an absent `MODE` clause means `MustContain`.
    pub fn link_mode(&self) -> LinkMode {
        match self.mode().map(Token::kind) {
            Some(SyntaxKind::MayContain) => LinkMode::MayContain,
            Some(SyntaxKind::DoesNotContain) => LinkMode::DoesNotContain,
            _ => LinkMode::MustContain,
        }
    }
}

impl<'a> RecursiveSelect<'a> {
    pub fn field_list(&self) -> FieldList<'a> {
        required(
            child(self.0, SyntaxKind::FieldList, FieldList::cast),
            self.0,
            "field list",
        )
    }

    pub fn where_exp(&self) -> Option<LinkExpression<'a>> {
        child(self.0, SyntaxKind::LinkExpression, LinkExpression::cast)
    }

    pub fn order_by(&self) -> Option<LinkOrderByFieldList<'a>> {
        child(
            self.0,
            SyntaxKind::LinkOrderByFieldList,
            LinkOrderByFieldList::cast,
        )
    }

    pub fn as_of(&self) -> Option<DateTime<'a>> {
        child(self.0, SyntaxKind::DateTime, DateTime::cast)
    }

    pub fn recursive(&self) -> Option<&'a Token> {
        self.0.token(one(SyntaxKind::Recursive))
    }

    pub fn matching_children(&self) -> Option<&'a Token> {
        self.0.token(one(SyntaxKind::ReturnMatchingChildren))
    }
}

/// Any of the three top-level query shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Select<'a> {
    Flat(FlatSelect<'a>),
    OneHop(OneHopSelect<'a>),
    Recursive(RecursiveSelect<'a>),
}

impl<'a> Select<'a> {
    pub fn cast(tree: &'a SymbolTree) -> Option<Self> {
        match tree.kind() {
            SyntaxKind::FlatSelect => FlatSelect::cast(tree).map(Select::Flat),
            SyntaxKind::OneHopSelect => OneHopSelect::cast(tree).map(Select::OneHop),
            SyntaxKind::RecursiveSelect => RecursiveSelect::cast(tree).map(Select::Recursive),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> &'a SymbolTree {
        match self {
            Select::Flat(n) => n.as_tree(),
            Select::OneHop(n) => n.as_tree(),
            Select::Recursive(n) => n.as_tree(),
        }
    }

    pub fn field_list(&self) -> FieldList<'a> {
        match self {
            Select::Flat(n) => n.field_list(),
            Select::OneHop(n) => n.field_list(),
            Select::Recursive(n) => n.field_list(),
        }
    }

    pub fn as_of(&self) -> Option<DateTime<'a>> {
        match self {
            Select::Flat(n) => n.as_of(),
            Select::OneHop(n) => n.as_of(),
            Select::Recursive(n) => n.as_of(),
        }
    }

    pub fn is_link_query(&self) -> bool {
        !matches!(self, Select::Flat(_))
    }
}

// ============================================================================
// Shape checks
// ============================================================================

/// Verifies that `tree`'s children can fill every required role of its kind.
pub(crate) fn check_shape(tree: &SymbolTree) -> Result<(), ShapeError> {
    let node = tree.kind();
    let need = |kinds: KindSet, role: &'static str| {
        if tree.has(kinds) {
            Ok(())
        } else {
            Err(ShapeError::MissingRole { node, role })
        }
    };

    match node {
        SyntaxKind::Number => need(one(SyntaxKind::Digits), "digits"),
        SyntaxKind::Field => need(one(SyntaxKind::Identifier), "identifier"),
        SyntaxKind::ContainsWords => {
            need(one(SyntaxKind::Contains), "contains")?;
            need(one(SyntaxKind::Words), "words")
        }
        SyntaxKind::InGroup => Ok(()),
        SyntaxKind::DateTime => need(one(SyntaxKind::Str), "date string"),
        SyntaxKind::FieldList
        | SyntaxKind::OrderByFieldList
        | SyntaxKind::LinkOrderByFieldList => need(one(SyntaxKind::Field), "field"),
        SyntaxKind::ValueList => need(one(SyntaxKind::Value), "value"),
        SyntaxKind::ConditionalOperator => need(CONDITION_TOKENS, "condition token"),
        SyntaxKind::Value => {
            need(VALUE_KINDS, "value")?;
            if tree.has(PLUS_MINUS) && offset_number(tree).is_none() {
                return Err(ShapeError::MissingRole {
                    node,
                    role: "offset number",
                });
            }
            Ok(())
        }
        SyntaxKind::LogicalExpression => need(one(SyntaxKind::ConditionalExpression), "condition"),
        SyntaxKind::LinkExpression => need(one(SyntaxKind::LinkCondition), "condition"),
        SyntaxKind::ConditionalExpression => {
            check_condition(tree, one(SyntaxKind::LogicalExpression), LEAF_PARTS)
        }
        SyntaxKind::LinkCondition => check_condition(
            tree,
            one(SyntaxKind::LinkExpression),
            LEAF_PARTS.union(LINK_PREFIX),
        ),
        SyntaxKind::FlatSelect | SyntaxKind::OneHopSelect | SyntaxKind::RecursiveSelect => {
            need(one(SyntaxKind::FieldList), "field list")
        }
        SyntaxKind::SourcePrefix => need(one(SyntaxKind::Source), "source"),
        SyntaxKind::TargetPrefix => need(one(SyntaxKind::Target), "target"),
        _ => Err(ShapeError::NotANodeKind(node)),
    }
}

const LEAF_PARTS: KindSet = KindSet::new(&[
    SyntaxKind::Field,
    SyntaxKind::ConditionalOperator,
    SyntaxKind::Value,
    SyntaxKind::In,
    SyntaxKind::ValueList,
]);

/// Exactly one of: nested expression, or field with one complete operand form.
///
/// Nothing from `leaf_parts` may accompany a nested expression.
fn check_condition(
    tree: &SymbolTree,
    nested: KindSet,
    leaf_parts: KindSet,
) -> Result<(), ShapeError> {
    let node = tree.kind();
    if tree.has(nested) {
        return if tree.has(leaf_parts) {
            Err(ShapeError::AmbiguousCondition(node))
        } else {
            Ok(())
        };
    }

    let compare =
        tree.has(one(SyntaxKind::ConditionalOperator)) && tree.has(one(SyntaxKind::Value));
    let in_list = tree.has(one(SyntaxKind::In)) && tree.has(one(SyntaxKind::ValueList));
    match (tree.has(one(SyntaxKind::Field)), compare, in_list) {
        (true, true, false) | (true, false, true) => Ok(()),
        (true, true, true) => Err(ShapeError::AmbiguousCondition(node)),
        _ => Err(ShapeError::EmptyCondition(node)),
    }
}
