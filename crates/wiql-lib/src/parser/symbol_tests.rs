use super::cst::KindSet;
use super::cst::SyntaxKind::{self, *};
use super::cst::kind_sets::{ANY_NODE, ANY_TOKEN};
use super::lexer::lex;
use super::symbol::{ShapeError, Symbol, SymbolTree, Token};

fn tok(kind: SyntaxKind, text: &str) -> Token {
    Token::new(kind, 1, 1, text)
}

fn tree(kind: SyntaxKind, children: Vec<Symbol>) -> SymbolTree {
    SymbolTree::new(kind, children).unwrap()
}

fn field(name: &str) -> SymbolTree {
    tree(Field, vec![tok(Identifier, name).into()])
}

fn number_value(digits: &str) -> SymbolTree {
    let number = tree(Number, vec![tok(Digits, digits).into()]);
    tree(Value, vec![number.into()])
}

fn leaf_condition(name: &str) -> SymbolTree {
    tree(
        ConditionalExpression,
        vec![
            field(name).into(),
            tree(ConditionalOperator, vec![tok(Equals, "=").into()]).into(),
            tree(Value, vec![tok(Str, "'Active'").into()]).into(),
        ],
    )
}

#[test]
fn token_end_column_is_start_plus_length() {
    let token = Token::new(Identifier, 3, 7, "[System.Id]");
    assert_eq!(token.line(), 3);
    assert_eq!(token.start_column(), 7);
    assert_eq!(token.end_column(), 18);

    let empty = Token::new(Str, 1, 4, "");
    assert_eq!(empty.end_column(), 4);
}

#[test]
fn eof_token_carries_previous() {
    let prev = tok(RParen, ")");
    let eof = Token::eof(1, 2, Some(prev.clone()));
    assert_eq!(eof.kind(), Eof);
    assert_eq!(eof.prev(), Some(&prev));
    assert_eq!(eof.end_column(), 2);
}

#[test]
fn occurrence_binding() {
    let node = tree(
        InGroup,
        vec![
            tok(Comma, ",").into(),
            tok(Identifier, "b").into(),
            tok(Dot, ".").into(),
            tok(Identifier, "d").into(),
        ],
    );
    let k = KindSet::single(Identifier);

    assert_eq!(node.nth_input(k, 1).and_then(Symbol::as_token).map(Token::text), Some("b"));
    assert_eq!(node.nth_input(k, 2).and_then(Symbol::as_token).map(Token::text), Some("d"));
    assert!(node.nth_input(k, 3).is_none());
    assert!(node.nth_input(k, 0).is_none());
    assert_eq!(node.input(k), node.nth_input(k, 1));
}

#[test]
fn occurrence_binding_over_kind_union() {
    let node = tree(
        InGroup,
        vec![
            tok(In, "IN").into(),
            tok(Digits, "1").into(),
            tok(Group, "GROUP").into(),
        ],
    );
    let k = KindSet::new(&[Group, In]);
    assert_eq!(node.nth_input(k, 1).map(Symbol::kind), Some(In));
    assert_eq!(node.nth_input(k, 2).map(Symbol::kind), Some(Group));
    assert!(node.nth_input(ANY_NODE, 1).is_none());
    assert_eq!(node.nth_input(ANY_TOKEN, 2).map(Symbol::kind), Some(Digits));
}

#[test]
fn roles_are_children_not_copies() {
    let node = leaf_condition("[System.State]");
    let bound = node.input(KindSet::single(Value)).unwrap();
    assert!(std::ptr::eq(bound, &node.children()[2]));

    let field_tree = node.tree(KindSet::single(Field)).unwrap();
    assert!(std::ptr::eq(field_tree, node.children()[0].as_tree().unwrap()));
}

#[test]
fn typed_helpers_filter_by_variant() {
    let node = leaf_condition("[x]");
    assert!(node.token(KindSet::single(Field)).is_none());
    assert!(node.tree(KindSet::single(Field)).is_some());
    assert!(node.has(KindSet::single(ConditionalOperator)));
    assert!(!node.has(KindSet::single(ValueList)));
}

#[test]
fn rejects_token_kinds() {
    assert_eq!(
        SymbolTree::new(Select, Vec::new()),
        Err(ShapeError::NotANodeKind(Select))
    );
    assert_eq!(
        SymbolTree::new(Eof, Vec::new()),
        Err(ShapeError::NotANodeKind(Eof))
    );
}

#[test]
fn rejects_missing_required_role() {
    assert_eq!(
        SymbolTree::new(Field, vec![tok(Str, "'x'").into()]),
        Err(ShapeError::MissingRole {
            node: Field,
            role: "identifier"
        })
    );
    assert_eq!(
        SymbolTree::new(ContainsWords, vec![tok(Contains, "CONTAINS").into()]),
        Err(ShapeError::MissingRole {
            node: ContainsWords,
            role: "words"
        })
    );
    assert_eq!(
        SymbolTree::new(FlatSelect, vec![tok(Select, "SELECT").into()]),
        Err(ShapeError::MissingRole {
            node: FlatSelect,
            role: "field list"
        })
    );
}

#[test]
fn rejects_offset_without_number() {
    let err = SymbolTree::new(
        Value,
        vec![tok(Variable, "@Today").into(), tok(Minus, "-").into()],
    );
    assert_eq!(
        err,
        Err(ShapeError::MissingRole {
            node: Value,
            role: "offset number"
        })
    );
}

#[test]
fn condition_shapes_are_exclusive() {
    let nested = tree(LogicalExpression, vec![leaf_condition("[a]").into()]);
    let both = SymbolTree::new(
        ConditionalExpression,
        vec![
            tok(LParen, "(").into(),
            nested.clone().into(),
            tok(RParen, ")").into(),
            field("[b]").into(),
            tree(ConditionalOperator, vec![tok(Equals, "=").into()]).into(),
            number_value("1").into(),
        ],
    );
    assert_eq!(both, Err(ShapeError::AmbiguousCondition(ConditionalExpression)));

    let neither = SymbolTree::new(LinkCondition, vec![field("[b]").into()]);
    assert_eq!(neither, Err(ShapeError::EmptyCondition(LinkCondition)));

    let only_nested = SymbolTree::new(
        ConditionalExpression,
        vec![tok(LParen, "(").into(), nested.into(), tok(RParen, ")").into()],
    );
    assert!(only_nested.is_ok());
}

#[test]
fn link_prefix_cannot_qualify_nested_condition() {
    let leaf = tree(
        LinkCondition,
        vec![
            field("[a]").into(),
            tree(ConditionalOperator, vec![tok(Equals, "=").into()]).into(),
            number_value("1").into(),
        ],
    );
    let nested = tree(LinkExpression, vec![leaf.into()]);
    let prefix = tree(
        SourcePrefix,
        vec![tok(Source, "Source").into(), tok(Dot, ".").into()],
    );

    let mixed = SymbolTree::new(
        LinkCondition,
        vec![
            prefix.into(),
            tok(LParen, "(").into(),
            nested.clone().into(),
            tok(RParen, ")").into(),
        ],
    );
    assert_eq!(mixed, Err(ShapeError::AmbiguousCondition(LinkCondition)));

    let plain = SymbolTree::new(
        LinkCondition,
        vec![tok(LParen, "(").into(), nested.into(), tok(RParen, ")").into()],
    );
    assert!(plain.is_ok());
}

#[test]
fn condition_needs_one_complete_operand() {
    let list = tree(
        ValueList,
        vec![number_value("1").into()],
    );
    let ok = SymbolTree::new(
        ConditionalExpression,
        vec![field("[a]").into(), tok(In, "IN").into(), list.clone().into()],
    );
    assert!(ok.is_ok());

    let missing_list = SymbolTree::new(
        ConditionalExpression,
        vec![field("[a]").into(), tok(In, "IN").into()],
    );
    assert_eq!(
        missing_list,
        Err(ShapeError::EmptyCondition(ConditionalExpression))
    );
}

#[test]
fn shape_error_messages() {
    insta::assert_snapshot!(
        ShapeError::MissingRole { node: Number, role: "digits" }.to_string(),
        @"`Number` is missing its digits"
    );
    insta::assert_snapshot!(
        ShapeError::AmbiguousCondition(LinkCondition).to_string(),
        @"`LinkCondition` has both a nested expression and a comparison"
    );
}

#[test]
fn descendants_are_pre_order() {
    let node = tree(
        FieldList,
        vec![
            field("[a]").into(),
            tok(Comma, ",").into(),
            tree(FieldList, vec![field("[b]").into()]).into(),
        ],
    );
    let kinds: Vec<_> = node.descendants().map(SymbolTree::kind).collect();
    assert_eq!(kinds, vec![FieldList, Field, FieldList, Field]);

    let texts: Vec<_> = node.tokens().into_iter().map(Token::text).collect();
    assert_eq!(texts, vec!["[a]", ",", "[b]"]);
}

#[test]
fn span_covers_first_to_last_token() {
    let source = "SELECT [a], [b] FROM WorkItems";
    let tokens = lex(source);
    let list = tree(
        FieldList,
        vec![
            tree(Field, vec![tokens[1].clone().into()]).into(),
            tokens[2].clone().into(),
            tree(FieldList, vec![tree(Field, vec![tokens[3].clone().into()]).into()]).into(),
        ],
    );
    let span = list.span().unwrap();
    assert_eq!(&source[std::ops::Range::<usize>::from(span)], "[a], [b]");
    assert_eq!(list.first_token().map(Token::text), Some("[a]"));
    assert_eq!(list.last_token().map(Token::text), Some("[b]"));

    let empty = tree(InGroup, Vec::new());
    assert!(empty.span().is_none());
}

#[test]
fn serializes_kinds_by_name() {
    let json = serde_json::to_value(field("[System.Id]")).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "kind": "Field",
            "children": [{
                "kind": "Identifier",
                "line": 1,
                "start_column": 1,
                "end_column": 12,
                "text": "[System.Id]"
            }]
        })
    );
}
