//! Grammar productions for WIQL.
//!
//! Every matched token stays in its node's children (keywords and
//! punctuation included), so nodes cover their full source range.

use super::core::Parser;
use super::cst::SyntaxKind::{self, *};
use super::cst::kind_sets::{
    AND_OR, ASC_DESC, COMPARISON_OPERATORS, EVER_NOT, PLUS_MINUS, VALUE_FIRST,
};
use super::cst::KindSet;
use super::symbol::{Symbol, SymbolTree};
use crate::diagnostics::DiagnosticKind;

const LINK_SIDE: KindSet = KindSet::new(&[Source, Target]);

impl Parser {
    /// `query EOF`. Input after a complete query is reported but the root is kept.
    pub(super) fn parse_root(&mut self) -> Option<SymbolTree> {
        let root = self.query()?;
        if !self.currently_is(Eof) {
            self.error_trailing_input();
        }
        Some(root)
    }

    /// `SELECT field_list FROM (flat_tail | link_tail)`
    fn query(&mut self) -> Option<SymbolTree> {
        let mut children: Vec<Symbol> =
            vec![self.expect(Select, DiagnosticKind::ExpectedSelect)?.into()];
        children.push(self.field_list()?.into());
        children.push(self.expect(From, DiagnosticKind::ExpectedFrom)?.into());
        match self.current() {
            WorkItems => self.flat_tail(children),
            WorkItemLinks => self.link_tail(children),
            _ => {
                self.error(DiagnosticKind::ExpectedSource);
                None
            }
        }
    }

    /// `WorkItems [WHERE logical_expr] [ORDER BY order_list] [ASOF date]`
    fn flat_tail(&mut self, mut children: Vec<Symbol>) -> Option<SymbolTree> {
        self.assert_current(WorkItems);
        children.push(self.bump().into());

        if let Some(kw) = self.eat(Where) {
            children.push(kw.into());
            children.push(self.logical_expr()?.into());
        }
        if let Some(kw) = self.eat(OrderBy) {
            children.push(kw.into());
            children.push(self.order_list()?.into());
        }
        if let Some(kw) = self.eat(Asof) {
            children.push(kw.into());
            children.push(self.date()?.into());
        }
        if self.currently_is(Mode) {
            self.error(DiagnosticKind::ModeInFlatQuery);
            return None;
        }

        self.node(FlatSelect, children)
    }

    /// `WorkItemLinks [WHERE link_expr] [ORDER BY link_order_list] {ASOF date | MODE (mode)}`
    ///
    /// `ASOF` and `MODE` may come in either order, each at most once.
    fn link_tail(&mut self, mut children: Vec<Symbol>) -> Option<SymbolTree> {
        self.assert_current(WorkItemLinks);
        children.push(self.bump().into());

        if let Some(kw) = self.eat(Where) {
            children.push(kw.into());
            children.push(self.link_expr()?.into());
        }
        if let Some(kw) = self.eat(OrderBy) {
            children.push(kw.into());
            children.push(self.link_order_list()?.into());
        }

        let mut kind = OneHopSelect;
        let mut seen_asof = false;
        let mut seen_mode = false;
        loop {
            match self.current() {
                Asof if !seen_asof => {
                    seen_asof = true;
                    children.push(self.bump().into());
                    children.push(self.date()?.into());
                }
                Mode if !seen_mode => {
                    seen_mode = true;
                    kind = self.mode_clause(&mut children)?;
                }
                _ => break,
            }
        }

        self.node(kind, children)
    }

    /// `MODE ( MustContain | MayContain | DoesNotContain | Recursive [, ReturnMatchingChildren] )`
    ///
    /// Returns the select kind the mode implies.
    fn mode_clause(&mut self, children: &mut Vec<Symbol>) -> Option<SyntaxKind> {
        self.assert_current(Mode);
        children.push(self.bump().into());
        let open = self.expect_token(LParen)?;
        let open_span = open.span();
        children.push(open.into());

        let kind = match self.current() {
            MustContain | MayContain | DoesNotContain => {
                children.push(self.bump().into());
                OneHopSelect
            }
            Recursive => {
                children.push(self.bump().into());
                if let Some(comma) = self.eat(Comma) {
                    children.push(comma.into());
                    children.push(self.expect_token(ReturnMatchingChildren)?.into());
                }
                RecursiveSelect
            }
            _ => {
                self.error(DiagnosticKind::ExpectedMode);
                return None;
            }
        };

        children.push(self.close_paren(open_span)?.into());
        Some(kind)
    }

    fn field(&mut self) -> Option<SymbolTree> {
        let identifier = self.expect(Identifier, DiagnosticKind::ExpectedField)?;
        self.node(Field, vec![identifier.into()])
    }

    /// `field {, field}`
    fn field_list(&mut self) -> Option<SymbolTree> {
        let mut elements = Vec::new();
        loop {
            let mut children: Vec<Symbol> = vec![self.field()?.into()];
            let comma = self.eat(Comma);
            let more = comma.is_some();
            children.extend(comma.map(Symbol::from));
            elements.push(children);
            if !more {
                break;
            }
        }
        self.chain(FieldList, elements)
    }

    /// `field [ASC|DESC] {, field [ASC|DESC]}`
    fn order_list(&mut self) -> Option<SymbolTree> {
        let mut elements = Vec::new();
        loop {
            let mut children: Vec<Symbol> = vec![self.field()?.into()];
            children.extend(self.eat_one_of(ASC_DESC).map(Symbol::from));
            let comma = self.eat(Comma);
            let more = comma.is_some();
            children.extend(comma.map(Symbol::from));
            elements.push(children);
            if !more {
                break;
            }
        }
        self.chain(OrderByFieldList, elements)
    }

    /// `[prefix] field [ASC|DESC] {, [prefix] field [ASC|DESC]}`
    fn link_order_list(&mut self) -> Option<SymbolTree> {
        let mut elements = Vec::new();
        loop {
            let mut children: Vec<Symbol> = Vec::new();
            if self.currently_is_one_of(LINK_SIDE) {
                children.push(self.prefix()?.into());
            }
            children.push(self.field()?.into());
            children.extend(self.eat_one_of(ASC_DESC).map(Symbol::from));
            let comma = self.eat(Comma);
            let more = comma.is_some();
            children.extend(comma.map(Symbol::from));
            elements.push(children);
            if !more {
                break;
            }
        }
        self.chain(LinkOrderByFieldList, elements)
    }

    /// `(Source | Target) .`
    fn prefix(&mut self) -> Option<SymbolTree> {
        let side = self.bump();
        let kind = if side.kind() == Source {
            SourcePrefix
        } else {
            TargetPrefix
        };
        let dot = self.expect_token(Dot)?;
        self.node(kind, vec![side.into(), dot.into()])
    }

    /// `[EVER|NOT] condition {(AND|OR) [EVER|NOT] condition}`
    fn logical_expr(&mut self) -> Option<SymbolTree> {
        let mut elements = Vec::new();
        loop {
            let mut children: Vec<Symbol> = Vec::new();
            children.extend(self.eat_one_of(EVER_NOT).map(Symbol::from));
            children.push(self.condition()?.into());
            let op = self.eat_one_of(AND_OR);
            let more = op.is_some();
            children.extend(op.map(Symbol::from));
            elements.push(children);
            if !more {
                break;
            }
        }
        self.chain(LogicalExpression, elements)
    }

    /// `[EVER|NOT] link_condition {(AND|OR) [EVER|NOT] link_condition}`
    fn link_expr(&mut self) -> Option<SymbolTree> {
        let mut elements = Vec::new();
        loop {
            let mut children: Vec<Symbol> = Vec::new();
            children.extend(self.eat_one_of(EVER_NOT).map(Symbol::from));
            children.push(self.link_condition()?.into());
            let op = self.eat_one_of(AND_OR);
            let more = op.is_some();
            children.extend(op.map(Symbol::from));
            elements.push(children);
            if !more {
                break;
            }
        }
        self.chain(LinkExpression, elements)
    }

    /// `( logical_expr ) | field comparison`
    fn condition(&mut self) -> Option<SymbolTree> {
        if self.currently_is(LParen) {
            let open = self.bump();
            let open_span = open.span();
            let expr = self.nested(Self::logical_expr)?;
            let close = self.close_paren(open_span)?;
            return self.node(
                ConditionalExpression,
                vec![open.into(), expr.into(), close.into()],
            );
        }
        if !self.currently_is(Identifier) {
            self.error(DiagnosticKind::ExpectedCondition);
            return None;
        }
        let mut children: Vec<Symbol> = vec![self.field()?.into()];
        self.comparison(&mut children)?;
        self.node(ConditionalExpression, children)
    }

    /// `( link_expr ) | [prefix] field comparison`
    fn link_condition(&mut self) -> Option<SymbolTree> {
        if self.currently_is(LParen) {
            let open = self.bump();
            let open_span = open.span();
            let expr = self.nested(Self::link_expr)?;
            let close = self.close_paren(open_span)?;
            return self.node(
                LinkCondition,
                vec![open.into(), expr.into(), close.into()],
            );
        }
        let mut children: Vec<Symbol> = Vec::new();
        if self.currently_is_one_of(LINK_SIDE) {
            children.push(self.prefix()?.into());
        } else if !self.currently_is(Identifier) {
            self.error(DiagnosticKind::ExpectedCondition);
            return None;
        }
        children.push(self.field()?.into());
        self.comparison(&mut children)?;
        self.node(LinkCondition, children)
    }

    /// `[NOT] IN ( value_list ) | operator value`
    ///
    /// `IN` followed by `GROUP` is the `IN GROUP` operator, not a list test.
    fn comparison(&mut self, children: &mut Vec<Symbol>) -> Option<()> {
        let not_in = self.currently_is(Not) && self.nth(1) == In && self.nth(2) != Group;
        let plain_in = self.currently_is(In) && self.nth(1) != Group;

        if not_in || plain_in {
            if not_in {
                children.push(self.bump().into());
            }
            children.push(self.bump().into());
            let open = self.expect_token(LParen)?;
            let open_span = open.span();
            children.push(open.into());
            children.push(self.value_list()?.into());
            children.push(self.close_paren(open_span)?.into());
            return Some(());
        }

        children.push(self.operator()?.into());
        children.push(self.value()?.into());
        Some(())
    }

    /// `[NOT] (EVER | = | <> | > | >= | < | <= | LIKE | UNDER | CONTAINS [WORDS] | IN GROUP)`
    fn operator(&mut self) -> Option<SymbolTree> {
        let mut children: Vec<Symbol> = Vec::new();
        if let Some(not) = self.eat(Not) {
            children.push(not.into());
        }

        match self.current() {
            Contains => {
                let contains = self.bump();
                match self.eat(Words) {
                    Some(words) => {
                        let node = self.node(ContainsWords, vec![contains.into(), words.into()])?;
                        children.push(node.into());
                    }
                    None => children.push(contains.into()),
                }
            }
            In => {
                let in_token = self.bump();
                let group = self.expect_token(Group)?;
                let node = self.node(InGroup, vec![in_token.into(), group.into()])?;
                children.push(node.into());
            }
            Ever => children.push(self.bump().into()),
            kind if COMPARISON_OPERATORS.contains(kind) => children.push(self.bump().into()),
            _ => {
                self.error(DiagnosticKind::ExpectedOperator);
                return None;
            }
        }

        self.node(ConditionalOperator, children)
    }

    /// `(number | String | Variable | TRUE | FALSE | field) [(+|-) number]`
    fn value(&mut self) -> Option<SymbolTree> {
        if !self.currently_is_one_of(VALUE_FIRST) {
            self.error(DiagnosticKind::ExpectedValue);
            return None;
        }
        let mut children: Vec<Symbol> = Vec::new();
        match self.current() {
            Digits | Minus => children.push(self.number()?.into()),
            Identifier => children.push(self.field()?.into()),
            _ => children.push(self.bump().into()),
        }
        if let Some(op) = self.eat_one_of(PLUS_MINUS) {
            children.push(op.into());
            children.push(self.number()?.into());
        }
        self.node(Value, children)
    }

    /// `[-] Digits`
    fn number(&mut self) -> Option<SymbolTree> {
        let mut children: Vec<Symbol> = Vec::new();
        if let Some(minus) = self.eat(Minus) {
            children.push(minus.into());
        }
        children.push(self.expect_token(Digits)?.into());
        self.node(Number, children)
    }

    /// `value {, value}`
    fn value_list(&mut self) -> Option<SymbolTree> {
        let mut elements = Vec::new();
        loop {
            let mut children: Vec<Symbol> = vec![self.value()?.into()];
            let comma = self.eat(Comma);
            let more = comma.is_some();
            children.extend(comma.map(Symbol::from));
            elements.push(children);
            if !more {
                break;
            }
        }
        self.chain(ValueList, elements)
    }

    /// A string literal read as a date.
    fn date(&mut self) -> Option<SymbolTree> {
        let date = self.expect(Str, DiagnosticKind::ExpectedDate)?;
        self.node(DateTime, vec![date.into()])
    }
}
