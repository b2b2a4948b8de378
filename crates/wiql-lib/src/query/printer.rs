//! Canonical WIQL formatting.
//!
//! Keywords are upper-cased and separated by single spaces. Field names,
//! string literals and variables are printed exactly as written.

use std::fmt::Write;

use crate::parser::ast::{
    Comparison, Condition, ConditionalOperator, DateTime, Field, FieldList, LinkExpression,
    LinkOrderByFieldList, LinkPrefix, LogicalExpression, Number, Operand, OrderByFieldList, Select,
    Term, Value, ValueList,
};
use crate::parser::{SyntaxKind, Token};

/// Prints a query in canonical form.
pub fn format_select(select: Select<'_>) -> String {
    let mut out = String::new();
    write_select(select, &mut out).expect("String write never fails");
    out
}

fn write_select(select: Select<'_>, w: &mut impl Write) -> std::fmt::Result {
    w.write_str("SELECT ")?;
    write_field_list(select.field_list(), w)?;

    match select {
        Select::Flat(flat) => {
            w.write_str(" FROM WorkItems")?;
            if let Some(expr) = flat.where_exp() {
                w.write_str(" WHERE ")?;
                write_logical(expr, w)?;
            }
            if let Some(order) = flat.order_by() {
                w.write_str(" ORDER BY ")?;
                write_order_list(order, w)?;
            }
            write_as_of(flat.as_of(), w)?;
        }
        Select::OneHop(one_hop) => {
            w.write_str(" FROM WorkItemLinks")?;
            if let Some(expr) = one_hop.where_exp() {
                w.write_str(" WHERE ")?;
                write_link_expr(expr, w)?;
            }
            if let Some(order) = one_hop.order_by() {
                w.write_str(" ORDER BY ")?;
                write_link_order_list(order, w)?;
            }
            write_as_of(one_hop.as_of(), w)?;
            if let Some(mode) = one_hop.mode() {
                write!(w, " MODE ({})", keyword(mode))?;
            }
        }
        Select::Recursive(recursive) => {
            w.write_str(" FROM WorkItemLinks")?;
            if let Some(expr) = recursive.where_exp() {
                w.write_str(" WHERE ")?;
                write_link_expr(expr, w)?;
            }
            if let Some(order) = recursive.order_by() {
                w.write_str(" ORDER BY ")?;
                write_link_order_list(order, w)?;
            }
            write_as_of(recursive.as_of(), w)?;
            w.write_str(" MODE (Recursive")?;
            if let Some(matching) = recursive.matching_children() {
                write!(w, ", {}", keyword(matching))?;
            }
            w.write_char(')')?;
        }
    }
    Ok(())
}

/// Canonical spelling of a fixed-text token, the source text otherwise.
fn keyword(token: &Token) -> &str {
    token.kind().canonical_text().unwrap_or(token.text())
}

fn write_field(field: Field<'_>, w: &mut impl Write) -> std::fmt::Result {
    w.write_str(field.identifier().text())
}

fn write_field_list(list: FieldList<'_>, w: &mut impl Write) -> std::fmt::Result {
    for (i, field) in list.fields().enumerate() {
        if i > 0 {
            w.write_str(", ")?;
        }
        write_field(field, w)?;
    }
    Ok(())
}

fn write_order_list(list: OrderByFieldList<'_>, w: &mut impl Write) -> std::fmt::Result {
    for (i, item) in list.iter().enumerate() {
        if i > 0 {
            w.write_str(", ")?;
        }
        write_field(item.field(), w)?;
        if let Some(dir) = item.asc_desc() {
            write!(w, " {}", keyword(dir))?;
        }
    }
    Ok(())
}

fn write_link_order_list(list: LinkOrderByFieldList<'_>, w: &mut impl Write) -> std::fmt::Result {
    for (i, item) in list.iter().enumerate() {
        if i > 0 {
            w.write_str(", ")?;
        }
        write_prefix(item.prefix(), w)?;
        write_field(item.field(), w)?;
        if let Some(dir) = item.asc_desc() {
            write!(w, " {}", keyword(dir))?;
        }
    }
    Ok(())
}

fn write_prefix(prefix: Option<LinkPrefix<'_>>, w: &mut impl Write) -> std::fmt::Result {
    match prefix {
        Some(LinkPrefix::Source(p)) => write!(w, "{}.", keyword(p.source())),
        Some(LinkPrefix::Target(p)) => write!(w, "{}.", keyword(p.target())),
        None => Ok(()),
    }
}

fn write_as_of(as_of: Option<DateTime<'_>>, w: &mut impl Write) -> std::fmt::Result {
    match as_of {
        Some(date) => write!(w, " ASOF {}", date.date_string().text()),
        None => Ok(()),
    }
}

fn write_logical(expr: LogicalExpression<'_>, w: &mut impl Write) -> std::fmt::Result {
    for link in expr.iter() {
        if let Some(modifier) = link.ever_not() {
            write!(w, "{} ", keyword(modifier))?;
        }
        match link.condition().shape() {
            Condition::Nested(inner) => {
                w.write_char('(')?;
                write_logical(inner, w)?;
                w.write_char(')')?;
            }
            Condition::Leaf(comparison) => write_comparison(comparison, w)?,
        }
        if let Some(op) = link.or_and() {
            write!(w, " {} ", keyword(op))?;
        }
    }
    Ok(())
}

fn write_link_expr(expr: LinkExpression<'_>, w: &mut impl Write) -> std::fmt::Result {
    for link in expr.iter() {
        if let Some(modifier) = link.ever_not() {
            write!(w, "{} ", keyword(modifier))?;
        }
        let condition = link.condition();
        match condition.shape() {
            Condition::Nested(inner) => {
                w.write_char('(')?;
                write_link_expr(inner, w)?;
                w.write_char(')')?;
            }
            Condition::Leaf(comparison) => {
                write_prefix(condition.prefix(), w)?;
                write_comparison(comparison, w)?;
            }
        }
        if let Some(op) = link.or_and() {
            write!(w, " {} ", keyword(op))?;
        }
    }
    Ok(())
}

fn write_comparison(comparison: Comparison<'_>, w: &mut impl Write) -> std::fmt::Result {
    write_field(comparison.field, w)?;
    match comparison.operand {
        Operand::Compare { operator, value } => {
            w.write_char(' ')?;
            write_operator(operator, w)?;
            w.write_char(' ')?;
            write_value(value, w)
        }
        Operand::In { in_token, list } => {
            if let Some(not) = comparison.not {
                write!(w, " {}", keyword(not))?;
            }
            write!(w, " {} (", keyword(in_token))?;
            write_value_list(list, w)?;
            w.write_char(')')
        }
    }
}

fn write_operator(operator: ConditionalOperator<'_>, w: &mut impl Write) -> std::fmt::Result {
    if let Some(not) = operator.not() {
        write!(w, "{} ", keyword(not))?;
    }
    match operator.operator_kind() {
        SyntaxKind::ContainsWords => w.write_str("CONTAINS WORDS"),
        SyntaxKind::InGroup => w.write_str("IN GROUP"),
        kind => w.write_str(kind.canonical_text().unwrap_or_default()),
    }
}

fn write_number(number: Number<'_>, w: &mut impl Write) -> std::fmt::Result {
    if number.minus().is_some() {
        w.write_char('-')?;
    }
    w.write_str(number.digits().text())
}

fn write_value(value: Value<'_>, w: &mut impl Write) -> std::fmt::Result {
    match value.value() {
        Term::Number(number) => write_number(number, w)?,
        Term::String(token) | Term::Variable(token) => w.write_str(token.text())?,
        Term::Boolean(token) => w.write_str(keyword(token))?,
        Term::DateTime(date) => w.write_str(date.date_string().text())?,
        Term::Field(field) => write_field(field, w)?,
    }
    if let (Some(op), Some(num)) = (value.operator(), value.num()) {
        write!(w, " {} ", keyword(op))?;
        write_number(num, w)?;
    }
    Ok(())
}

fn write_value_list(list: ValueList<'_>, w: &mut impl Write) -> std::fmt::Result {
    for (i, value) in list.values().enumerate() {
        if i > 0 {
            w.write_str(", ")?;
        }
        write_value(value, w)?;
    }
    Ok(())
}
