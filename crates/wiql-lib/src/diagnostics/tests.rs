use rowan::TextRange;

use super::*;

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedFrom, range(0, 5))
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    insta::assert_snapshot!(diagnostics.to_string(), @"error at 0..5: expected `FROM`");
}

#[test]
fn report_with_custom_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedFrom, range(0, 5))
        .message("found `WHERE`")
        .emit();

    insta::assert_snapshot!(diagnostics.to_string(), @"error at 0..5: expected `FROM`, found `WHERE`");
}

#[test]
fn message_templates() {
    assert_eq!(
        DiagnosticKind::UnexpectedEof.message(Some("expected a value")),
        "unexpected end of query; expected a value"
    );
    assert_eq!(
        DiagnosticKind::ExpectedToken.message(Some("`)`, found `AND`")),
        "expected `)`, found `AND`"
    );
    assert_eq!(
        DiagnosticKind::UnknownField.message(Some("System.Nope")),
        "`System.Nope` is not a known field"
    );
    assert_eq!(
        DiagnosticKind::TrailingInput.message(Some("found `AND`")),
        "unexpected input after end of query: found `AND`"
    );
    assert_eq!(
        DiagnosticKind::ExpectedField.message(None),
        "expected a field"
    );
}

#[test]
fn default_hints_are_attached() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedDate, range(3, 4))
        .hint("dates are quoted")
        .emit();

    let diag = diagnostics.iter().next().unwrap();
    assert_eq!(
        diag.hints(),
        &["e.g., `ASOF '2024-01-31'`".to_string(), "dates are quoted".to_string()]
    );
    insta::assert_snapshot!(diagnostics.to_string(), @"error at 3..4: expected a date string (hint: e.g., `ASOF '2024-01-31'`) (hint: dates are quoted)");
}

#[test]
fn warnings_are_counted_separately() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::DuplicateField, range(0, 1))
        .message("System.Id")
        .emit();
    diagnostics
        .report(DiagnosticKind::UnknownField, range(2, 3))
        .message("Foo")
        .emit();

    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(diagnostics.warning_count(), 1);
    assert!(diagnostics.has_warnings());
    insta::assert_snapshot!(diagnostics.to_string(), @r"
    warning at 0..1: field `System.Id` is selected more than once
    error at 2..3: `Foo` is not a known field
    ");
}

#[test]
fn display_with_related() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedParen, range(0, 9))
        .related_to("`(` opened here", range(0, 1))
        .emit();

    insta::assert_snapshot!(diagnostics.to_string(), @"error at 0..9: missing closing `)` (related: `(` opened here at 0..1)");
}

#[test]
fn render_with_related() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedParen, range(0, 5))
        .related_to("opened here", range(6, 10))
        .emit();

    let result = diagnostics.printer("hello world!").render();
    assert_eq!(result.matches("missing closing").count(), 1);
    insta::assert_snapshot!(result, @r"
    error: missing closing `)`
      |
    1 | hello world!
      | ^^^^^ ---- opened here
    ");
}

#[test]
fn filtered_keeps_highest_priority_at_same_start() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownField, range(4, 8))
        .emit();
    diagnostics
        .report(DiagnosticKind::ExpectedValue, range(4, 5))
        .emit();
    diagnostics
        .report(DiagnosticKind::DuplicateField, range(10, 12))
        .emit();

    let filtered = diagnostics.filtered();
    let kinds: Vec<_> = filtered.iter().map(|d| d.kind()).collect();
    assert_eq!(
        kinds,
        vec![DiagnosticKind::ExpectedValue, DiagnosticKind::DuplicateField]
    );
}

#[test]
fn extend_merges_in_order() {
    let mut a = Diagnostics::new();
    a.report(DiagnosticKind::ExpectedSelect, range(0, 1)).emit();
    let mut b = Diagnostics::new();
    b.report(DiagnosticKind::UnknownField, range(2, 3)).emit();

    a.extend(b);
    let kinds: Vec<_> = a.iter().map(DiagnosticMessage::kind).collect();
    assert_eq!(
        kinds,
        vec![DiagnosticKind::ExpectedSelect, DiagnosticKind::UnknownField]
    );
}
