use wiql_core::{FieldLookup, WorkItemField};

use crate::Query;
use crate::diagnostics::DiagnosticKind;

fn lookup() -> FieldLookup {
    FieldLookup::new(vec![
        WorkItemField::new("ID", "System.Id"),
        WorkItemField::new("Title", "System.Title"),
        WorkItemField::new("State", "System.State"),
        WorkItemField::new("Assigned To", "System.AssignedTo"),
    ])
}

fn validated(source: &str) -> Query<'_> {
    let mut query = Query::try_from(source).unwrap();
    query.validate_fields(&lookup());
    query
}

#[test]
fn known_fields_pass() {
    let query = validated(
        "SELECT [System.Id], [Title] FROM WorkItems WHERE [assigned to] = @Me ORDER BY system.state",
    );
    assert!(query.is_valid());
    assert!(query.diagnostics().is_empty());
}

#[test]
fn unknown_field() {
    let query = validated("SELECT [System.Id] FROM WorkItems WHERE [System.Nope] = 1");
    assert!(!query.is_valid());
    insta::assert_snapshot!(
        query.diagnostics().to_string(),
        @"error at 40..53: `System.Nope` is not a known field"
    );
}

#[test]
fn unknown_fields_in_every_clause() {
    let query = validated(
        "SELECT [a] FROM WorkItemLinks WHERE [Source].[b] IN ([c]) ORDER BY [Target].[d]",
    );
    let names: Vec<_> = query
        .diagnostics()
        .iter()
        .filter(|d| d.kind() == DiagnosticKind::UnknownField)
        .map(|d| d.message().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "`a` is not a known field",
            "`b` is not a known field",
            "`c` is not a known field",
            "`d` is not a known field",
        ]
    );
}

#[test]
fn duplicate_field_is_warning() {
    let query = validated("SELECT [System.Id], [ID], [Title] FROM WorkItems");
    assert!(query.is_valid());
    let diagnostics = query.diagnostics();
    assert_eq!(diagnostics.warning_count(), 1);
    insta::assert_snapshot!(
        diagnostics.to_string(),
        @"warning at 20..24: field `ID` is selected more than once (related: first selected here at 7..18)"
    );
}

#[test]
fn unknown_fields_are_not_duplicates() {
    let query = validated("SELECT [x], [x] FROM WorkItems");
    let kinds: Vec<_> = query.diagnostics().iter().map(|d| d.kind()).collect();
    assert_eq!(
        kinds,
        vec![DiagnosticKind::UnknownField, DiagnosticKind::UnknownField]
    );
}

#[test]
fn revalidation_replaces_results() {
    let mut query = Query::try_from("SELECT [Priority] FROM WorkItems").unwrap();
    query.validate_fields(&lookup());
    assert!(!query.is_valid());

    let mut fields = lookup().values().to_vec();
    fields.push(WorkItemField::new("Priority", "Microsoft.VSTS.Common.Priority"));
    query.validate_fields(&FieldLookup::new(fields));
    assert!(query.is_valid());
}

#[test]
fn syntax_errors_skip_validation() {
    let query = validated("SELECT [nope] FROM");
    let kinds: Vec<_> = query.diagnostics().iter().map(|d| d.kind()).collect();
    assert_eq!(kinds, vec![DiagnosticKind::UnexpectedEof]);
}
