use std::path::Path;

use super::query_loader::{LoadError, load_fields, load_query_source};

#[test]
fn inline_text_wins() {
    let text = load_query_source(Some(Path::new("missing.wiql")), Some("SELECT [a] FROM WorkItems"));
    assert_eq!(text.unwrap(), "SELECT [a] FROM WorkItems");
}

#[test]
fn missing_query() {
    let err = load_query_source(None, None).unwrap_err();
    assert!(matches!(err, LoadError::MissingQuery));
}

#[test]
fn blank_query_is_empty() {
    let err = load_query_source(None, Some("  \n")).unwrap_err();
    assert_eq!(err.to_string(), "query cannot be empty");
}

#[test]
fn unreadable_file() {
    let err = load_query_source(Some(Path::new("/nonexistent/q.wiql")), None).unwrap_err();
    assert!(matches!(err, LoadError::File { .. }));
    assert!(err.to_string().starts_with("failed to read '/nonexistent/q.wiql'"));
}

#[test]
fn unreadable_fields_file() {
    let err = load_fields(Path::new("/nonexistent/fields.json")).unwrap_err();
    assert!(matches!(err, LoadError::File { .. }));
}
