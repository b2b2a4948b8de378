use std::path::PathBuf;

use super::*;
use crate::cli::commands::{ast_command, check_command, fmt_command, tokens_command};

#[test]
fn tokens_params_from_path() {
    let m = tokens_command()
        .try_get_matches_from(["tokens", "query.wiql", "--json"])
        .unwrap();
    let params = TokensParams::from_matches(&m);

    assert_eq!(params.query_path, Some(PathBuf::from("query.wiql")));
    assert_eq!(params.query_text, None);
    assert!(params.json);
}

#[test]
fn inline_query_conflicts_with_path() {
    let result = ast_command().try_get_matches_from([
        "ast",
        "query.wiql",
        "-q",
        "SELECT [a] FROM WorkItems",
    ]);
    assert!(result.is_err());
}

#[test]
fn ast_params_extracts_all_fields() {
    let m = ast_command()
        .try_get_matches_from([
            "ast",
            "-q",
            "SELECT [a] FROM WorkItems",
            "--json",
            "--fuel",
            "16",
            "--color",
            "always",
        ])
        .unwrap();
    let params = AstParams::from_matches(&m);

    assert_eq!(params.query_path, None);
    assert_eq!(
        params.query_text.as_deref(),
        Some("SELECT [a] FROM WorkItems")
    );
    assert!(params.json);
    assert_eq!(params.fuel, Some(16));
    assert_eq!(params.color, ColorChoice::Always);
}

#[test]
fn fuel_must_be_a_number() {
    let result = fmt_command().try_get_matches_from(["fmt", "q.wiql", "--fuel", "lots"]);
    assert!(result.is_err());
}

#[test]
fn check_params_extracts_all_fields() {
    let m = check_command()
        .try_get_matches_from([
            "check",
            "query.wiql",
            "--fields",
            "fields.json",
            "--strict",
            "--color",
            "never",
        ])
        .unwrap();
    let params = CheckParams::from_matches(&m);

    assert_eq!(params.query_path, Some(PathBuf::from("query.wiql")));
    assert_eq!(params.fields, Some(PathBuf::from("fields.json")));
    assert!(params.strict);
    assert_eq!(params.fuel, None);
    assert_eq!(params.color, ColorChoice::Never);
}

#[test]
fn color_defaults_to_auto() {
    let m = check_command()
        .try_get_matches_from(["check", "query.wiql"])
        .unwrap();
    assert_eq!(CheckParams::from_matches(&m).color, ColorChoice::Auto);
}

#[test]
fn color_rejects_unknown_values() {
    let result = check_command().try_get_matches_from(["check", "q.wiql", "--color", "sometimes"]);
    assert!(result.is_err());
}

#[test]
fn tokens_does_not_take_fields() {
    let result = tokens_command().try_get_matches_from(["tokens", "q.wiql", "--fields", "f.json"]);
    assert!(result.is_err());
}

#[test]
fn check_help_lists_fields_flag() {
    let help = check_command().render_help().to_string();
    assert!(help.contains("--fields"));
    assert!(help.contains("--strict"));
}

#[test]
fn build_cli_requires_subcommand() {
    let result = build_cli().try_get_matches_from(["wiql"]);
    assert!(result.is_err());

    let m = build_cli()
        .try_get_matches_from(["wiql", "fmt", "-q", "SELECT [a] FROM WorkItems"])
        .unwrap();
    assert_eq!(m.subcommand_name(), Some("fmt"));
}
