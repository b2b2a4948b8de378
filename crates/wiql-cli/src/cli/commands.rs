//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("wiql")
        .about("Inspect, format and validate WIQL queries")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(tokens_command())
        .subcommand(ast_command())
        .subcommand(fmt_command())
        .subcommand(check_command())
}

/// Print the token stream of a query.
pub fn tokens_command() -> Command {
    Command::new("tokens")
        .about("Show the tokens of a query")
        .override_usage(
            "\
  wiql tokens <QUERY>
  wiql tokens -q <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  wiql tokens query.wiql
  wiql tokens -q 'SELECT [System.Id] FROM WorkItems' --json"#,
        )
        .arg(query_path_arg())
        .arg(query_text_arg())
        .arg(json_arg())
}

/// Print the symbol tree of a query.
pub fn ast_command() -> Command {
    Command::new("ast")
        .about("Show the symbol tree of a query")
        .override_usage(
            "\
  wiql ast <QUERY>
  wiql ast -q <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  wiql ast query.wiql
  wiql ast -q 'SELECT [System.Id] FROM WorkItems' --json"#,
        )
        .arg(query_path_arg())
        .arg(query_text_arg())
        .arg(json_arg())
        .arg(fuel_arg())
        .arg(color_arg())
}

/// Print a query in canonical form.
pub fn fmt_command() -> Command {
    Command::new("fmt")
        .about("Print a query in canonical form")
        .override_usage(
            "\
  wiql fmt <QUERY>
  wiql fmt -q <TEXT>",
        )
        .arg(query_path_arg())
        .arg(query_text_arg())
        .arg(fuel_arg())
        .arg(color_arg())
}

/// Validate a query.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Validate a query")
        .override_usage(
            "\
  wiql check <QUERY>
  wiql check <QUERY> --fields <FILE>
  wiql check -q <TEXT> [--fields <FILE>]",
        )
        .after_help(
            r#"EXAMPLES:
  wiql check query.wiql                    # syntax only
  wiql check query.wiql --fields f.json    # also resolve field names
  wiql check -q 'SELECT [x] FROM WorkItems' --strict"#,
        )
        .arg(query_path_arg())
        .arg(query_text_arg())
        .arg(fields_arg())
        .arg(strict_arg())
        .arg(fuel_arg())
        .arg(color_arg())
}
