//! Print a query in canonical form.

use std::path::PathBuf;

use wiql_lib::format_select;

use super::query_loader::{load_or_exit, parse_or_exit};

pub struct FmtArgs {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub fuel: Option<u32>,
    pub color: bool,
}

pub fn run(args: FmtArgs) {
    let source = load_or_exit(args.query_path.as_deref(), args.query_text.as_deref());
    let query = parse_or_exit(&source, args.fuel);

    // Trailing input is not part of the formatted select.
    if !query.is_valid() {
        eprint!("{}", query.diagnostics().render_colored(&source, args.color));
        std::process::exit(1);
    }

    if let Some(select) = query.select() {
        println!("{}", format_select(select));
    }
}
