use std::path::PathBuf;

use super::query_loader::{load_fields, load_or_exit, parse_or_exit};

pub struct CheckArgs {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub fields: Option<PathBuf>,
    pub strict: bool,
    pub fuel: Option<u32>,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let source = load_or_exit(args.query_path.as_deref(), args.query_text.as_deref());
    let mut query = parse_or_exit(&source, args.fuel);

    if let Some(path) = &args.fields {
        let lookup = load_fields(path).unwrap_or_else(|err| {
            eprintln!("error: {}", err);
            std::process::exit(1);
        });
        query.validate_fields(&lookup);
    }

    let diagnostics = query.diagnostics();
    let is_valid = if args.strict {
        query.is_valid() && !diagnostics.has_warnings()
    } else {
        query.is_valid()
    };

    if !is_valid {
        eprint!("{}", diagnostics.render_colored(&source, args.color));
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}
