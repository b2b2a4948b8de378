//! Show the symbol tree of a query.

use std::path::PathBuf;

use super::query_loader::{load_or_exit, parse_or_exit};

pub struct AstArgs {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub json: bool,
    pub fuel: Option<u32>,
    pub color: bool,
}

pub fn run(args: AstArgs) {
    let source = load_or_exit(args.query_path.as_deref(), args.query_text.as_deref());
    let query = parse_or_exit(&source, args.fuel);

    let diagnostics = query.diagnostics();
    if !diagnostics.is_empty() {
        eprint!("{}", diagnostics.render_colored(&source, args.color));
    }

    let Some(root) = query.root() else {
        std::process::exit(1);
    };

    if args.json {
        match serde_json::to_string_pretty(root) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print!("{}", query.dump_cst());
    }
}
