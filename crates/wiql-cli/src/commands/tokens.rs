//! Show the token stream of a query.

use std::path::PathBuf;

use wiql_lib::parser::lex;

use super::query_loader::load_or_exit;

pub struct TokensArgs {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub json: bool,
}

pub fn run(args: TokensArgs) {
    let source = load_or_exit(args.query_path.as_deref(), args.query_text.as_deref());

    // Lexing never fails; error tokens show up in the listing.
    let tokens = lex(&source);
    if args.json {
        match serde_json::to_string_pretty(&tokens) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    for token in &tokens {
        println!(
            "{} {}:{}-{} {:?}",
            token.kind(),
            token.line(),
            token.start_column(),
            token.end_column(),
            token.text()
        );
    }
}
