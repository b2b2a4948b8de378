use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use wiql_core::FieldLookup;
use wiql_lib::{Query, QueryBuilder};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("query is required: use positional argument or -q/--query")]
    MissingQuery,

    #[error("query cannot be empty")]
    EmptyQuery,

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("failed to read '{}': {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid field list '{}': {source}", path.display())]
    Fields {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Query text from `-q`, a file, or stdin when the path is "-".
pub fn load_query_source(
    query_path: Option<&Path>,
    query_text: Option<&str>,
) -> Result<String, LoadError> {
    let text = match (query_text, query_path) {
        (Some(text), _) => text.to_string(),
        (None, Some(path)) if path.as_os_str() == "-" => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(LoadError::Stdin)?;
            buf
        }
        (None, Some(path)) => read_file(path)?,
        (None, None) => return Err(LoadError::MissingQuery),
    };

    if text.trim().is_empty() {
        return Err(LoadError::EmptyQuery);
    }
    Ok(text)
}

pub fn load_fields(path: &Path) -> Result<FieldLookup, LoadError> {
    let json = read_file(path)?;
    FieldLookup::from_json(&json).map_err(|source| LoadError::Fields {
        path: path.to_path_buf(),
        source,
    })
}

fn read_file(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::File {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads query text or exits with status 1.
pub fn load_or_exit(query_path: Option<&Path>, query_text: Option<&str>) -> String {
    load_query_source(query_path, query_text).unwrap_or_else(|err| {
        eprintln!("error: {}", err);
        std::process::exit(1);
    })
}

/// Parses `source` or exits with status 1 on a fatal error.
pub fn parse_or_exit(source: &str, fuel: Option<u32>) -> Query<'_> {
    let mut builder = QueryBuilder::new(source);
    if let Some(fuel) = fuel {
        builder = builder.with_recursion_fuel(Some(fuel));
    }
    builder.build().unwrap_or_else(|err| {
        eprintln!("error: {}", err);
        std::process::exit(1);
    })
}
