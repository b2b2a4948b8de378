//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! `*Params` structs mirror the command `*Args` but are populated from clap;
//! `Into<*Args>` impls bridge dispatch to the command handlers.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::ast::AstArgs;
use crate::commands::check::CheckArgs;
use crate::commands::fmt::FmtArgs;
use crate::commands::tokens::TokensArgs;

pub struct TokensParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub json: bool,
}

impl TokensParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
            json: m.get_flag("json"),
        }
    }
}

impl From<TokensParams> for TokensArgs {
    fn from(p: TokensParams) -> Self {
        Self {
            query_path: p.query_path,
            query_text: p.query_text,
            json: p.json,
        }
    }
}

pub struct AstParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub json: bool,
    pub fuel: Option<u32>,
    pub color: ColorChoice,
}

impl AstParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
            json: m.get_flag("json"),
            fuel: m.get_one::<u32>("fuel").copied(),
            color: parse_color(m),
        }
    }
}

impl From<AstParams> for AstArgs {
    fn from(p: AstParams) -> Self {
        Self {
            query_path: p.query_path,
            query_text: p.query_text,
            json: p.json,
            fuel: p.fuel,
            color: p.color.should_colorize(),
        }
    }
}

pub struct FmtParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub fuel: Option<u32>,
    pub color: ColorChoice,
}

impl FmtParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
            fuel: m.get_one::<u32>("fuel").copied(),
            color: parse_color(m),
        }
    }
}

impl From<FmtParams> for FmtArgs {
    fn from(p: FmtParams) -> Self {
        Self {
            query_path: p.query_path,
            query_text: p.query_text,
            fuel: p.fuel,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub fields: Option<PathBuf>,
    pub strict: bool,
    pub fuel: Option<u32>,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
            fields: m.get_one::<PathBuf>("fields").cloned(),
            strict: m.get_flag("strict"),
            fuel: m.get_one::<u32>("fuel").copied(),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            query_path: p.query_path,
            query_text: p.query_text,
            fields: p.fields,
            strict: p.strict,
            fuel: p.fuel,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
