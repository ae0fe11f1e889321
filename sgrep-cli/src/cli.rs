//! Argument parsing: one `search` subcommand, `clap::Command` builder
//! style, matching this codebase's CLI binary conventions.

use clap::{Arg, ArgAction, Command, ValueHint};

pub struct SearchArgs {
    pub pattern: String,
    pub path: String,
    pub json: bool,
    pub no_color: bool,
    pub context: bool,
}

fn build_cli() -> Command {
    Command::new("sgrep")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Structural pattern search over a token-plus-indentation tree")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("search")
                .about("Search files for a structural pattern")
                .arg(
                    Arg::new("pattern")
                        .help("Pattern text, or a path to a file containing it")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("path")
                        .help("File or directory to search")
                        .required(true)
                        .index(2)
                        .value_hint(ValueHint::AnyPath),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Emit matches as structured JSON instead of rendered text")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("no-color")
                        .long("no-color")
                        .help("Disable highlighting even on a color-capable terminal")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("context")
                        .long("context")
                        .help("Always print a path:line heading, even for a single file")
                        .action(ArgAction::SetTrue),
                )
                .after_help(
                    "An explicit end-of-pattern marker `;;end` matches even with trailing \
                     document content; without it, trailing content must be consumed or \
                     ellipsis-spanned.",
                ),
        )
}

/// Parse process arguments into [`SearchArgs`]. Returns `Err` with a
/// clap-rendered message on a missing/invalid argument.
pub fn parse(args: impl IntoIterator<Item = String>) -> Result<SearchArgs, String> {
    let matches = build_cli()
        .try_get_matches_from(args)
        .map_err(|e| e.to_string())?;

    let (_, search) = matches
        .subcommand()
        .ok_or_else(|| "expected the `search` subcommand".to_string())?;

    Ok(SearchArgs {
        pattern: search.get_one::<String>("pattern").unwrap().clone(),
        path: search.get_one::<String>("path").unwrap().clone(),
        json: search.get_flag("json"),
        no_color: search.get_flag("no-color"),
        context: search.get_flag("context"),
    })
}
