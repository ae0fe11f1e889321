//! `sgrep` binary: wires the parser, matcher, config loader, and renderer
//! together behind a small `clap` front end.

mod cli;
mod error;
mod json;

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use error::CliError;
use ignore::WalkBuilder;
use sgrep_config::ColorMode;
use sgrep_render::{RenderOptions, Source};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("sgrep: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CliError> {
    let args = cli::parse(std::env::args()).map_err(CliError::Usage)?;

    let pattern_text = read_pattern_source(&args.pattern)?;
    let pattern = sgrep_parser::lex_pattern(&pattern_text).map_err(CliError::Pattern)?;

    let cwd = std::env::current_dir().map_err(|source| CliError::Io {
        path: PathBuf::from("."),
        source,
    })?;
    let config = sgrep_config::load_from(&cwd).map_err(|e| CliError::Config(e.to_string()))?;

    let color = resolve_color(args.no_color, config.color);

    let target = Path::new(&args.path);
    let files = collect_files(target, &config.extensions)?;

    let mut results = Vec::new();
    for path in files {
        let text = std::fs::read_to_string(&path).map_err(|source| CliError::Io {
            path: path.clone(),
            source,
        })?;
        let document = sgrep_parser::lex_document(&text);
        let matches = sgrep_core::search(&pattern, &document);
        if matches.is_empty() {
            continue;
        }
        results.push((path, text, matches));
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.json {
        write_json(&mut out, &results)?;
    } else {
        let sources: Vec<_> = results
            .iter()
            .map(|(path, text, matches)| {
                (
                    Source {
                        label: path.display().to_string(),
                        text: text.clone(),
                    },
                    matches.clone(),
                )
            })
            .collect();
        let opts = RenderOptions {
            color,
            force_heading: args.context,
        };
        sgrep_render::render(&mut out, &sources, &opts).map_err(|source| CliError::Io {
            path: PathBuf::from("<stdout>"),
            source,
        })?;
    }

    Ok(())
}

/// A `pattern` argument that names an existing file is read as the
/// pattern source; otherwise the argument text itself is the pattern.
fn read_pattern_source(pattern: &str) -> Result<String, CliError> {
    let path = Path::new(pattern);
    if path.is_file() {
        std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })
    } else {
        Ok(pattern.to_string())
    }
}

fn resolve_color(no_color: bool, mode: ColorMode) -> bool {
    if no_color {
        return false;
    }
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal(),
    }
}

/// Walk `target`, honoring `.gitignore`/`.ignore` and a configured
/// extension allow-list. A `target` that is a plain file is returned
/// as a single-element list regardless of its extension.
fn collect_files(target: &Path, extensions: &[String]) -> Result<Vec<PathBuf>, CliError> {
    if target.is_file() {
        return Ok(vec![target.to_path_buf()]);
    }
    if !target.exists() {
        return Err(CliError::Io {
            path: target.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file or directory"),
        });
    }

    let mut out = Vec::new();
    let walker = WalkBuilder::new(target)
        .hidden(true)
        .git_ignore(true)
        .add_custom_ignore_filename(".sgrepignore")
        .build();
    for entry in walker {
        let entry = entry.map_err(|e| CliError::Walk(e.to_string()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches_ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|e| e == ext));
        if matches_ext {
            out.push(path.to_path_buf());
        }
    }
    out.sort();
    Ok(out)
}

fn write_json<W: Write>(
    out: &mut W,
    results: &[(PathBuf, String, Vec<sgrep_core::Match>)],
) -> Result<(), CliError> {
    let files: Vec<_> = results
        .iter()
        .map(|(path, text, matches)| json::JsonFile {
            path: path.display().to_string(),
            matches: matches
                .iter()
                .map(|m| json::JsonMatch::from_match(m, text))
                .collect(),
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &files).map_err(|e| CliError::Serialize(e.to_string()))?;
    writeln!(out).map_err(|source| CliError::Io {
        path: PathBuf::from("<stdout>"),
        source,
    })
}
