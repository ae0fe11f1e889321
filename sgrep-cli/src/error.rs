//! Top-level CLI error: wraps lower-level errors from the lexer, config
//! loader, and file I/O behind one `Display`-able type, following this
//! codebase's hand-rolled-enum error convention.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum CliError {
    Io { path: PathBuf, source: std::io::Error },
    Pattern(sgrep_parser::PatternError),
    Config(String),
    Walk(String),
    Serialize(String),
    Usage(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            CliError::Pattern(e) => write!(f, "invalid pattern: {e}"),
            CliError::Config(msg) => write!(f, "configuration error: {msg}"),
            CliError::Walk(msg) => write!(f, "{msg}"),
            CliError::Serialize(msg) => write!(f, "failed to serialize matches: {msg}"),
            CliError::Usage(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CliError {}
