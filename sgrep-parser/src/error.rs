//! Hand-rolled error type for the pattern builder, following this
//! codebase's convention of manual `Display`/`Error` impls rather than
//! `anyhow`/`thiserror`.
//!
//! `lex_document`/`lex_pattern` both take `&str`, so there is no lexer-level
//! error path here — UTF-8 validity is already guaranteed by the type
//! system before either function is called.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// `;;end` appeared somewhere other than the final line of the pattern.
    EndNotLast,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::EndNotLast => {
                write!(f, "`;;end` must be the last line of the pattern")
            }
        }
    }
}

impl std::error::Error for PatternError {}
