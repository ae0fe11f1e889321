//! Raw tokenization via `logos`. This is the bottom of the pipeline: it
//! knows nothing about indentation, metavariables, or ellipsis — just
//! words, a newline marker, run-of-whitespace, and a single-character
//! catch-all for everything else.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawToken {
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", priority = 3)]
    Word,

    #[token("\n")]
    Newline,

    #[regex(r"[ \t]+", priority = 2)]
    Whitespace,

    /// Catch-all: exactly one character that isn't part of a word, a
    /// newline, or a whitespace run. Classified further downstream into
    /// `Punct` or `Byte`.
    #[regex(r".", priority = 1)]
    Symbol,
}

/// Tokenize `source`, pairing each token with its byte span.
pub fn tokenize_with_spans(source: &str) -> Vec<(RawToken, logos::Span)> {
    let mut lexer = RawToken::lexer(source);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        if let Ok(tok) = result {
            tokens.push((tok, lexer.span()));
        }
    }
    tokens
}
