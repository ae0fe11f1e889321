//! Lexer and pattern/document builder sitting on top of `sgrep-core`'s
//! `Node` tree.
//!
//! Pipeline: [`tokens`] (raw `logos` tokenization) → [`lines`] (grouping
//! into logical lines with indent/dedent markers) → [`indentation`]
//! (folding markers into nested `List`s). [`document`] and [`pattern`] are
//! the two thin entry points, differing only in which classifier they feed
//! the line-grouping pass.

pub mod document;
pub mod error;
pub mod indentation;
pub mod lines;
pub mod pattern;
pub mod tokens;

pub use document::lex_document;
pub use error::PatternError;
pub use pattern::lex_pattern;
