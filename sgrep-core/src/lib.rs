//! Structural pattern matcher over a token-plus-indentation tree.
//!
//! A document and a pattern share one tree shape ([`ast::Node`]): a flat run
//! of classified tokens, with indented blocks represented as nested lists
//! rather than braces. Patterns additionally carry metavariables (`$NAME`),
//! ellipsis (`...`), and an explicit early-stop marker. [`matcher`] holds
//! the backtracking core; [`search`] drives it over a whole document to
//! produce non-overlapping matches.

pub mod ast;
pub mod env;
pub mod loc;
pub mod matcher;
pub mod result;
pub mod search;

pub use ast::{Kind, Node};
pub use env::{Capture, Env};
pub use loc::{Loc, Position};
pub use matcher::DOTS_LINE_SPAN;
pub use result::{CaptureValue, Match};
pub use search::search;
