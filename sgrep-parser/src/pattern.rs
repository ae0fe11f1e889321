//! Pattern lexing: everything the document lexer does, plus `$NAME`
//! metavariables, `...` ellipsis, and a standalone `;;end` terminator line.

use sgrep_core::ast::{Kind, Node};
use sgrep_core::loc::{Loc, LineIndex};

use crate::document::classify_kind;
use crate::error::PatternError;
use crate::indentation::fold_markers;
use crate::lines::{build_markers, LineClassifier};
use crate::tokens::RawToken;

type Span = std::ops::Range<usize>;

fn adjacent(a: &Span, b: &Span) -> bool {
    a.end == b.start
}

fn text_is<'a>(source: &'a str, span: &Span, s: &str) -> bool {
    &source[span.clone()] == s
}

fn is_adjacent_dot(source: &str, prev: &(RawToken, Span), span: &Span) -> bool {
    matches!(prev.0, RawToken::Symbol) && text_is(source, &prev.1, ".") && adjacent(&prev.1, span)
}

/// Length of the maximal run of adjacent single-`.` `Symbol` tokens
/// starting at `start`. Used so `...` is only recognized when it is
/// exactly three dots, never three dots out of a longer run.
fn dot_run_len(source: &str, content: &[(RawToken, Span)], start: usize) -> usize {
    let mut len = 1;
    while let Some((RawToken::Symbol, span)) = content.get(start + len) {
        if text_is(source, span, ".") && adjacent(&content[start + len - 1].1, span) {
            len += 1;
        } else {
            break;
        }
    }
    len
}

/// A metavariable name is an uppercase-led (or `_`-led) identifier: `$X`,
/// `$NAME`, `$_`, `$_ignored`. `$x`/`$foo` fail this check and fall through
/// to plain `$`/`Word` atoms instead of capturing.
fn is_metavar_name(name: &str) -> bool {
    matches!(name.chars().next(), Some(c) if c == '_' || c.is_uppercase())
}

fn is_end_marker_line(source: &str, content: &[(RawToken, Span)]) -> bool {
    match content {
        [(RawToken::Symbol, a), (RawToken::Symbol, b), (RawToken::Word, c)] => {
            text_is(source, a, ";")
                && text_is(source, b, ";")
                && adjacent(a, b)
                && adjacent(b, c)
                && text_is(source, c, "end")
        }
        _ => false,
    }
}

struct PatternClassifier;

impl LineClassifier for PatternClassifier {
    fn classify_line(&mut self, source: &str, index: &LineIndex, content: &[(RawToken, Span)]) -> Vec<Node> {
        if is_end_marker_line(source, content) {
            let loc = Loc::new(
                index.position(content[0].1.start),
                index.position(content[2].1.end),
            );
            return vec![Node::end(loc)];
        }

        let mut out = Vec::new();
        let mut j = 0;
        while j < content.len() {
            let (tok, span) = &content[j];

            let is_dollar = matches!(tok, RawToken::Symbol) && text_is(source, span, "$");
            if is_dollar {
                if let Some((RawToken::Word, name_span)) = content.get(j + 1).cloned() {
                    if adjacent(span, &name_span) {
                        let name = &source[name_span.clone()];
                        if is_metavar_name(name) {
                            let loc = Loc::new(index.position(span.start), index.position(name_span.end));
                            out.push(Node::metavar(loc, name));
                            j += 2;
                            continue;
                        }
                    }
                }
            }

            let is_dot = matches!(tok, RawToken::Symbol) && text_is(source, span, ".");
            let run_start = j == 0 || !is_adjacent_dot(source, &content[j - 1], span);
            if is_dot && run_start {
                let run_len = dot_run_len(source, content, j);
                if run_len == 3 {
                    let last = &content[j + 2].1;
                    let loc = Loc::new(index.position(span.start), index.position(last.end));
                    out.push(Node::dots(loc));
                    j += 3;
                    continue;
                }
            }

            let loc = Loc::new(index.position(span.start), index.position(span.end));
            let text = &source[span.clone()];
            out.push(Node::Atom(loc, classify_kind(text)));
            j += 1;
        }
        out
    }
}

fn validate_end_placement(nodes: &[Node]) -> Result<(), PatternError> {
    for (i, node) in nodes.iter().enumerate() {
        match node {
            Node::Atom(_, Kind::End) if i != nodes.len() - 1 => return Err(PatternError::EndNotLast),
            Node::List(children) => validate_end_placement(children)?,
            _ => {}
        }
    }
    Ok(())
}

/// Lex `source` as a pattern, recognizing `$NAME`, `...`, and a terminal
/// `;;end` marker on top of the plain document vocabulary.
pub fn lex_pattern(source: &str) -> Result<Vec<Node>, PatternError> {
    let markers = build_markers(source, &mut PatternClassifier);
    let nodes = fold_markers(markers);
    validate_end_placement(&nodes)?;
    Ok(nodes)
}
