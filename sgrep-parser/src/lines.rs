//! Flat raw tokens → a marker stream of `IndentLevel`/`DedentLevel`/`Atom`,
//! grouped by logical line. Blank lines contribute no atom and do not
//! themselves trigger an indent change; a run of leading whitespace on a
//! non-blank line determines that line's indentation width, one column per
//! space or tab.

use std::ops::Range;

use sgrep_core::ast::Node;
use sgrep_core::loc::LineIndex;

use crate::tokens::{tokenize_with_spans, RawToken};

#[derive(Debug, Clone)]
pub enum Marker {
    IndentLevel,
    DedentLevel,
    Atom(Node),
}

/// Classifies one logical line's content tokens (already stripped of
/// interior whitespace runs) into atoms. Takes the whole line rather than
/// one token at a time so a classifier can merge adjacent raw tokens, as
/// the pattern lexer does for `$NAME` and `...`.
pub trait LineClassifier {
    fn classify_line(&mut self, source: &str, index: &LineIndex, content: &[(RawToken, Range<usize>)]) -> Vec<Node>;
}

pub fn build_markers(source: &str, classifier: &mut dyn LineClassifier) -> Vec<Marker> {
    let index = LineIndex::new(source);
    let raw = tokenize_with_spans(source);

    let mut markers = Vec::new();
    let mut indent_stack: Vec<usize> = vec![0];
    let mut i = 0;

    while i < raw.len() {
        // Measure leading whitespace width for this line.
        let mut width = 0usize;
        if let (RawToken::Whitespace, span) = &raw[i] {
            width = source[span.clone()].chars().count();
            i += 1;
        }

        // Collect this line's content tokens, up to (not including) the
        // terminating Newline.
        let mut content: Vec<(RawToken, std::ops::Range<usize>)> = Vec::new();
        while i < raw.len() && !matches!(raw[i].0, RawToken::Newline) {
            content.push(raw[i].clone());
            i += 1;
        }
        if i < raw.len() {
            i += 1; // consume the Newline
        }

        let blank = content
            .iter()
            .all(|(tok, _)| matches!(tok, RawToken::Whitespace));
        if blank {
            continue;
        }

        while width < *indent_stack.last().unwrap() {
            indent_stack.pop();
            markers.push(Marker::DedentLevel);
        }
        if width > *indent_stack.last().unwrap() {
            indent_stack.push(width);
            markers.push(Marker::IndentLevel);
        }

        let content: Vec<_> = content
            .into_iter()
            .filter(|(tok, _)| !matches!(tok, RawToken::Whitespace))
            .collect();
        for node in classifier.classify_line(source, &index, &content) {
            markers.push(Marker::Atom(node));
        }
    }

    while indent_stack.len() > 1 {
        indent_stack.pop();
        markers.push(Marker::DedentLevel);
    }

    markers
}
