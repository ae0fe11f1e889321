//! Document lexing: `Word`/`Punct`/`Byte` atoms only, folded into a `Node`
//! tree by indentation.

use sgrep_core::ast::{Kind, Node};
use sgrep_core::loc::{Loc, LineIndex};

use crate::indentation::fold_markers;
use crate::lines::{build_markers, LineClassifier};
use crate::tokens::RawToken;

struct DocumentClassifier;

impl LineClassifier for DocumentClassifier {
    fn classify_line(
        &mut self,
        source: &str,
        index: &LineIndex,
        content: &[(RawToken, std::ops::Range<usize>)],
    ) -> Vec<Node> {
        content
            .iter()
            .map(|(_, span)| {
                let loc = Loc::new(index.position(span.start), index.position(span.end));
                let text = &source[span.clone()];
                Node::Atom(loc, classify_kind(text))
            })
            .collect()
    }
}

/// Classify one content token's text into `Word` or `Punct`/`Byte`. A
/// `Word` token from the raw lexer is always a run of identifier
/// characters; a `Symbol` token is exactly one character, split into
/// printable punctuation versus a raw control byte.
pub(crate) fn classify_kind(text: &str) -> Kind {
    let first = text.chars().next().expect("content token is never empty");
    if first.is_alphabetic() || first == '_' {
        return Kind::Word(text.to_string());
    }
    if first.is_control() {
        let mut buf = [0u8; 4];
        let encoded = first.encode_utf8(&mut buf);
        Kind::Byte(encoded.as_bytes()[0])
    } else {
        Kind::Punct(first)
    }
}

/// Lex `source` as a document: `Word`/`Punct`/`Byte` atoms, folded into
/// nested `List`s by indentation. An empty source lexes to an empty
/// sequence.
pub fn lex_document(source: &str) -> Vec<Node> {
    let markers = build_markers(source, &mut DocumentClassifier);
    fold_markers(markers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_is_empty_document() {
        assert!(lex_document("").is_empty());
    }

    #[test]
    fn flat_line_lexes_to_atoms() {
        let nodes = lex_document("f(x);");
        assert_eq!(nodes.len(), 5);
        assert_eq!(nodes[0], Node::word(nodes[0].loc().unwrap(), "f"));
    }

    #[test]
    fn indented_block_becomes_nested_list() {
        let nodes = lex_document("f() {\n    a;\n}\n");
        assert!(nodes.iter().any(Node::is_list));
    }

    proptest::proptest! {
        /// A single lowercase identifier always lexes to exactly one `Word`
        /// atom carrying that identifier's text back out unchanged.
        #[test]
        fn single_word_round_trips(w in "[a-z]{1,10}") {
            let nodes = lex_document(&w);
            proptest::prop_assert_eq!(nodes.len(), 1);
            match &nodes[0] {
                Node::Atom(_, Kind::Word(text)) => proptest::prop_assert_eq!(text, &w),
                other => proptest::prop_assert!(false, "expected a Word atom, got {:?}", other),
            }
        }
    }

    fn atom_spans(nodes: &[Node], out: &mut Vec<(usize, usize)>) {
        for node in nodes {
            match node {
                Node::Atom(loc, _) => out.push((loc.start.byte_offset, loc.end.byte_offset)),
                Node::List(children) => atom_spans(children, out),
            }
        }
    }

    #[test]
    fn lexer_round_trip_recovers_every_non_whitespace_byte() {
        let source = "f(x) {\n    a; b\n}\nc";
        let nodes = lex_document(source);
        let mut spans = Vec::new();
        atom_spans(&nodes, &mut spans);
        spans.sort();
        let recovered: String = spans.iter().map(|(s, e)| &source[*s..*e]).collect();
        let expected: String = source.chars().filter(|c| !c.is_whitespace()).collect();
        assert_eq!(recovered, expected);
    }
}
