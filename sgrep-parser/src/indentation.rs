//! Marker stream → nested `Node` tree.
//!
//! Direct structural analog of this codebase's flat-line-tokens-to-nested-
//! container-tree transformation: a stack of pending children per
//! indentation level, with `IndentLevel` pushing a new level and
//! `DedentLevel` popping one and folding it into a `List` at the parent
//! level.

use sgrep_core::ast::Node;

use crate::lines::Marker;

pub fn fold_markers(markers: Vec<Marker>) -> Vec<Node> {
    let mut stack: Vec<Vec<Node>> = vec![Vec::new()];

    for marker in markers {
        match marker {
            Marker::IndentLevel => stack.push(Vec::new()),
            Marker::DedentLevel => {
                let children = stack.pop().expect("stack never empty");
                stack
                    .last_mut()
                    .expect("stack never empty")
                    .push(Node::List(children));
            }
            Marker::Atom(node) => {
                stack.last_mut().expect("stack never empty").push(node);
            }
        }
    }

    // Any still-open levels at this point are a lexer bug (lines.rs closes
    // every indent it opens at end-of-source); fold them anyway rather than
    // panic on malformed input from a direct Marker stream in tests.
    while stack.len() > 1 {
        let children = stack.pop().unwrap();
        stack.last_mut().unwrap().push(Node::List(children));
    }

    stack.pop().unwrap()
}
