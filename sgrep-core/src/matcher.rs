//! The recursive, backtracking, continuation-passing matcher core.
//!
//! This is a direct reimplementation of the contract in the design
//! document's "Matcher Core" section: `match(dots, env, last_loc, pattern,
//! document, cont) -> Complete(env', last_loc') | Fail`. Backtracking is the
//! implicit return of `Fail` up the call stack; since [`Env`](crate::env::Env)
//! is threaded by value (clone-on-bind), no explicit undo log is needed.
//!
//! The continuation is represented as an owned, `Box`-chained [`Cont`]
//! rather than a boxed closure: every frame only needs to remember the
//! sibling tail of the document level it is resuming into, and owning the
//! chain sidesteps the self-referential-lifetime awkwardness a closure
//! chain would otherwise require.

use crate::ast::{Kind, Node};
use crate::env::Env;
use crate::loc::Loc;

/// Maximum number of lines a single `...` (or a chain of them) may span.
/// A compile-time tuning constant, never exposed as a user setting.
pub const DOTS_LINE_SPAN: usize = 10;

/// The ellipsis cap: absent, or a line number the next consumed atom must
/// not exceed.
pub type DotsCap = Option<usize>;

/// The outcome of a match attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Complete(Env, Loc),
    Fail,
}

/// A continuation: what to do when the current sub-document is exhausted
/// but pattern remains.
#[derive(Debug, Clone)]
pub enum Cont<'a> {
    /// No parent document: the leftover pattern must itself be a "full
    /// match" (empty, or only `Dots`/`End`/empty `List`s).
    Full,
    /// Resume matching the leftover pattern against `doc_tail`, escalating
    /// to `parent` if that too runs out.
    Parent {
        doc_tail: &'a [Node],
        parent: Box<Cont<'a>>,
    },
}

fn invoke_cont<'a>(cont: &Cont<'a>, dots: DotsCap, env: Env, last_loc: Loc, leftover: &'a [Node]) -> Outcome {
    match cont {
        Cont::Full => {
            if is_full_match(leftover) {
                Outcome::Complete(env, last_loc)
            } else {
                Outcome::Fail
            }
        }
        Cont::Parent { doc_tail, parent } => match_seq(dots, env, last_loc, leftover, doc_tail, parent),
    }
}

/// True iff `pattern`, matched against a document that will never supply
/// any further atoms, needs nothing more: empty, a run of `Dots`, a
/// terminal `End`, or `List`s whose own content is itself a full match.
fn is_full_match(pattern: &[Node]) -> bool {
    match pattern.first() {
        None => true,
        Some(Node::Atom(_, Kind::Dots)) => is_full_match(&pattern[1..]),
        Some(Node::Atom(_, Kind::End)) => true,
        Some(Node::List(children)) => is_full_match(children) && is_full_match(&pattern[1..]),
        Some(Node::Atom(_, _)) => false,
    }
}

/// True iff every atom reachable in `nodes` (recursing into nested
/// `List`s) sits at or before line `cap`. Returns the rightmost such atom's
/// location, if any, so callers can advance `last_loc`.
fn atoms_within_cap(nodes: &[Node], cap: usize) -> Option<Option<Loc>> {
    let mut rightmost: Option<Loc> = None;
    for node in nodes {
        match node {
            Node::Atom(loc, _) => {
                if loc.line() > cap {
                    return None;
                }
                rightmost = Some(match rightmost {
                    Some(r) if r >= *loc => r,
                    _ => *loc,
                });
            }
            Node::List(children) => match atoms_within_cap(children, cap)? {
                Some(loc) => {
                    rightmost = Some(match rightmost {
                        Some(r) if r >= loc => r,
                        _ => loc,
                    });
                }
                None => {}
            },
        }
    }
    Some(rightmost)
}

fn skippable(dots: DotsCap, loc: Loc) -> bool {
    matches!(dots, Some(cap) if loc.line() <= cap)
}

fn unify(pattern_kind: &Kind, doc_loc: Loc, doc_kind: &Kind, env: &Env) -> Option<Env> {
    match (pattern_kind, doc_kind) {
        (Kind::Metavar(name), Kind::Word(v)) => env.bind(name, doc_loc, v),
        (Kind::Metavar(_), _) => None,
        (Kind::Word(a), Kind::Word(b)) if a == b => Some(env.clone()),
        (Kind::Punct(a), Kind::Punct(b)) if a == b => Some(env.clone()),
        (Kind::Byte(a), Kind::Byte(b)) if a == b => Some(env.clone()),
        _ => None,
    }
}

/// Split a document sequence into "the content of an indented block here,
/// if the document starts with one" and "what follows". An empty document
/// is treated as a List with empty children and empty tail so the
/// List-vs-List path in [`match_list_pattern`] also covers the
/// List-vs-empty-document case from the spec.
enum DocHead<'a> {
    Indented { children: &'a [Node], tail: &'a [Node] },
    Atom { loc: Loc, kind: &'a Kind, tail: &'a [Node] },
}

fn doc_head<'a>(document: &'a [Node]) -> DocHead<'a> {
    match document.first() {
        None => DocHead::Indented { children: &[], tail: &[] },
        Some(Node::List(children)) => DocHead::Indented {
            children,
            tail: &document[1..],
        },
        Some(Node::Atom(loc, kind)) => DocHead::Atom {
            loc: *loc,
            kind,
            tail: &document[1..],
        },
    }
}

/// Entry point: attempt to align `pattern` against the prefix of
/// `document`, using `dots` as the current ellipsis cap and `cont` to
/// resume in the parent document once `document` is exhausted.
pub fn match_seq<'a>(
    dots: DotsCap,
    env: Env,
    last_loc: Loc,
    pattern: &'a [Node],
    document: &'a [Node],
    cont: &Cont<'a>,
) -> Outcome {
    match pattern.first() {
        // R1: empty pattern.
        None => match dots {
            None => {
                if document.is_empty() {
                    Outcome::Complete(env, last_loc)
                } else {
                    Outcome::Fail
                }
            }
            Some(cap) => match atoms_within_cap(document, cap) {
                None => Outcome::Fail,
                Some(Some(rightmost)) => Outcome::Complete(env, rightmost),
                Some(None) => Outcome::Complete(env, last_loc),
            },
        },

        // R2: terminal `End` succeeds unconditionally.
        Some(Node::Atom(_, Kind::End)) => Outcome::Complete(env, last_loc),

        // R4: ellipsis extends the cap and continues with the tail.
        Some(Node::Atom(_, Kind::Dots)) => {
            let pat_tail = &pattern[1..];
            let new_cap = match dots {
                None => last_loc.end.line + DOTS_LINE_SPAN,
                Some(cap) => cap + DOTS_LINE_SPAN,
            };
            match_seq(Some(new_cap), env, last_loc, pat_tail, document, cont)
        }

        // R3: an indented block in the pattern.
        Some(Node::List(pat1)) => match_list_pattern(dots, env, last_loc, pat1, &pattern[1..], document, cont),

        // R5: a literal atom (Word/Punct/Byte) or a Metavar.
        Some(Node::Atom(ploc, pkind)) => {
            match_atom_pattern(dots, env, last_loc, *ploc, pkind, pattern, document, cont)
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn match_list_pattern<'a>(
    dots: DotsCap,
    env: Env,
    last_loc: Loc,
    pat1: &'a [Node],
    pat_tail: &'a [Node],
    document: &'a [Node],
    cont: &Cont<'a>,
) -> Outcome {
    match doc_head(document) {
        DocHead::Indented { children, tail } => {
            match match_seq(None, env, last_loc, pat1, children, &Cont::Full) {
                Outcome::Complete(env2, last_loc2) => match_seq(None, env2, last_loc2, pat_tail, tail, cont),
                Outcome::Fail => Outcome::Fail,
            }
        }
        DocHead::Atom { loc, .. } if skippable(dots, loc) => {
            let tail = &document[1..];
            match_list_pattern(dots, env, last_loc, pat1, pat_tail, tail, cont)
        }
        DocHead::Atom { .. } => {
            if is_full_match(pat1) {
                match_seq(dots, env, last_loc, pat_tail, document, cont)
            } else {
                Outcome::Fail
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn match_atom_pattern<'a>(
    dots: DotsCap,
    env: Env,
    last_loc: Loc,
    ploc: Loc,
    pkind: &Kind,
    pattern: &'a [Node],
    document: &'a [Node],
    cont: &Cont<'a>,
) -> Outcome {
    let _ = ploc; // the pattern atom's own location plays no role in unification
    if document.is_empty() {
        return invoke_cont(cont, dots, env, last_loc, pattern);
    }
    match doc_head(document) {
        DocHead::Indented { children, tail } => {
            let inner_cont = Cont::Parent {
                doc_tail: tail,
                parent: Box::new(cont.clone()),
            };
            match_seq(dots, env, last_loc, pattern, children, &inner_cont)
        }
        DocHead::Atom { loc, kind, tail } => {
            if matches!(dots, Some(cap) if loc.line() > cap) {
                return Outcome::Fail;
            }
            match unify(pkind, loc, kind, &env) {
                Some(env2) => match_seq(None, env2, loc, &pattern[1..], tail, cont),
                None if skippable(dots, loc) => match_seq(dots, env, last_loc, pattern, tail, cont),
                None => Outcome::Fail,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loc::Position;

    fn pos(line: usize, col: usize, byte: usize) -> Position {
        Position::new(line, col, byte)
    }

    fn at(line: usize, col: usize, byte: usize) -> Loc {
        Loc::at(pos(line, col, byte))
    }

    fn word(line: usize, col: usize, byte: usize, text: &str) -> Node {
        Node::word(at(line, col, byte), text)
    }

    fn punct(line: usize, col: usize, byte: usize, c: char) -> Node {
        Node::punct(at(line, col, byte), c)
    }

    fn metavar(line: usize, col: usize, byte: usize, name: &str) -> Node {
        Node::metavar(at(line, col, byte), name)
    }

    fn dots(line: usize, col: usize, byte: usize) -> Node {
        Node::dots(at(line, col, byte))
    }

    fn run(pattern: &[Node], document: &[Node]) -> Outcome {
        let start = document
            .first()
            .and_then(Node::first_loc)
            .unwrap_or_else(|| at(0, 0, 0));
        match_seq(None, Env::new(), start, pattern, document, &Cont::Full)
    }

    #[test]
    fn flat_exact_match() {
        // f ( x ) { a ; }
        let pattern = vec![
            word(0, 0, 0, "f"),
            punct(0, 1, 1, '('),
            word(0, 2, 2, "x"),
            punct(0, 3, 3, ')'),
            punct(0, 4, 4, '{'),
            word(0, 5, 5, "a"),
            punct(0, 6, 6, ';'),
            punct(0, 7, 7, '}'),
        ];
        let document = pattern.clone();
        assert!(matches!(run(&pattern, &document), Outcome::Complete(_, _)));
    }

    #[test]
    fn flat_pattern_matches_indented_document() {
        let pattern = vec![
            word(0, 0, 0, "f"),
            punct(0, 1, 1, '('),
            word(0, 2, 2, "x"),
            punct(0, 3, 3, ')'),
            punct(0, 4, 4, '{'),
            word(0, 5, 5, "a"),
            punct(0, 6, 6, ';'),
            punct(0, 7, 7, '}'),
        ];
        let document = vec![
            word(0, 0, 0, "f"),
            punct(0, 1, 1, '('),
            word(0, 2, 2, "x"),
            punct(0, 3, 3, ')'),
            punct(0, 4, 4, '{'),
            Node::List(vec![word(1, 0, 10, "a"), punct(1, 1, 11, ';')]),
            punct(2, 0, 20, '}'),
        ];
        assert!(matches!(run(&pattern, &document), Outcome::Complete(_, _)));
    }

    #[test]
    fn indented_pattern_refuses_flat_document() {
        let pattern = vec![
            word(0, 0, 0, "f"),
            punct(0, 1, 1, '('),
            word(0, 2, 2, "x"),
            punct(0, 3, 3, ')'),
            punct(0, 4, 4, '{'),
            Node::List(vec![word(1, 0, 10, "a"), punct(1, 1, 11, ';')]),
            punct(2, 0, 20, '}'),
        ];
        let document = vec![
            word(0, 0, 0, "f"),
            punct(0, 1, 1, '('),
            word(0, 2, 2, "x"),
            punct(0, 3, 3, ')'),
            punct(0, 4, 4, '{'),
            word(0, 5, 5, "a"),
            punct(0, 6, 6, ';'),
            punct(0, 7, 7, '}'),
        ];
        assert!(matches!(run(&pattern, &document), Outcome::Fail));
    }

    #[test]
    fn metavariable_capture_and_reuse() {
        let pattern = vec![
            word(0, 0, 0, "f"),
            punct(0, 1, 1, '('),
            metavar(0, 2, 2, "X"),
            punct(0, 3, 3, ')'),
            punct(0, 4, 4, ';'),
            word(0, 5, 5, "g"),
            punct(0, 6, 6, '('),
            metavar(0, 7, 7, "X"),
            punct(0, 8, 8, ')'),
        ];
        let good = vec![
            word(0, 0, 0, "f"),
            punct(0, 1, 1, '('),
            word(0, 2, 2, "y"),
            punct(0, 3, 3, ')'),
            punct(0, 4, 4, ';'),
            word(0, 5, 5, "g"),
            punct(0, 6, 6, '('),
            word(0, 7, 7, "y"),
            punct(0, 8, 8, ')'),
        ];
        match run(&pattern, &good) {
            Outcome::Complete(env, _) => assert_eq!(env.get("X").unwrap().value, "y"),
            Outcome::Fail => panic!("expected match"),
        }

        let bad = vec![
            word(0, 0, 0, "f"),
            punct(0, 1, 1, '('),
            word(0, 2, 2, "y"),
            punct(0, 3, 3, ')'),
            punct(0, 4, 4, ';'),
            word(0, 5, 5, "g"),
            punct(0, 6, 6, '('),
            word(0, 7, 7, "z"),
            punct(0, 8, 8, ')'),
        ];
        assert!(matches!(run(&pattern, &bad), Outcome::Fail));
    }

    #[test]
    fn ellipsis_within_range_matches() {
        let pattern = vec![word(0, 0, 0, "a"), dots(0, 1, 1), word(5, 0, 50, "b")];
        let document = vec![word(0, 0, 0, "a"), word(5, 0, 50, "b")];
        assert!(matches!(run(&pattern, &document), Outcome::Complete(_, _)));
    }

    #[test]
    fn ellipsis_beyond_range_fails() {
        let pattern = vec![word(0, 0, 0, "a"), dots(0, 1, 1), word(11, 0, 110, "b")];
        let document = vec![word(0, 0, 0, "a"), word(11, 0, 110, "b")];
        assert!(matches!(run(&pattern, &document), Outcome::Fail));
    }

    #[test]
    fn ellipsis_skips_intervening_atoms() {
        let pattern = vec![word(0, 0, 0, "a"), dots(0, 1, 1), word(3, 0, 30, "b")];
        let document = vec![
            word(0, 0, 0, "a"),
            word(1, 0, 10, "junk1"),
            word(2, 0, 20, "junk2"),
            word(3, 0, 30, "b"),
        ];
        assert!(matches!(run(&pattern, &document), Outcome::Complete(_, _)));
    }

    #[test]
    fn chained_ellipsis_extends_span() {
        // two `...` in a row allow up to 20 lines.
        let pattern = vec![
            word(0, 0, 0, "a"),
            dots(0, 1, 1),
            dots(0, 2, 2),
            word(18, 0, 180, "b"),
        ];
        let document = vec![word(0, 0, 0, "a"), word(18, 0, 180, "b")];
        assert!(matches!(run(&pattern, &document), Outcome::Complete(_, _)));
    }

    #[test]
    fn explicit_end_accepts_with_trailing_document() {
        let pattern = vec![word(0, 0, 0, "a"), Node::end(at(0, 1, 1))];
        let document = vec![word(0, 0, 0, "a"), word(0, 2, 2, "trailing")];
        assert!(matches!(run(&pattern, &document), Outcome::Complete(_, _)));
    }

    #[test]
    fn implicit_end_requires_full_consumption() {
        let pattern = vec![word(0, 0, 0, "a")];
        let document = vec![word(0, 0, 0, "a"), word(0, 2, 2, "trailing")];
        assert!(matches!(run(&pattern, &document), Outcome::Fail));
    }

    #[test]
    fn indented_pattern_against_list_list_nesting() {
        let pattern = vec![Node::List(vec![word(1, 0, 10, "a")])];
        let document = vec![Node::List(vec![word(1, 0, 10, "a")])];
        assert!(matches!(run(&pattern, &document), Outcome::Complete(_, _)));
    }

    #[test]
    fn indented_pattern_vacuously_matches_when_block_is_optional() {
        // pattern: List([Dots]) followed by a literal word; vacuous match
        // lets the literal word match directly against a flat document.
        let pattern = vec![Node::List(vec![dots(0, 0, 0)]), word(0, 5, 5, "a")];
        let document = vec![word(0, 5, 5, "a")];
        assert!(matches!(run(&pattern, &document), Outcome::Complete(_, _)));
    }

    #[rstest::rstest]
    #[case(word(0, 0, 0, "a"), word(0, 0, 0, "a"), true)]
    #[case(word(0, 0, 0, "a"), word(0, 0, 0, "b"), false)]
    #[case(punct(0, 0, 0, '('), punct(0, 0, 0, '('), true)]
    #[case(punct(0, 0, 0, '('), punct(0, 0, 0, ')'), false)]
    #[case(word(0, 0, 0, "a"), punct(0, 0, 0, '('), false)]
    fn single_atom_unification_table(#[case] pattern_atom: Node, #[case] doc_atom: Node, #[case] expect_match: bool) {
        let outcome = run(&[pattern_atom], &[doc_atom]);
        assert_eq!(matches!(outcome, Outcome::Complete(_, _)), expect_match);
    }
}
