//! The non-overlapping search driver: walks a document in pre-order,
//! attempting a match at every atom, and keeps only matches that start
//! strictly after the previous one ended.

use crate::ast::Node;
use crate::env::Env;
use crate::loc::{starts_after, Loc, Position};
use crate::matcher::{match_seq, Cont, Outcome};
use crate::result::Match;

/// Find every non-overlapping match of `pattern` in `document`, in source
/// order. A match may start inside a nested indented block; once started,
/// it is bounded by the enclosing block's own children (it cannot escape
/// past the block's close purely by exhausting the search attempt's own
/// top-level slice — crossing out is still possible mid-match via the
/// ordinary flat-pattern-crosses-indentation rule, since the attempt's
/// document parameter already includes whatever encloses that start).
pub fn search(pattern: &[Node], document: &[Node]) -> Vec<Match> {
    let mut out = Vec::new();
    let mut last_end: Option<Position> = None;
    search_level(document, pattern, &mut out, &mut last_end);
    out
}

fn search_level(nodes: &[Node], pattern: &[Node], out: &mut Vec<Match>, last_end: &mut Option<Position>) {
    for i in 0..nodes.len() {
        match &nodes[i] {
            Node::Atom(loc, _) => {
                let eligible = match last_end {
                    None => true,
                    Some(end) => starts_after(*end, loc.start),
                };
                if eligible {
                    let tail = &nodes[i..];
                    if let Outcome::Complete(env, final_loc) =
                        match_seq(None, Env::new(), *loc, pattern, tail, &Cont::Full)
                    {
                        out.push(Match::new(*loc, final_loc, &env));
                        *last_end = Some(final_loc.end);
                    }
                }
            }
            Node::List(children) => search_level(children, pattern, out, last_end),
        }
    }
}
