//! JSON output shapes for `--json`.
//!
//! `sgrep-core` deliberately carries no `serde` dependency, so the
//! wire-facing shapes live here, converted from the core's `Match` by hand.

use serde::Serialize;
use sgrep_core::{Loc, Match, Position};

#[derive(Debug, Serialize)]
pub struct JsonPosition {
    pub line: usize,
    pub column: usize,
}

impl From<Position> for JsonPosition {
    fn from(p: Position) -> Self {
        Self {
            line: p.line,
            column: p.column,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JsonLoc {
    pub start: JsonPosition,
    pub end: JsonPosition,
}

impl From<Loc> for JsonLoc {
    fn from(loc: Loc) -> Self {
        Self {
            start: loc.start.into(),
            end: loc.end.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JsonCapture {
    pub name: String,
    pub value: String,
    pub loc: JsonLoc,
}

#[derive(Debug, Serialize)]
pub struct JsonMatch {
    pub start: JsonLoc,
    pub end: JsonLoc,
    pub text: String,
    pub captures: Vec<JsonCapture>,
}

impl JsonMatch {
    pub fn from_match(m: &Match, text: &str) -> Self {
        let start_off = m.region.0.start.byte_offset;
        let end_off = m.region.1.end.byte_offset;
        Self {
            start: m.region.0.into(),
            end: m.region.1.into(),
            text: text[start_off..end_off].to_string(),
            captures: m
                .captures
                .iter()
                .map(|c| JsonCapture {
                    name: c.name.clone(),
                    value: c.value.clone(),
                    loc: c.loc.into(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JsonFile {
    pub path: String,
    pub matches: Vec<JsonMatch>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sgrep_core::CaptureValue;

    #[test]
    fn converts_match_with_captures() {
        let loc = Loc::at(Position::new(0, 0, 0));
        let m = Match {
            region: (loc, Loc::new(Position::new(0, 0, 0), Position::new(0, 4, 4))),
            captures: vec![CaptureValue {
                name: "X".into(),
                value: "abcd".into(),
                loc: Loc::new(Position::new(0, 0, 0), Position::new(0, 4, 4)),
            }],
        };
        let json = JsonMatch::from_match(&m, "abcd");
        assert_eq!(json.text, "abcd");
        assert_eq!(json.captures.len(), 1);
        assert_eq!(json.captures[0].name, "X");
    }
}
