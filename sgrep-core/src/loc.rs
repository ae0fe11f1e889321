//! Source positions and locations, with a total order over positions.
//!
//! Mirrors the position/location split used throughout this codebase's
//! token-tree tooling: a [`Position`] is a (line, column, byte offset)
//! triple, and a [`Loc`] pairs a start and end position.

use std::cmp::Ordering;
use std::fmt;

/// A single point in source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub byte_offset: usize,
}

impl Position {
    pub fn new(line: usize, column: usize, byte_offset: usize) -> Self {
        Self {
            line,
            column,
            byte_offset,
        }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.byte_offset.cmp(&other.byte_offset)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span in source code, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Loc {
    pub start: Position,
    pub end: Position,
}

impl Loc {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(start <= end, "Loc::new: start must not be after end");
        Self { start, end }
    }

    /// A zero-width location at a single position.
    pub fn at(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Merge two locations into the smallest span covering both.
    pub fn merge(self, other: Self) -> Self {
        let start = if self.start <= other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end >= other.end {
            self.end
        } else {
            other.end
        };
        Self { start, end }
    }

    pub fn line(&self) -> usize {
        self.start.line
    }
}

impl PartialOrd for Loc {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Loc {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start.cmp(&other.start).then(self.end.cmp(&other.end))
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Returns true iff `candidate` starts strictly after `last_end`.
///
/// Equal positions do not qualify as "after" — used by the search driver to
/// enforce non-overlap between successive matches.
pub fn starts_after(last_end: Position, candidate: Position) -> bool {
    candidate > last_end
}

/// Fast byte-offset -> (line, column) conversion, built once per source.
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (byte_pos, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(byte_pos + 1);
            }
        }
        Self { line_starts }
    }

    pub fn position(&self, byte_offset: usize) -> Position {
        let line = self
            .line_starts
            .binary_search(&byte_offset)
            .unwrap_or_else(|insert_at| insert_at - 1);
        let column = byte_offset - self.line_starts[line];
        Position::new(line, column, byte_offset)
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
