//! The capture environment: an ordered, persistent mapping from
//! metavariable name to its captured location and word.
//!
//! Kept as a small append-only association list rather than a hash map:
//! pattern metavariable counts are typically under ten, insertion order
//! must be preserved for deterministic capture output, and cloning an
//! association list on each speculative bind is cheap enough to give free
//! backtracking without an explicit undo log.

use crate::loc::Loc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub loc: Loc,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Env {
    bindings: Vec<(String, Capture)>,
}

impl Env {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Capture> {
        self.bindings
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    /// Bind `name` to `(loc, value)`. If already bound, this is a
    /// consistency check, not an overwrite: it succeeds only if `value`
    /// matches the previously captured word byte-for-byte.
    #[must_use]
    pub fn bind(&self, name: &str, loc: Loc, value: &str) -> Option<Env> {
        if let Some(existing) = self.get(name) {
            return if existing.value == value {
                Some(self.clone())
            } else {
                None
            };
        }
        let mut next = self.clone();
        next.bindings.push((
            name.to_string(),
            Capture {
                loc,
                value: value.to_string(),
            },
        ));
        Some(next)
    }

    /// Enumerate bindings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Capture)> {
        self.bindings.iter().map(|(n, c)| (n.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
