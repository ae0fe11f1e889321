//! Conversion from a raw matcher outcome into the public result shape.

use crate::env::Env;
use crate::loc::Loc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureValue {
    pub name: String,
    pub value: String,
    pub loc: Loc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub region: (Loc, Loc),
    pub captures: Vec<CaptureValue>,
}

impl Match {
    pub fn new(start: Loc, end: Loc, env: &Env) -> Self {
        let captures = env
            .iter()
            .map(|(name, capture)| CaptureValue {
                name: name.to_string(),
                value: capture.value.clone(),
                loc: capture.loc,
            })
            .collect();
        Self {
            region: (start, end),
            captures,
        }
    }
}
