//! Final consistency decision.

use super::compare::{count_unsupported, ComparisonResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unsupported claims at or above this count make a character contradictory.
pub const CONTRADICTION_THRESHOLD: usize = 2;

/// Binary verdict, serialized as `1` (consistent) or `0` (contradictory).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Verdict {
    Contradictory,
    Consistent,
}

impl Verdict {
    pub fn value(&self) -> u8 {
        match self {
            Verdict::Contradictory => 0,
            Verdict::Consistent => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Contradictory => "CONTRADICTORY",
            Verdict::Consistent => "CONSISTENT",
        }
    }

    pub fn is_consistent(&self) -> bool {
        matches!(self, Verdict::Consistent)
    }
}

impl From<Verdict> for u8 {
    fn from(verdict: Verdict) -> Self {
        verdict.value()
    }
}

impl TryFrom<u8> for Verdict {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Verdict::Contradictory),
            1 => Ok(Verdict::Consistent),
            other => Err(format!("verdict must be 0 or 1, got {other}")),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.value())
    }
}

/// Reduce comparisons to a verdict.
pub fn decide(results: &[ComparisonResult]) -> Verdict {
    if count_unsupported(results) >= CONTRADICTION_THRESHOLD {
        Verdict::Contradictory
    } else {
        Verdict::Consistent
    }
}
