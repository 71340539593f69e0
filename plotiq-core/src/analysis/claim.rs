//! Backstory claims.
//!
//! A claim asserts the level a character is expected to show for one trait.
//! Claims naming a trait outside the fixed set are kept as
//! [`TraitRef::Unknown`] rather than rejected, so they show up as
//! unsupported in the comparison instead of disappearing.

use super::traits::{TraitKind, TraitLevel};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors from parsing a claims file.
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Invalid claims JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Line {line}: expected `Trait|level|claim text`, got {content:?}")]
    MalformedLine { line: usize, content: String },

    #[error("Line {line}: unknown level {level:?} (expected low, medium or high)")]
    InvalidLevel { line: usize, level: String },

    #[error("Line {line}: claim text is empty")]
    EmptyText { line: usize },
}

/// The trait a claim refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TraitRef {
    Known(TraitKind),
    /// A name outside the fixed set, kept verbatim.
    Unknown(String),
}

impl TraitRef {
    pub fn kind(&self) -> Option<TraitKind> {
        match self {
            TraitRef::Known(kind) => Some(*kind),
            TraitRef::Unknown(_) => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TraitRef::Known(kind) => kind.name(),
            TraitRef::Unknown(name) => name,
        }
    }
}

impl From<TraitKind> for TraitRef {
    fn from(kind: TraitKind) -> Self {
        TraitRef::Known(kind)
    }
}

/// Category names match ignoring ASCII case and surrounding whitespace.
impl From<String> for TraitRef {
    fn from(name: String) -> Self {
        match name.parse::<TraitKind>() {
            Ok(kind) => TraitRef::Known(kind),
            Err(_) => TraitRef::Unknown(name),
        }
    }
}

impl From<&str> for TraitRef {
    fn from(name: &str) -> Self {
        TraitRef::from(name.to_string())
    }
}

impl From<TraitRef> for String {
    fn from(trait_ref: TraitRef) -> Self {
        trait_ref.name().to_string()
    }
}

impl fmt::Display for TraitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A user-declared assertion about a character's trait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// The claim as written, e.g. "Always tells the truth".
    #[serde(alias = "claim")]
    pub text: String,

    #[serde(rename = "trait")]
    pub trait_ref: TraitRef,

    #[serde(alias = "expectedLevel")]
    pub expected_level: TraitLevel,
}

impl Claim {
    pub fn new(
        text: impl Into<String>,
        trait_ref: impl Into<TraitRef>,
        expected_level: TraitLevel,
    ) -> Self {
        Self {
            text: text.into(),
            trait_ref: trait_ref.into(),
            expected_level,
        }
    }
}

/// Parse claims from either a JSON array or `Trait|level|claim text` lines.
///
/// In the line format, blank lines and lines starting with `#` are skipped.
pub fn parse_claims(input: &str) -> Result<Vec<Claim>, ClaimError> {
    let trimmed = input.trim_start();
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }

    input
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_no, line)| parse_claim_line(line_no, line))
        .collect()
}

/// Parse a single `Trait|level|claim text` line.
pub fn parse_claim_line(line_no: usize, line: &str) -> Result<Claim, ClaimError> {
    let parts: Vec<&str> = line.splitn(3, '|').map(str::trim).collect();
    let [trait_name, level, text] = parts.as_slice() else {
        return Err(ClaimError::MalformedLine {
            line: line_no,
            content: line.to_string(),
        });
    };

    if trait_name.is_empty() {
        return Err(ClaimError::MalformedLine {
            line: line_no,
            content: line.to_string(),
        });
    }

    let expected_level = level.parse::<TraitLevel>().map_err(|_| ClaimError::InvalidLevel {
        line: line_no,
        level: level.to_string(),
    })?;

    if text.is_empty() {
        return Err(ClaimError::EmptyText { line: line_no });
    }

    Ok(Claim::new(*text, *trait_name, expected_level))
}
