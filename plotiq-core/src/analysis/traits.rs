//! Trait aggregation.
//!
//! Buckets action records into the four fixed trait categories by keyword
//! and grades each category by how many records mention it.

use super::extract::ActionRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Most evidence strings kept per trait.
pub const MAX_EVIDENCE: usize = 3;

/// The closed set of behavioral trait categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraitKind {
    Violence,
    Honesty,
    Risk,
    Authority,
}

impl TraitKind {
    pub fn all() -> &'static [TraitKind] {
        &[
            TraitKind::Violence,
            TraitKind::Honesty,
            TraitKind::Risk,
            TraitKind::Authority,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            TraitKind::Violence => "Violence",
            TraitKind::Honesty => "Honesty",
            TraitKind::Risk => "Risk",
            TraitKind::Authority => "Authority",
        }
    }

    /// Lowercase keywords whose presence ties a record to this trait.
    ///
    /// Matching is by substring, so `aggress` covers "aggressive" and
    /// "aggression".
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            TraitKind::Violence => &["fight", "attack", "aggress", "hurt", "harm", "violent"],
            TraitKind::Honesty => &["truth", "honest", "lie", "deceive", "sincere", "transparent"],
            TraitKind::Risk => &["danger", "risky", "bold", "afraid", "cautious", "adventurous"],
            TraitKind::Authority => &["lead", "command", "obey", "rebel", "power", "control"],
        }
    }

    /// Check whether lowercased text mentions this trait.
    fn mentioned_in(&self, lowered: &str) -> bool {
        self.keywords().iter().any(|keyword| lowered.contains(keyword))
    }
}

impl fmt::Display for TraitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TraitKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TraitKind::all()
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| s.to_string())
    }
}

/// Qualitative trait level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraitLevel {
    Low,
    Medium,
    High,
}

impl TraitLevel {
    /// Grade a count of matching records: 0–1 low, 2–3 medium, 4+ high.
    pub fn from_count(count: usize) -> Self {
        match count {
            0..=1 => TraitLevel::Low,
            2..=3 => TraitLevel::Medium,
            _ => TraitLevel::High,
        }
    }

    /// Ordinal used for comparisons: low = 1, medium = 2, high = 3.
    pub fn ordinal(&self) -> u8 {
        match self {
            TraitLevel::Low => 1,
            TraitLevel::Medium => 2,
            TraitLevel::High => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TraitLevel::Low => "low",
            TraitLevel::Medium => "medium",
            TraitLevel::High => "high",
        }
    }

    pub fn all() -> &'static [TraitLevel] {
        &[TraitLevel::Low, TraitLevel::Medium, TraitLevel::High]
    }
}

impl fmt::Display for TraitLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TraitLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(TraitLevel::Low),
            "medium" => Ok(TraitLevel::Medium),
            "high" => Ok(TraitLevel::High),
            _ => Err(s.to_string()),
        }
    }
}

/// Aggregated level of one trait category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trait {
    pub kind: TraitKind,
    pub level: TraitLevel,
    /// Actions of the first matching records, at most [`MAX_EVIDENCE`].
    pub evidence: Vec<String>,
}

/// Build one trait per category from the extracted actions.
///
/// Always returns four traits, in [`TraitKind::all`] order.
pub fn build_traits(actions: &[ActionRecord]) -> Vec<Trait> {
    let lowered: Vec<String> = actions
        .iter()
        .map(|a| format!("{} {}", a.action, a.decision).to_lowercase())
        .collect();

    let traits: Vec<Trait> = TraitKind::all()
        .iter()
        .map(|&kind| {
            let matching: Vec<&ActionRecord> = actions
                .iter()
                .zip(&lowered)
                .filter(|(_, text)| kind.mentioned_in(text))
                .map(|(action, _)| action)
                .collect();

            Trait {
                kind,
                level: TraitLevel::from_count(matching.len()),
                evidence: matching
                    .iter()
                    .take(MAX_EVIDENCE)
                    .map(|a| a.action.clone())
                    .collect(),
            }
        })
        .collect();

    for t in &traits {
        debug!(kind = %t.kind, level = %t.level, evidence = t.evidence.len(), "built trait");
    }
    traits
}

/// Find the trait of the given kind.
pub fn find_trait(traits: &[Trait], kind: TraitKind) -> Option<&Trait> {
    traits.iter().find(|t| t.kind == kind)
}
