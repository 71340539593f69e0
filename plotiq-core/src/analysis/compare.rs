//! Claim comparison.

use super::claim::{Claim, TraitRef};
use super::traits::{find_trait, Trait};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Note recorded when a claim's trait has no aggregated level.
pub const NO_EVIDENCE_NOTE: &str = "No evidence found for trait";

/// Largest ordinal gap between expected and observed level that still
/// supports a claim.
pub const MAX_SUPPORTED_GAP: u8 = 1;

/// Outcome of checking one claim against the observed traits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub claim_text: String,
    /// The trait the claim referred to.
    #[serde(rename = "trait")]
    pub trait_ref: TraitRef,
    pub supported: bool,
    /// Why the claim is contradicted. Empty when supported.
    pub contradiction_notes: Vec<String>,
}

fn compare_claim(claim: &Claim, traits: &[Trait]) -> ComparisonResult {
    let observed = claim.trait_ref.kind().and_then(|kind| find_trait(traits, kind));

    let Some(observed) = observed else {
        return ComparisonResult {
            claim_text: claim.text.clone(),
            trait_ref: claim.trait_ref.clone(),
            supported: false,
            contradiction_notes: vec![NO_EVIDENCE_NOTE.to_string()],
        };
    };

    let gap = claim.expected_level.ordinal().abs_diff(observed.level.ordinal());
    let supported = gap <= MAX_SUPPORTED_GAP;
    let contradiction_notes = if supported {
        Vec::new()
    } else {
        vec![format!(
            "Expected {} but found {}",
            claim.expected_level, observed.level
        )]
    };

    ComparisonResult {
        claim_text: claim.text.clone(),
        trait_ref: claim.trait_ref.clone(),
        supported,
        contradiction_notes,
    }
}

/// Compare every claim with the observed traits, preserving claim order.
pub fn compare_claims(claims: &[Claim], traits: &[Trait]) -> Vec<ComparisonResult> {
    let results: Vec<ComparisonResult> = claims.iter().map(|c| compare_claim(c, traits)).collect();

    debug!(
        claims = results.len(),
        unsupported = count_unsupported(&results),
        "compared claims"
    );
    results
}

/// Number of comparisons that did not support their claim.
pub fn count_unsupported(results: &[ComparisonResult]) -> usize {
    results.iter().filter(|r| !r.supported).count()
}
