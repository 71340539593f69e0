//! Human-readable explanation of an analysis.

use super::compare::ComparisonResult;
use super::traits::{find_trait, Trait};

/// Most contradicted claims listed in an explanation. Later ones are
/// left out without notice.
pub const MAX_EXPLAINED: usize = 3;

/// Marker opening each contradicted claim entry.
pub const BULLET: &str = "•";

/// Render the explanation for a character's comparisons.
///
/// With no contradictions this is a single sentence naming the character.
/// Otherwise it is a header with the contradiction count followed by one
/// bullet entry per contradicted claim, up to [`MAX_EXPLAINED`]. When the
/// claim's trait has evidence, the first piece is quoted under the entry.
pub fn explain(results: &[ComparisonResult], traits: &[Trait], character_name: &str) -> String {
    let contradicted: Vec<&ComparisonResult> = results.iter().filter(|r| !r.supported).collect();

    if contradicted.is_empty() {
        return format!(
            "{character_name}'s claims align well with their observed behavior, showing consistency between their stated beliefs and actions."
        );
    }

    let mut lines = vec![
        format!(
            "{character_name} has {} contradiction(s) in their character profile:",
            contradicted.len()
        ),
        String::new(),
    ];

    for result in contradicted.iter().take(MAX_EXPLAINED) {
        lines.push(format!("{BULLET} Claim: {}", result.claim_text));
        if let Some(note) = result.contradiction_notes.first() {
            lines.push(format!("  Evidence: {note}"));
        }

        let observed = result
            .trait_ref
            .kind()
            .and_then(|kind| find_trait(traits, kind))
            .and_then(|t| t.evidence.first());
        if let Some(example) = observed {
            lines.push(format!("  Observed: \"{example}\""));
        }
    }

    lines.join("\n")
}
