//! Action extraction.
//!
//! Scans chunk text for behavioral cues with three case-insensitive
//! patterns, checked in a fixed order:
//! 1. a subject followed by a decision verb ("she decided", "the character took")
//! 2. a subject followed by a named emotion ("they felt afraid")
//! 3. explicit `action:` / `decision:` / `emotion:` markers
//!
//! Chunks with no cue at all still produce one record built from their
//! opening sentences.

use super::chunker::{Chunk, ChunkId};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Upper bound on records taken from a single chunk.
pub const MAX_RECORDS_PER_CHUNK: usize = 3;

const TERMINALS: &[char] = &['.', '!', '?'];

/// Characters of the matched cue quoted in the decision text.
const DECISION_PREVIEW_CHARS: usize = 30;

const FALLBACK_ACTION: &str = "Action in progress";
const FALLBACK_DECISION: &str = "Pending decision";

lazy_static::lazy_static! {
    static ref DECISION_CUE: Regex = Regex::new(
        r"(?i)\b(?:he|she|they|the character)\s+(?:decided|chose|began|started|went|did|made|took)\b",
    )
    .expect("decision cue pattern is valid");

    static ref EMOTION_CUE: Regex = Regex::new(
        r"(?i)\b(?:he|she|they)\s+(?:felt|feels|feel)\s+(?:happy|sad|angry|afraid|determined|confused|hopeful)\b",
    )
    .expect("emotion cue pattern is valid");

    static ref MARKER_CUE: Regex = Regex::new(r"(?i)\b(?:action|decision|emotion):")
        .expect("marker cue pattern is valid");
}

/// How an action record was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionTag {
    /// A cue pattern matched.
    Detected,
    /// No cue matched; the record was synthesized from the opening text.
    Implied,
}

impl EmotionTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionTag::Detected => "detected",
            EmotionTag::Implied => "implied",
        }
    }
}

impl fmt::Display for EmotionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An observed behavior tied to the chunk it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub chunk_id: ChunkId,
    /// The observed behavior, usually the sentence holding the cue.
    pub action: String,
    /// Decision context inferred for the behavior.
    pub decision: String,
    pub emotion: EmotionTag,
}

/// The sentence around the byte range `start..end`.
fn enclosing_sentence(text: &str, start: usize, end: usize) -> &str {
    let from = text[..start].rfind(TERMINALS).map(|i| i + 1).unwrap_or(0);
    let to = text[end..]
        .find(TERMINALS)
        .map(|i| end + i + 1)
        .unwrap_or(text.len());
    text[from..to].trim()
}

/// Extract action records from one chunk's text.
///
/// Each cue pattern contributes at most one record. Never returns an
/// empty list.
pub fn extract_actions(text: &str, chunk_id: &ChunkId) -> Vec<ActionRecord> {
    let cues: [&Regex; 3] = [&DECISION_CUE, &EMOTION_CUE, &MARKER_CUE];

    let mut actions: Vec<ActionRecord> = cues
        .iter()
        .filter_map(|cue| cue.find(text))
        .take(MAX_RECORDS_PER_CHUNK)
        .map(|m| {
            let preview: String = m.as_str().chars().take(DECISION_PREVIEW_CHARS).collect();
            ActionRecord {
                chunk_id: chunk_id.clone(),
                action: enclosing_sentence(text, m.start(), m.end()).to_string(),
                decision: format!("Decision related to: {preview}..."),
                emotion: EmotionTag::Detected,
            }
        })
        .collect();

    if actions.is_empty() {
        let mut fragments = text.split(TERMINALS).map(str::trim).filter(|f| !f.is_empty());
        actions.push(ActionRecord {
            chunk_id: chunk_id.clone(),
            action: fragments.next().unwrap_or(FALLBACK_ACTION).to_string(),
            decision: fragments.next().unwrap_or(FALLBACK_DECISION).to_string(),
            emotion: EmotionTag::Implied,
        });
    }

    actions
}

/// Extract action records from every chunk, in chunk order.
pub fn extract_all(chunks: &[Chunk]) -> Vec<ActionRecord> {
    let actions: Vec<ActionRecord> = chunks
        .iter()
        .flat_map(|chunk| extract_actions(&chunk.text, &chunk.id))
        .collect();

    debug!(
        chunks = chunks.len(),
        actions = actions.len(),
        detected = actions.iter().filter(|a| a.emotion == EmotionTag::Detected).count(),
        "extracted actions"
    );
    actions
}
