//! The analysis pipeline.
//!
//! Six stages, each a pure function over the previous stage's output:
//! chunking, action extraction, trait aggregation, claim comparison,
//! the final decision, and the explanation.

pub mod chunker;
pub mod claim;
pub mod compare;
pub mod decide;
pub mod explain;
pub mod extract;
pub mod traits;

pub use chunker::{split_into_chunks, split_sentences, word_count, Chunk, ChunkId};
pub use claim::{parse_claims, Claim, ClaimError, TraitRef};
pub use compare::{compare_claims, count_unsupported, ComparisonResult};
pub use decide::{decide, Verdict, CONTRADICTION_THRESHOLD};
pub use explain::explain;
pub use extract::{extract_actions, extract_all, ActionRecord, EmotionTag};
pub use traits::{build_traits, find_trait, Trait, TraitKind, TraitLevel};
