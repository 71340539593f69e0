//! Testing utilities for the analysis pipeline.
//!
//! This module provides tools for integration testing:
//! - `StoryHarness` for building stories with predictable chunk boundaries
//! - Assertion helpers for verifying chunks and results

use crate::analysis::chunker::CHUNKS_PER_CHAPTER;
use crate::analysis::{word_count, Chunk, ChunkId, Claim, TraitKind, TraitLevel, Verdict};
use crate::analyzer::{AnalysisResult, Analyzer};
use crate::config::AnalysisConfig;

/// Builds a story one sentence at a time and runs the pipeline over it.
///
/// [`StoryHarness::run`] places every sentence in its own chunk, so tests
/// can reason about extraction and aggregation without random boundaries.
pub struct StoryHarness {
    /// Character under analysis.
    pub character_name: String,
    sentences: Vec<String>,
    claims: Vec<Claim>,
}

impl StoryHarness {
    /// Create an empty story about "Test Hero".
    pub fn new() -> Self {
        Self::with_character("Test Hero")
    }

    /// Create an empty story about a named character.
    pub fn with_character(name: impl Into<String>) -> Self {
        Self {
            character_name: name.into(),
            sentences: Vec::new(),
            claims: Vec::new(),
        }
    }

    /// Append a sentence.
    pub fn sentence(&mut self, text: impl Into<String>) -> &mut Self {
        self.sentences.push(text.into());
        self
    }

    /// Append the same sentence `times` times.
    pub fn repeat(&mut self, text: &str, times: usize) -> &mut Self {
        for _ in 0..times {
            self.sentence(text);
        }
        self
    }

    /// Add a backstory claim.
    pub fn claim(&mut self, text: &str, kind: TraitKind, level: TraitLevel) -> &mut Self {
        self.claims.push(Claim::new(text, kind, level));
        self
    }

    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    /// The whole story as one text.
    pub fn novel_text(&self) -> String {
        self.sentences.join(" ")
    }

    /// One chunk per sentence, numbered the way the chunker numbers them.
    pub fn chunks(&self) -> Vec<Chunk> {
        self.sentences
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let i = i as u32;
                let chapter = i / CHUNKS_PER_CHAPTER + 1;
                let order = i % CHUNKS_PER_CHAPTER + 1;
                Chunk {
                    id: ChunkId::new(chapter, order),
                    chapter,
                    order,
                    text: text.clone(),
                    word_count: word_count(text),
                }
            })
            .collect()
    }

    /// Run every stage after chunking over the sentence-per-chunk split.
    pub fn run(&self) -> AnalysisResult {
        AnalysisResult::from_chunks(self.chunks(), &self.character_name, &self.claims)
    }

    /// Run the full pipeline, chunker included, with a seeded config.
    pub fn run_seeded(&self, config: AnalysisConfig) -> AnalysisResult {
        match Analyzer::new(config) {
            Ok(analyzer) => analyzer.run(&self.novel_text(), &self.character_name, &self.claims),
            Err(e) => panic!("invalid test config: {e}"),
        }
    }
}

impl Default for StoryHarness {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert chunk sizes, positions and ids are well formed.
#[track_caller]
pub fn assert_chunk_invariants(chunks: &[Chunk], max_words: usize) {
    for (i, chunk) in chunks.iter().enumerate() {
        assert!(
            chunk.word_count > 0 && chunk.word_count <= max_words,
            "Chunk {} has {} words, expected 1..={max_words}",
            chunk.id,
            chunk.word_count
        );
        assert_eq!(chunk.word_count, word_count(&chunk.text));
        assert!((1..=CHUNKS_PER_CHAPTER).contains(&chunk.order));
        assert_eq!(chunk.id, ChunkId::new(chunk.chapter, chunk.order));

        let expected_chapter = i as u32 / CHUNKS_PER_CHAPTER + 1;
        assert_eq!(
            chunk.chapter, expected_chapter,
            "Chunk {i} should be in chapter {expected_chapter}"
        );
    }
}

/// Assert a trait was aggregated at the expected level.
#[track_caller]
pub fn assert_trait_level(result: &AnalysisResult, kind: TraitKind, level: TraitLevel) {
    let actual = result.trait_level(kind);
    assert_eq!(actual, level, "Expected {kind} to be {level}, got {actual}");
}

/// Assert whether the claim with the given text was supported.
#[track_caller]
pub fn assert_claim_supported(result: &AnalysisResult, claim_text: &str, supported: bool) {
    let comparison = result
        .comparisons
        .iter()
        .find(|c| c.claim_text == claim_text);
    match comparison {
        Some(c) => assert_eq!(
            c.supported, supported,
            "Claim '{claim_text}' supported = {}, notes: {:?}",
            c.supported, c.contradiction_notes
        ),
        None => panic!("No comparison for claim '{claim_text}'"),
    }
}

/// Assert the final decision.
#[track_caller]
pub fn assert_decision(result: &AnalysisResult, verdict: Verdict) {
    assert_eq!(
        result.final_decision, verdict,
        "Expected {verdict}, got {} with {} contradiction(s)",
        result.final_decision, result.contradiction_count
    );
}
