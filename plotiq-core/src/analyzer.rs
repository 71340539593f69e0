//! Analyzer - the primary public API for character analysis.
//!
//! This module composes the pipeline stages into a single call that takes
//! a novel, a character name and backstory claims, and returns a complete
//! [`AnalysisResult`].

use crate::analysis::{
    build_traits, compare_claims, count_unsupported, decide, explain, extract_all,
    split_into_chunks, ActionRecord, Chunk, Claim, ComparisonResult, Trait, TraitKind, TraitLevel,
    Verdict,
};
use crate::config::{AnalysisConfig, ConfigError};
use futures::future::join_all;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;
use uuid::Uuid;

/// Unique identifier for one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnalysisId(Uuid);

impl AnalysisId {
    /// Create a new unique analysis ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AnalysisId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The complete outcome of one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub id: AnalysisId,
    pub character_name: String,

    /// The backstory claims as given.
    pub claims: Vec<Claim>,

    pub chunks: Vec<Chunk>,
    pub actions: Vec<ActionRecord>,

    /// One trait per category, in fixed order.
    pub traits: Vec<Trait>,

    /// One comparison per claim, in claim order.
    pub comparisons: Vec<ComparisonResult>,

    /// Number of unsupported comparisons.
    pub contradiction_count: usize,

    pub final_decision: Verdict,
    pub explanation: String,
}

impl AnalysisResult {
    /// Run every stage after chunking over already-split chunks.
    pub fn from_chunks(chunks: Vec<Chunk>, character_name: &str, claims: &[Claim]) -> Self {
        let actions = extract_all(&chunks);
        let traits = build_traits(&actions);
        let comparisons = compare_claims(claims, &traits);
        Self::from_stages(character_name, claims.to_vec(), chunks, actions, traits, comparisons)
    }

    /// Decide and explain from stage outputs that were already computed.
    ///
    /// `comparisons` must have been produced from `claims` and `traits`.
    pub fn from_stages(
        character_name: &str,
        claims: Vec<Claim>,
        chunks: Vec<Chunk>,
        actions: Vec<ActionRecord>,
        traits: Vec<Trait>,
        comparisons: Vec<ComparisonResult>,
    ) -> Self {
        let final_decision = decide(&comparisons);
        let explanation = explain(&comparisons, &traits, character_name);
        let contradiction_count = count_unsupported(&comparisons);

        info!(
            character = character_name,
            chunks = chunks.len(),
            actions = actions.len(),
            contradictions = contradiction_count,
            decision = final_decision.value(),
            "analysis complete"
        );

        Self {
            id: AnalysisId::new(),
            character_name: character_name.to_string(),
            claims,
            chunks,
            actions,
            traits,
            comparisons,
            contradiction_count,
            final_decision,
            explanation,
        }
    }

    /// Check whether the character was judged consistent.
    pub fn is_consistent(&self) -> bool {
        self.final_decision.is_consistent()
    }

    /// Get the observed level of a trait.
    pub fn trait_level(&self, kind: TraitKind) -> TraitLevel {
        self.traits
            .iter()
            .find(|t| t.kind == kind)
            .map(|t| t.level)
            .unwrap_or(TraitLevel::Low)
    }

    /// Comparisons that contradicted their claim.
    pub fn contradictions(&self) -> impl Iterator<Item = &ComparisonResult> {
        self.comparisons.iter().filter(|c| !c.supported)
    }

    /// Number of chapters the novel was split into.
    pub fn chapter_count(&self) -> u32 {
        self.chunks.last().map(|c| c.chapter).unwrap_or(0)
    }
}

/// Input for one run of [`Analyzer::analyze_many`].
#[derive(Debug, Clone)]
pub struct AnalysisJob {
    pub novel_text: String,
    pub character_name: String,
    pub claims: Vec<Claim>,
}

impl AnalysisJob {
    pub fn new(
        novel_text: impl Into<String>,
        character_name: impl Into<String>,
        claims: Vec<Claim>,
    ) -> Self {
        Self {
            novel_text: novel_text.into(),
            character_name: character_name.into(),
            claims,
        }
    }
}

/// Runs the analysis pipeline with a fixed configuration.
///
/// Holds no state between runs, so one analyzer can serve any number of
/// concurrent analyses.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    /// Create an analyzer, rejecting unusable chunk sizes.
    pub fn new(config: AnalysisConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create an analyzer from `PLOTIQ_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(AnalysisConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Split a novel into chunks using the configured sizes and seed.
    pub fn chunk(&self, novel_text: &str) -> Vec<Chunk> {
        let mut rng = self.config.chunk_rng();
        self.chunk_with_rng(novel_text, &mut rng)
    }

    /// Split a novel into chunks with a specific RNG (useful for testing).
    pub fn chunk_with_rng<R: Rng + ?Sized>(&self, novel_text: &str, rng: &mut R) -> Vec<Chunk> {
        split_into_chunks(
            novel_text,
            self.config.min_words,
            self.config.max_words,
            rng,
        )
    }

    /// Run the full pipeline synchronously.
    pub fn run(&self, novel_text: &str, character_name: &str, claims: &[Claim]) -> AnalysisResult {
        AnalysisResult::from_chunks(self.chunk(novel_text), character_name, claims)
    }

    /// Run the full pipeline with a specific RNG for chunking.
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        novel_text: &str,
        character_name: &str,
        claims: &[Claim],
        rng: &mut R,
    ) -> AnalysisResult {
        AnalysisResult::from_chunks(self.chunk_with_rng(novel_text, rng), character_name, claims)
    }

    /// Run the full pipeline.
    ///
    /// The work is CPU-only and never yields; the async signature lets hosts
    /// call it alongside their other non-blocking work.
    pub async fn analyze(
        &self,
        novel_text: &str,
        character_name: &str,
        claims: &[Claim],
    ) -> AnalysisResult {
        self.run(novel_text, character_name, claims)
    }

    /// Run several independent analyses concurrently.
    ///
    /// Results are returned in job order.
    pub async fn analyze_many(&self, jobs: &[AnalysisJob]) -> Vec<AnalysisResult> {
        join_all(
            jobs.iter()
                .map(|job| self.analyze(&job.novel_text, &job.character_name, &job.claims)),
        )
        .await
    }
}

/// Analyze a novel with the default configuration.
pub async fn analyze(novel_text: &str, character_name: &str, claims: &[Claim]) -> AnalysisResult {
    Analyzer::default()
        .analyze(novel_text, character_name, claims)
        .await
}
