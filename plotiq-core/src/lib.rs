//! Character consistency analysis for fiction.
//!
//! This crate provides:
//! - A six-stage pipeline: chunking, action extraction, trait aggregation,
//!   claim comparison, a final decision and a readable explanation
//! - A step-by-step wizard over the same stages
//! - Plain-text and JSON report export
//!
//! # Quick Start
//!
//! ```ignore
//! use plotiq_core::{analyze, Claim, TraitKind, TraitLevel};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let claims = vec![Claim::new("Avoids violence", TraitKind::Violence, TraitLevel::Low)];
//!
//!     let result = analyze(&std::fs::read_to_string("novel.txt")?, "Marcus", &claims).await;
//!     println!("{}", result.explanation);
//!
//!     plotiq_core::write_report(&result, "reports").await?;
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod analyzer;
pub mod config;
pub mod report;
pub mod sample;
pub mod testing;
pub mod wizard;

// Primary public API
pub use analysis::{
    parse_claims, ActionRecord, Chunk, ChunkId, Claim, ClaimError, ComparisonResult, EmotionTag,
    Trait, TraitKind, TraitLevel, TraitRef, Verdict,
};
pub use analyzer::{analyze, AnalysisId, AnalysisJob, AnalysisResult, Analyzer};
pub use config::{AnalysisConfig, ConfigError};
pub use report::{read_json, render_report, report_file_name, write_json, write_report, ReportError};
pub use testing::StoryHarness;
pub use wizard::{AnalysisWizard, WizardError, WizardStep};
