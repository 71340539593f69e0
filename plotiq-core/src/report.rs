//! Report export.
//!
//! Renders an [`AnalysisResult`] as a plain-text report and writes it, or the
//! full result as JSON, to disk.

use crate::analyzer::AnalysisResult;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::info;

/// Errors from report export.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const TITLE: &str = "CHARACTER ANALYSIS REPORT";

/// Render the plain-text report.
pub fn render_report(result: &AnalysisResult) -> String {
    let mut lines = vec![
        TITLE.to_string(),
        "=".repeat(TITLE.len()),
        String::new(),
        format!("Character: {}", result.character_name),
        format!("Final Decision: {}", result.final_decision),
        format!("Contradictions Found: {}", result.contradiction_count),
        String::new(),
        "EXPLANATION:".to_string(),
        result.explanation.clone(),
        String::new(),
        "DETAILED ANALYSIS:".to_string(),
    ];

    for comparison in &result.comparisons {
        let status = if comparison.supported {
            "SUPPORTED"
        } else {
            "CONTRADICTED"
        };
        lines.push(String::new());
        lines.push(format!("Claim: \"{}\"", comparison.claim_text));
        lines.push(format!("Status: {status}"));
        if !comparison.contradiction_notes.is_empty() {
            lines.push(format!(
                "Details: {}",
                comparison.contradiction_notes.join(", ")
            ));
        }
    }

    lines.push(String::new());
    lines.push("EXTRACTED TRAITS:".to_string());
    for t in &result.traits {
        lines.push(format!("{}: {}", t.kind, t.level.as_str().to_uppercase()));
    }

    let mut report = lines.join("\n");
    report.push('\n');
    report
}

/// File name for a character's text report: `<name>-analysis-report.txt`.
///
/// Characters other than letters, digits, `-` and `_` become `_`.
pub fn report_file_name(character_name: &str) -> String {
    let sanitized: String = character_name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{sanitized}-analysis-report.txt")
}

/// Write the text report into `dir`, returning the file path.
pub async fn write_report(
    result: &AnalysisResult,
    dir: impl AsRef<Path>,
) -> Result<PathBuf, ReportError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).await?;

    let path = dir.join(report_file_name(&result.character_name));
    fs::write(&path, render_report(result)).await?;

    info!(path = %path.display(), "wrote analysis report");
    Ok(path)
}

/// Write the full result as pretty JSON.
pub async fn write_json(result: &AnalysisResult, path: impl AsRef<Path>) -> Result<(), ReportError> {
    let content = serde_json::to_string_pretty(result)?;
    fs::write(path, content).await?;
    Ok(())
}

/// Read a result written by [`write_json`].
pub async fn read_json(path: impl AsRef<Path>) -> Result<AnalysisResult, ReportError> {
    let content = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}
