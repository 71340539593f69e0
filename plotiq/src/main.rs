//! PlotIQ command-line application.
//!
//! Checks a character's backstory claims against their behavior in a story.
//!
//! # Wizard Mode
//!
//! Run with `--wizard` for a step-by-step, line-oriented walkthrough:
//!
//! ```bash
//! cargo run -p plotiq -- --wizard --novel story.txt
//! ```

mod cli;
mod headless;

use anyhow::{Context, Result};
use plotiq_core::sample::default_claims;
use plotiq_core::{
    parse_claims, render_report, write_json, write_report, AnalysisConfig, AnalysisWizard,
    Analyzer,
};
use std::io::{self, Write};
use tokio::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::CliArgs;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let args = cli::parse_args(&args)?;

    if args.help {
        cli::print_help();
        return Ok(());
    }

    let mut config = AnalysisConfig::from_env().context("Invalid PLOTIQ_* configuration")?;
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    let analyzer = Analyzer::new(config).context("Invalid chunk sizes")?;

    if args.wizard {
        return run_wizard(&args, analyzer).await;
    }

    run_once(&args, &analyzer).await
}

/// One-shot analysis: print the report, optionally export it.
async fn run_once(args: &CliArgs, analyzer: &Analyzer) -> Result<()> {
    let Some(novel_path) = &args.novel else {
        cli::print_help();
        anyhow::bail!("--novel is required (or use --wizard)");
    };
    let name = args.name.as_deref().context("--name is required")?;

    let novel = fs::read_to_string(novel_path)
        .await
        .with_context(|| format!("Failed to read novel {}", novel_path.display()))?;

    let claims = match &args.claims {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read claims {}", path.display()))?;
            parse_claims(&raw).with_context(|| format!("Invalid claims in {}", path.display()))?
        }
        None => default_claims(),
    };

    let result = analyzer.analyze(&novel, name, &claims).await;
    info!(id = %result.id, "analysis finished");

    let mut stdout = io::stdout();
    write!(stdout, "{}", render_report(&result))?;
    stdout.flush()?;

    if let Some(dir) = &args.out {
        let path = write_report(&result, dir)
            .await
            .context("Failed to write report")?;
        eprintln!("Report written to {}", path.display());
    }

    if let Some(path) = &args.json {
        write_json(&result, path)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!("JSON written to {}", path.display());
    }

    Ok(())
}

/// Interactive wizard over stdin/stdout.
///
/// Starts from the sample story unless `--novel` is given.
async fn run_wizard(args: &CliArgs, analyzer: Analyzer) -> Result<()> {
    let mut wizard = AnalysisWizard::with_sample(analyzer);

    if let Some(path) = &args.novel {
        wizard.novel_text = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read novel {}", path.display()))?;
        wizard.character_name.clear();
    }
    if let Some(name) = &args.name {
        wizard.character_name = name.clone();
    }
    if let Some(path) = &args.claims {
        let raw = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read claims {}", path.display()))?;
        wizard.claims = parse_claims(&raw)?;
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    headless::run_wizard(wizard, stdin.lock(), &mut stdout).await
}
