//! Command-line argument parsing.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

/// Parsed command-line options.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub novel: Option<PathBuf>,
    pub name: Option<String>,
    pub claims: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub json: Option<PathBuf>,
    pub seed: Option<u64>,
    pub wizard: bool,
    pub help: bool,
}

/// Parse arguments, skipping the program name in `args[0]`.
pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut parsed = CliArgs::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .with_context(|| format!("{flag} needs a value"))
        };

        match arg.as_str() {
            "-h" | "--help" => parsed.help = true,
            "--wizard" => parsed.wizard = true,
            "--novel" => parsed.novel = Some(value("--novel")?.into()),
            "--name" => parsed.name = Some(value("--name")?),
            "--claims" => parsed.claims = Some(value("--claims")?.into()),
            "--out" => parsed.out = Some(value("--out")?.into()),
            "--json" => parsed.json = Some(value("--json")?.into()),
            "--seed" => {
                let raw = value("--seed")?;
                let seed = raw
                    .parse()
                    .with_context(|| format!("--seed expects a number, got {raw:?}"))?;
                parsed.seed = Some(seed);
            }
            other => bail!("Unknown argument: {other} (try --help)"),
        }
    }

    Ok(parsed)
}

pub fn print_help() {
    println!("PlotIQ - character consistency analysis");
    println!();
    println!("USAGE:");
    println!("  plotiq --novel <FILE> --name <NAME> [OPTIONS]");
    println!("  plotiq --wizard [--novel <FILE>]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help          Show this help message");
    println!("  --novel <FILE>      Story text to analyze");
    println!("  --name <NAME>       Character to analyze");
    println!("  --claims <FILE>     Backstory claims, as a JSON array or Trait|level|text lines");
    println!("                      (default: four sample claims)");
    println!("  --out <DIR>         Also write <NAME>-analysis-report.txt into DIR");
    println!("  --json <FILE>       Also write the full result as JSON");
    println!("  --seed <N>          Seed chunk boundaries for reproducible runs");
    println!("  --wizard            Step through the analysis interactively");
    println!();
    println!("ENVIRONMENT:");
    println!("  PLOTIQ_MIN_WORDS    Minimum words before a chunk may end early (default: 500)");
    println!("  PLOTIQ_MAX_WORDS    Maximum words per chunk (default: 1000)");
    println!("  PLOTIQ_SEED         Default chunking seed");
    println!("  RUST_LOG            Log filter, e.g. plotiq_core=debug");
    println!();
    println!("TRAITS:");
    println!("  Violence, Honesty, Risk, Authority   (levels: low, medium, high)");
    println!();
    println!("EXAMPLES:");
    println!("  plotiq --novel story.txt --name Marcus");
    println!("  plotiq --novel story.txt --name Elena --claims elena.txt --out reports");
    println!("  plotiq --wizard                      # Walk through the sample story");
}
