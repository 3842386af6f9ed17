//! te38-digest CLI
//!
//! Digests one TE38 test's data files into clean CSV tables.
//!
//! # Usage
//!
//! ```bash
//! # Digest a test (writes test.csv and test_HSD.csv next to the input)
//! te38-digest path/to/test.TSV
//!
//! # Override the central-region width and the acquisition rate
//! te38-digest path/to/test.TSV --length-factor 0.05 --rate 500
//!
//! # Only the main trace, skipping the high speed data
//! te38-digest path/to/test.TSV --skip-hsd
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use te38_digest::config::DigestConfig;
use te38_digest::digest;

#[derive(Parser, Debug)]
#[command(name = "te38-digest")]
#[command(about = "Digest TE38 tribometer test files into clean CSV tables")]
#[command(version)]
struct CliArgs {
    /// Path to the main test file (e.g. test.TSV). Burst files are located
    /// next to it by their recorded names.
    trace: PathBuf,

    /// Optional TOML config file with digestion parameters.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Central-region width as a fraction of track length (overrides config).
    #[arg(long, value_name = "FRACTION")]
    length_factor: Option<f64>,

    /// HSD acquisition rate in Hz (overrides config and the value parsed
    /// from the first burst file).
    #[arg(long, value_name = "HZ")]
    rate: Option<f64>,

    /// Directory for the output CSVs (default: next to the trace file).
    #[arg(long, short)]
    output_dir: Option<PathBuf>,

    /// Process bursts one at a time instead of across a thread pool.
    #[arg(long)]
    sequential: bool,

    /// Skip the high speed data files, only clean the main trace.
    #[arg(long)]
    skip_hsd: bool,

    /// Skip the main trace CSV, only digest the high speed data.
    #[arg(long)]
    skip_main: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = CliArgs::parse();

    let mut config = match &args.config {
        Some(path) => DigestConfig::from_file(path)?,
        None => DigestConfig::default(),
    };
    if let Some(factor) = args.length_factor {
        config.length_factor = factor;
    }
    if let Some(rate) = args.rate {
        config.acquisition_rate_hz = Some(rate);
    }
    config.validate()?;

    if !args.trace.is_file() {
        anyhow::bail!("trace file not found: {}", args.trace.display());
    }
    if let Some(dir) = &args.output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output dir {}", dir.display()))?;
    }

    if !args.skip_main {
        let path = digest::digest_main_trace(&args.trace, args.output_dir.as_deref())
            .context("failed to digest main trace")?;
        info!(output = %path.display(), "Main trace digested");
    }

    if !args.skip_hsd {
        let report = digest::digest_hsd_files(
            &args.trace,
            &config,
            args.output_dir.as_deref(),
            args.sequential,
        )
        .context("failed to digest high speed data")?;

        info!(
            output = %report.output_path.display(),
            bursts = report.bursts_total,
            rows = report.rows_written,
            "High speed data digested"
        );
        if report.bursts_failed > 0 {
            warn!(
                failed = report.bursts_failed,
                total = report.bursts_total,
                "Some bursts were skipped"
            );
        }
    }

    Ok(())
}
