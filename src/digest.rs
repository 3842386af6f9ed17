//! Test-level orchestration.
//!
//! Ties the trace scanner, burst reader and reduction pipeline together to
//! produce the two output artifacts for one TE38 test:
//!
//! - `<name>.csv` — the cleaned main trace.
//! - `<name>_HSD.csv` — every burst's per-cycle summaries, concatenated in
//!   marker-encounter order under a single header.
//!
//! Bursts are independent, so they are mapped across a rayon pool by
//! default; each pipeline run owns its whole state and the results are
//! concatenated in the order the markers appeared. A burst that fails to
//! parse contributes no rows and is reported, without poisoning the rest.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::acquisition::{burst, trace};
use crate::config::DigestConfig;
use crate::error::{DigestError, Result};
use crate::export::{self, HsdCsvWriter};
use crate::hsd;
use crate::types::{BurstContext, CycleSummary};

/// Outcome of one HSD digestion run.
#[derive(Debug, Clone)]
pub struct HsdReport {
    /// Path of the summary CSV that was written.
    pub output_path: PathBuf,
    /// Burst files named by the trace.
    pub bursts_total: usize,
    /// Bursts that failed to parse and contributed no rows.
    pub bursts_failed: usize,
    /// Summary rows written across all bursts.
    pub rows_written: usize,
    /// Acquisition rate used for the time axis (Hz).
    pub rate_hz: f64,
}

/// One burst job: the file to read and the context captured at its marker.
#[derive(Debug, Clone)]
struct BurstJob {
    path: PathBuf,
    name: String,
    ctx: BurstContext,
}

/// Clean the main trace into `<name>.csv` next to the input (or under
/// `output_dir`). Returns the path written.
pub fn digest_main_trace(trace_path: impl AsRef<Path>, output_dir: Option<&Path>) -> Result<PathBuf> {
    let trace_path = trace_path.as_ref();
    let table = trace::clean_table(trace_path)?;
    let output_path = sibling_path(trace_path, output_dir, ".csv");
    export::write_main_csv(&output_path, &table)?;
    Ok(output_path)
}

/// Digest every burst named by the trace into `<name>_HSD.csv`.
///
/// The acquisition rate comes from `config` when supplied, otherwise from
/// the first burst file's preamble. Errors out only when the trace itself
/// is unusable or every burst failed; individual burst failures are logged
/// and skipped.
pub fn digest_hsd_files(
    trace_path: impl AsRef<Path>,
    config: &DigestConfig,
    output_dir: Option<&Path>,
    sequential: bool,
) -> Result<HsdReport> {
    let trace_path = trace_path.as_ref();
    let jobs = collect_burst_jobs(trace_path)?;
    let output_path = sibling_path(trace_path, output_dir, "_HSD.csv");

    if jobs.is_empty() {
        tracing::warn!(trace = %trace_path.display(), "No burst markers found in trace");
        let writer = HsdCsvWriter::create(&output_path)?;
        let rows_written = writer.finish()?;
        return Ok(HsdReport {
            output_path,
            bursts_total: 0,
            bursts_failed: 0,
            rows_written,
            rate_hz: 0.0,
        });
    }

    let rate_hz = match config.acquisition_rate_hz {
        Some(rate) => rate,
        None => burst::extract_acquisition_rate(first_burst_path(trace_path))?,
    };

    tracing::info!(
        trace = %trace_path.display(),
        bursts = jobs.len(),
        rate_hz,
        length_factor = config.length_factor,
        sequential,
        "Digesting high speed data"
    );

    let length_factor = config.length_factor;
    let run = |job: &BurstJob| -> Result<Vec<CycleSummary>> {
        let samples = burst::read_burst(&job.path)?;
        Ok(hsd::process_burst(samples, job.ctx, rate_hz, length_factor))
    };

    let results: Vec<Result<Vec<CycleSummary>>> = if sequential {
        jobs.iter().map(run).collect()
    } else {
        jobs.par_iter().map(run).collect()
    };

    let mut writer = HsdCsvWriter::create(&output_path)?;
    let mut failed = 0usize;
    for (job, result) in jobs.iter().zip(results) {
        match result {
            Ok(summaries) => writer.append(&summaries)?,
            Err(e) => {
                failed += 1;
                tracing::warn!(burst = %job.name, error = %e, "Burst failed, skipping its rows");
            }
        }
    }
    let rows_written = writer.finish()?;

    if failed == jobs.len() {
        return Err(DigestError::AllBurstsFailed { total: failed });
    }

    Ok(HsdReport {
        output_path,
        bursts_total: jobs.len(),
        bursts_failed: failed,
        rows_written,
        rate_hz,
    })
}

/// Pair each burst marker with the most recent data line's context.
fn collect_burst_jobs(trace_path: &Path) -> Result<Vec<BurstJob>> {
    let events = trace::TraceScanner::open(trace_path)?.events()?;
    let base_dir = trace_path.parent().unwrap_or_else(|| Path::new("."));

    let mut jobs = Vec::new();
    let mut last_ctx: Option<BurstContext> = None;
    for event in events {
        match event {
            trace::TraceEvent::Context(ctx) => last_ctx = Some(ctx),
            trace::TraceEvent::Burst { file_name } => {
                let ctx = last_ctx.ok_or_else(|| DigestError::MissingContext {
                    burst: file_name.clone(),
                })?;
                jobs.push(BurstJob {
                    path: base_dir.join(&file_name),
                    name: file_name,
                    ctx,
                });
            }
        }
    }
    Ok(jobs)
}

/// The first numbered burst file: `test.TSV` -> `test-h001.TSV`.
fn first_burst_path(trace_path: &Path) -> PathBuf {
    let stem = trace_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("test");
    let ext = trace_path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("TSV");
    trace_path.with_file_name(format!("{stem}-h001.{ext}"))
}

/// Output path derived from the trace name: `<stem><suffix>` in the trace's
/// directory, or in `output_dir` when given.
fn sibling_path(trace_path: &Path, output_dir: Option<&Path>, suffix: &str) -> PathBuf {
    let stem = trace_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("test");
    let file_name = format!("{stem}{suffix}");
    match output_dir {
        Some(dir) => dir.join(file_name),
        None => trace_path.with_file_name(file_name),
    }
}
