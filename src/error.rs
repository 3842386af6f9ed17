//! Error types for TE38 file digestion.
//!
//! One enum covers both the trace scanner and the burst pipeline. A bad
//! burst file fails with a variant naming the file and the reason, so the
//! orchestrator can drop that burst's contribution without poisoning the
//! rest of the run.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while digesting TE38 data files.
#[derive(Debug, Error)]
pub enum DigestError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: missing required column '{column}' in header")]
    MissingColumn { path: PathBuf, column: String },

    #[error("{path}: no data rows after preamble")]
    EmptyBurst { path: PathBuf },

    #[error("{path}:{line}: cannot parse '{value}' as a number for {column}")]
    BadNumber {
        path: PathBuf,
        line: usize,
        column: String,
        value: String,
    },

    #[error("{path}:{line}: data line too short to extract '{column}'")]
    ShortDataLine {
        path: PathBuf,
        line: usize,
        column: String,
    },

    #[error("acquisition rate not found in {path} and none supplied")]
    RateNotFound { path: PathBuf },

    #[error("{path}: 'Test started at' preamble marker not found")]
    PreambleNotFound { path: PathBuf },

    #[error("burst marker before any data line: no context for {burst}")]
    MissingContext { burst: String },

    #[error("all {total} burst files failed to process")]
    AllBurstsFailed { total: usize },
}

impl DigestError {
    /// Wrap an I/O error with the file it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DigestError>;
