//! te38-digest: TE38 tribometer data digestion
//!
//! Turns the TSV files a TE38 friction-and-wear test rig writes (via
//! Compend 2000) into two clean CSV artifacts:
//!
//! - **Main trace CSV**: the low-frequency test table, stripped of
//!   preamble, marker lines and tab artifacts.
//! - **HSD summary CSV**: every high speed data burst reduced to one
//!   averaged row per oscillation cycle, annotated with the load, time and
//!   cycle context captured from the main trace at burst start.
//!
//! ## Architecture
//!
//! - `acquisition`: TSV parsing — burst files and the main trace.
//! - `hsd`: the per-burst reduction pipeline (centering, direction
//!   classification, cycle segmentation, central-region filtering,
//!   per-cycle averaging).
//! - `digest`: orchestration of one whole test, burst fan-out included.
//! - `export`: CSV writers.

pub mod acquisition;
pub mod config;
pub mod digest;
pub mod error;
pub mod export;
pub mod hsd;
pub mod types;

pub use config::DigestConfig;
pub use digest::{digest_hsd_files, digest_main_trace, HsdReport};
pub use error::{DigestError, Result};
pub use hsd::process_burst;
pub use types::{BurstContext, CycleSummary, Direction, HsdSample, HSD_FINAL_LABELS};
