//! File-level acquisition: parsing the TSV artifacts Compend 2000 writes.
//!
//! - `burst`: one high speed data file → ordered [`crate::types::HsdSample`]s,
//!   plus acquisition-rate extraction from the first burst's preamble.
//! - `trace`: the main test file → scalar context per data line and burst
//!   markers pointing at the numbered HSD files.

pub mod burst;
pub mod trace;

pub use burst::{extract_acquisition_rate, read_burst};
pub use trace::{TraceEvent, TraceScanner};
