//! Core data types for TE38 high speed data (HSD) digestion.
//!
//! A TE38 test recorded by Compend 2000 produces one main trace file plus a
//! numbered burst file per low-frequency sample:
//!
//! - `test.TSV`
//! - `test-h001.TSV`
//! - `test-h002.TSV`
//! - ...
//!
//! Burst files carry the raw high-frequency channels; everything contextual
//! (load, elapsed time, cycle count, acquisition rate) lives in the main
//! trace and is attached by the orchestrator.

/// Column labels of the concatenated HSD summary CSV, in output order.
pub const HSD_FINAL_LABELS: [&str; 7] = [
    "Cycle",
    "Stroke (mm)",
    "Contact Potential (mV)",
    "Friction (N)",
    "Time (s)",
    "Load (N)",
    "CoF",
];

/// Probe movement direction along the wear track.
///
/// Derived per sample, either from the sign of the friction channel or from
/// the sign of the stroke's forward difference. Zero-sign samples carry no
/// direction and are dropped before this type is ever constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Classify a signed value. Returns `None` for zero (and NaN), which
    /// callers treat as "drop this sample".
    pub fn from_sign(value: f64) -> Option<Self> {
        if value > 0.0 {
            Some(Self::Forward)
        } else if value < 0.0 {
            Some(Self::Backward)
        } else {
            None
        }
    }
}

/// One row of a high speed burst file.
///
/// `time` is absent until the pipeline builds the interpolated time axis;
/// the raw file has no time column of its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HsdSample {
    /// Probe position along the wear track (mm, instrument units).
    pub stroke: f64,
    /// Contact potential channel (mV).
    pub contact_potential: f64,
    /// Signed friction force (N). Some sensor setups report magnitude only.
    pub friction: f64,
    /// Raw force input channel. Carried through the pipeline but dropped
    /// from the final schema.
    pub force_input: f64,
    /// Interpolated timestamp (s), filled in by the pipeline.
    pub time: f64,
}

/// Scalar context for one burst, captured from the main trace data line
/// immediately preceding the burst's `Fast data in` marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstContext {
    /// Total cycle count at burst start; first cycle id in the summary.
    pub initial_cycle: u32,
    /// Elapsed test time at burst start (s).
    pub initial_time: f64,
    /// Applied load at burst start (N). May legitimately be zero during
    /// ramp-up segments.
    pub initial_load: f64,
}

/// One output row of the HSD summary: per-cycle means plus attached context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleSummary {
    /// Oscillation cycle id (offset by the burst's `initial_cycle`).
    pub cycle: u32,
    /// Mean centered stroke within the cycle (mm).
    pub stroke: f64,
    /// Mean contact potential (mV).
    pub contact_potential: f64,
    /// Mean friction magnitude (N).
    pub friction: f64,
    /// Mean timestamp (s).
    pub time: f64,
    /// Applied load, copied from the burst context (N).
    pub load: f64,
    /// Coefficient of friction, `friction / load`. NaN when load is zero.
    pub cof: f64,
}
