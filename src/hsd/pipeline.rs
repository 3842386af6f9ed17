//! Per-burst reduction pipeline.
//!
//! Pure and deterministic: no I/O, no state shared across calls. Each burst
//! restarts its own cycle counter at the context's `initial_cycle`.

use crate::types::{BurstContext, CycleSummary, HsdSample};

use super::{aggregate, cycles, direction, filter, signal};

/// Reduce one burst's raw samples to per-cycle summary rows.
///
/// An empty result is not an error: a burst whose stroke never moves, or
/// whose samples all fall outside the central region, legitimately reduces
/// to nothing.
pub fn process_burst(
    mut samples: Vec<HsdSample>,
    ctx: BurstContext,
    rate_hz: f64,
    length_factor: f64,
) -> Vec<CycleSummary> {
    if samples.is_empty() {
        return Vec::new();
    }

    signal::center_stroke(&mut samples);
    signal::fill_time_axis(&mut samples, ctx.initial_time, rate_hz);

    let classified = direction::classify(&samples);
    if classified.is_empty() {
        return Vec::new();
    }

    let directions: Vec<_> = classified.iter().map(|(_, d)| *d).collect();
    let cycle_ids = cycles::assign_cycles(&directions, ctx.initial_cycle);

    let rows: Vec<(HsdSample, u32)> = classified
        .into_iter()
        .map(|(s, _)| s)
        .zip(cycle_ids)
        .collect();

    let central = filter::retain_central(rows, length_factor);
    aggregate::summarize_cycles(&central, ctx.initial_load)
}
