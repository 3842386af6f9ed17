//! Per-cycle aggregation.
//!
//! Groups the filtered rows by cycle id and reduces every group to one
//! summary row: arithmetic mean of each channel, friction taken as
//! magnitude (direction no longer matters, wear only cares about the
//! force's size), plus the broadcast load and the derived coefficient of
//! friction.

use crate::types::CycleSummary;
use crate::types::HsdSample;

/// Reduce filtered `(sample, cycle)` rows to one summary per cycle id.
///
/// Rows must arrive ordered with non-decreasing cycle ids, which the
/// segmenter guarantees. Cycles with no surviving rows produce no output;
/// gaps in the id column are expected. `cof` is NaN when the load is zero
/// so ramp-up segments never abort the burst.
pub fn summarize_cycles(rows: &[(HsdSample, u32)], load: f64) -> Vec<CycleSummary> {
    let mut summaries = Vec::new();
    let mut iter = rows.iter().peekable();

    while let Some(&(first, cycle)) = iter.next() {
        let mut count = 1.0;
        let mut stroke = first.stroke;
        let mut contact_potential = first.contact_potential;
        let mut friction = first.friction.abs();
        let mut time = first.time;

        while let Some(&&(sample, c)) = iter.peek() {
            if c != cycle {
                break;
            }
            iter.next();
            count += 1.0;
            stroke += sample.stroke;
            contact_potential += sample.contact_potential;
            friction += sample.friction.abs();
            time += sample.time;
        }

        let mean_friction = friction / count;
        let cof = if load == 0.0 {
            f64::NAN
        } else {
            mean_friction / load
        };

        summaries.push(CycleSummary {
            cycle,
            stroke: stroke / count,
            contact_potential: contact_potential / count,
            friction: mean_friction,
            time: time / count,
            load,
            cof,
        });
    }

    summaries
}
