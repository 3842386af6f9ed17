//! Per-sample movement direction classification.
//!
//! Two paths, mirroring the instrument's two sensor configurations:
//!
//! - **Signed friction**: when any friction value in the burst is negative,
//!   the sensor encodes direction in the friction sign and every sample is
//!   classified directly, with no row loss (except zero-friction rows,
//!   which carry no sign).
//! - **Stroke difference**: when friction is magnitude-only, direction is
//!   inferred from the stroke's forward difference. The first and last rows
//!   have no valid difference and are dropped; so is any row whose
//!   difference is exactly zero.
//!
//! Either way the output is a contiguous run of samples that all carry a
//! definite ±1 direction.

use crate::types::{Direction, HsdSample};

/// Classify every sample's movement direction, dropping rows that have no
/// valid direction. Surviving rows keep their original order.
pub fn classify(samples: &[HsdSample]) -> Vec<(HsdSample, Direction)> {
    if has_signed_friction(samples) {
        classify_from_friction(samples)
    } else {
        classify_from_stroke(samples)
    }
}

/// Whether the burst's friction channel carries direction information.
fn has_signed_friction(samples: &[HsdSample]) -> bool {
    samples.iter().any(|s| s.friction < 0.0)
}

fn classify_from_friction(samples: &[HsdSample]) -> Vec<(HsdSample, Direction)> {
    samples
        .iter()
        .filter_map(|s| Direction::from_sign(s.friction).map(|d| (*s, d)))
        .collect()
}

/// Infer direction as `sign(stroke[i+1] - stroke[i])` at interior indices.
/// Loses exactly the first and last rows, plus any zero-difference row.
fn classify_from_stroke(samples: &[HsdSample]) -> Vec<(HsdSample, Direction)> {
    if samples.len() < 3 {
        return Vec::new();
    }
    let interior = &samples[1..samples.len() - 1];
    interior
        .iter()
        .zip(samples[2..].iter())
        .filter_map(|(s, next)| Direction::from_sign(next.stroke - s.stroke).map(|d| (*s, d)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke_samples(strokes: &[f64]) -> Vec<HsdSample> {
        strokes
            .iter()
            .map(|&stroke| HsdSample {
                stroke,
                contact_potential: 0.0,
                friction: 1.0,
                force_input: 0.0,
                time: 0.0,
            })
            .collect()
    }

    #[test]
    fn signed_friction_keeps_every_nonzero_row() {
        let mut samples = stroke_samples(&[0.0, 1.0, 2.0, 3.0]);
        samples[0].friction = 2.0;
        samples[1].friction = -1.5;
        samples[2].friction = 0.5;
        samples[3].friction = -0.2;

        let classified = classify(&samples);
        assert_eq!(classified.len(), 4);
        let dirs: Vec<Direction> = classified.iter().map(|(_, d)| *d).collect();
        assert_eq!(
            dirs,
            [
                Direction::Forward,
                Direction::Backward,
                Direction::Forward,
                Direction::Backward
            ]
        );
    }

    #[test]
    fn signed_friction_drops_zero_rows() {
        let mut samples = stroke_samples(&[0.0, 1.0, 2.0]);
        samples[0].friction = -1.0;
        samples[1].friction = 0.0;
        samples[2].friction = 1.0;

        let classified = classify(&samples);
        assert_eq!(classified.len(), 2);
    }

    #[test]
    fn monotonic_stroke_loses_exactly_two_rows() {
        for n in 3..8 {
            let strokes: Vec<f64> = (0..n).map(|i| i as f64).collect();
            let classified = classify(&stroke_samples(&strokes));
            assert_eq!(classified.len(), n - 2, "n = {}", n);
            assert!(classified.iter().all(|(_, d)| *d == Direction::Forward));
        }
    }

    #[test]
    fn triangle_wave_directions() {
        let classified = classify(&stroke_samples(&[
            0.0, 1.0, 2.0, 1.0, 0.0, -1.0, -2.0, -1.0, 0.0,
        ]));

        // 9 rows in, first and last dropped.
        assert_eq!(classified.len(), 7);
        let dirs: Vec<Direction> = classified.iter().map(|(_, d)| *d).collect();
        assert_eq!(
            dirs,
            [
                Direction::Forward,
                Direction::Backward,
                Direction::Backward,
                Direction::Backward,
                Direction::Backward,
                Direction::Forward,
                Direction::Forward,
            ]
        );
        // Surviving rows are the interior ones, in order.
        assert_eq!(classified[0].0.stroke, 1.0);
        assert_eq!(classified[6].0.stroke, -1.0);
    }

    #[test]
    fn flat_plateau_rows_are_dropped() {
        // Zero forward difference at index 2 (2.0 -> 2.0).
        let classified = classify(&stroke_samples(&[0.0, 1.0, 2.0, 2.0, 3.0, 4.0]));
        assert_eq!(classified.len(), 3);
    }

    #[test]
    fn too_short_fallback_input_yields_nothing() {
        assert!(classify(&stroke_samples(&[0.0, 1.0])).is_empty());
        assert!(classify(&stroke_samples(&[])).is_empty());
    }
}
