//! Central-region filter.
//!
//! Turn-around points at the track ends produce friction artifacts (the
//! probe decelerates, stops, reverses), so only samples near the track's
//! midpoint are kept for averaging. With the stroke centered, a
//! `length_factor` of 0.1 on a 10 mm track keeps the band within
//! `5 mm * 0.1 / 2 = 0.25 mm` of the center on each side.

use crate::types::HsdSample;

/// Central-region bounds `(min_limit, max_limit)` derived from the observed
/// centered stroke extremes.
pub fn central_limits(samples: &[HsdSample], length_factor: f64) -> (f64, f64) {
    let max = samples.iter().map(|s| s.stroke).fold(f64::NEG_INFINITY, f64::max);
    let min = samples.iter().map(|s| s.stroke).fold(f64::INFINITY, f64::min);
    (min * length_factor / 2.0, max * length_factor / 2.0)
}

/// Keep only the rows whose stroke lies inside the central region.
///
/// Non-central rows are removed entirely; cycle ids assigned earlier are
/// untouched, so a cycle fully outside the band simply disappears from the
/// output.
pub fn retain_central(rows: Vec<(HsdSample, u32)>, length_factor: f64) -> Vec<(HsdSample, u32)> {
    let samples: Vec<HsdSample> = rows.iter().map(|(s, _)| *s).collect();
    let (min_limit, max_limit) = central_limits(&samples, length_factor);
    rows.into_iter()
        .filter(|(s, _)| s.stroke >= min_limit && s.stroke <= max_limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(strokes: &[f64]) -> Vec<(HsdSample, u32)> {
        strokes
            .iter()
            .map(|&stroke| {
                (
                    HsdSample {
                        stroke,
                        contact_potential: 0.0,
                        friction: 1.0,
                        force_input: 0.0,
                        time: 0.0,
                    },
                    0,
                )
            })
            .collect()
    }

    #[test]
    fn keeps_only_band_around_center() {
        // Centered track from -5 to 5; factor 0.1 keeps |stroke| <= 0.25.
        let kept = retain_central(rows(&[-5.0, -0.3, -0.2, 0.0, 0.2, 0.3, 5.0]), 0.1);
        let strokes: Vec<f64> = kept.iter().map(|(s, _)| s.stroke).collect();
        assert_eq!(strokes, [-0.2, 0.0, 0.2]);
    }

    #[test]
    fn limits_are_inclusive() {
        let kept = retain_central(rows(&[-5.0, -0.25, 0.25, 5.0]), 0.1);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn factor_two_retains_everything() {
        // Limits reach the observed extremes at factor 2.
        let input = rows(&[-5.0, -1.0, 0.0, 3.0, 5.0]);
        let kept = retain_central(input.clone(), 2.0);
        assert_eq!(kept.len(), input.len());
    }

    #[test]
    fn factor_zero_retains_only_exact_center() {
        let kept = retain_central(rows(&[-5.0, -0.1, 0.0, 0.0, 0.1, 5.0]), 0.0);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|(s, _)| s.stroke == 0.0));
    }

    #[test]
    fn flat_zero_signal_passes_entirely() {
        // Degenerate stroke: limits collapse to 0, exact zeros still pass.
        let kept = retain_central(rows(&[0.0, 0.0, 0.0]), 0.1);
        assert_eq!(kept.len(), 3);
    }
}
