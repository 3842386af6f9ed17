//! Stroke signal preprocessing.

use crate::types::HsdSample;

/// Midpoint of the observed stroke range.
///
/// Subtracting it puts the wear track's center at exactly zero, which the
/// central-region filter depends on. Returns 0.0 for an empty slice.
pub fn stroke_offset(samples: &[HsdSample]) -> f64 {
    let mut max = f64::NEG_INFINITY;
    let mut min = f64::INFINITY;
    for sample in samples {
        max = max.max(sample.stroke);
        min = min.min(sample.stroke);
    }
    if samples.is_empty() {
        0.0
    } else {
        (max + min) / 2.0
    }
}

/// Center the stroke signal around zero in place.
pub fn center_stroke(samples: &mut [HsdSample]) {
    let offset = stroke_offset(samples);
    for sample in samples.iter_mut() {
        sample.stroke -= offset;
    }
}

/// Build the interpolated time axis in place.
///
/// The burst file has no time column; timestamps are linearly interpolated
/// from `initial_time` to `initial_time + n / rate_hz` across the n samples,
/// endpoints inclusive. Must run before direction classification so dropped
/// rows do not shift the surviving rows' timestamps.
pub fn fill_time_axis(samples: &mut [HsdSample], initial_time: f64, rate_hz: f64) {
    let n = samples.len();
    if n == 0 {
        return;
    }
    if n == 1 {
        samples[0].time = initial_time;
        return;
    }
    let span = n as f64 / rate_hz;
    let step = span / (n - 1) as f64;
    for (i, sample) in samples.iter_mut().enumerate() {
        sample.time = initial_time + step * i as f64;
    }
}
