// src/path/filters.rs
//! Three-tap filters over derived value series
//!
//! Each filter needs at least three values and returns two fewer than it
//! is given; edges are dropped rather than extrapolated.

use crate::geo::PathValue;

const MIN_WINDOW: usize = 3;

/// [1, 2, 1] / 4 low-pass filter, tagged with the centre value's time.
pub fn smooth(values: &[PathValue]) -> Vec<PathValue> {
    if values.len() < MIN_WINDOW {
        return Vec::new();
    }

    values
        .windows(3)
        .map(|w| PathValue::new((w[0].value + 2.0 * w[1].value + w[2].value) / 4.0, w[1].timestamp))
        .collect()
}

/// `next - current` for every value except the last two, tagged with the
/// current value's time.
pub fn first_forward_difference(values: &[PathValue]) -> Vec<PathValue> {
    if values.len() < MIN_WINDOW {
        return Vec::new();
    }

    values[..values.len() - 1]
        .windows(2)
        .map(|w| PathValue::new(w[1].value - w[0].value, w[0].timestamp))
        .collect()
}

/// `(next - previous) / 2` centred one index later than the forward
/// difference, tagged with the centre value's time.
pub fn first_central_difference(values: &[PathValue]) -> Vec<PathValue> {
    if values.len() < MIN_WINDOW {
        return Vec::new();
    }

    values
        .windows(3)
        .map(|w| PathValue::new((w[2].value - w[0].value) / 2.0, w[1].timestamp))
        .collect()
}
