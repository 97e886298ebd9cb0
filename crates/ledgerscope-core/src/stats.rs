//! Small numeric helpers shared by the numeric and financial stages.

use rust_decimal::{Decimal, RoundingStrategy};

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population variance (divides by `n`) around a precomputed mean.
pub fn population_variance(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}

/// Absolute z-score of `value`.
///
/// Undefined (`None`) when the standard deviation is zero or not finite; an
/// undefined z-score never counts as an outlier.
pub fn z_score(value: f64, mean: f64, std_dev: f64) -> Option<f64> {
    if is_degenerate_spread(std_dev) {
        None
    } else {
        Some(((value - mean) / std_dev).abs())
    }
}

/// A spread that cannot be divided by: zero, negative or not finite.
pub fn is_degenerate_spread(std_dev: f64) -> bool {
    !(std_dev.is_finite() && std_dev > 0.0)
}

pub fn sorted_ascending(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Rounds to `decimals` places, resolving exact midpoints away from zero
/// (`0.125` becomes `0.13`). The midpoint test is made on the exact binary
/// value, so `1.005`, stored just below the midpoint, becomes `1.0`.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|exact| {
            exact.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
        })
        .and_then(|rounded| rounded.to_string().parse().ok())
        .unwrap_or(value)
}

pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}
