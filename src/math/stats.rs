//! Standard deviation reductions used by the dispersion estimators.

use crate::error::{Result, StatsError};

/// Population standard deviation (divisor N) about the sample mean.
///
/// Returns 0 for an empty slice.
#[must_use]
pub fn population_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
    variance.sqrt()
}

/// Per-component population standard deviation of 3-vectors.
#[must_use]
pub fn population_std3(values: &[[f64; 3]]) -> [f64; 3] {
    let mut out = [0.0; 3];
    for (axis, slot) in out.iter_mut().enumerate() {
        let column: Vec<f64> = values.iter().map(|v| v[axis]).collect();
        *slot = population_std(&column);
    }
    out
}

/// Bessel-corrected (divisor N-1) standard deviation about zero.
///
/// The residuals are assumed to be zero-centered already, so no mean is
/// subtracted.
///
/// # Errors
///
/// Returns [`StatsError::DivisionUndefined`] for fewer than two samples.
pub fn zero_mean_sample_std(residuals: &[f64]) -> Result<f64> {
    let n = residuals.len();
    if n < 2 {
        return Err(StatsError::division_undefined(n));
    }
    let sum_sq: f64 = residuals.iter().map(|r| r * r).sum();
    Ok((sum_sq / (n - 1) as f64).sqrt())
}
