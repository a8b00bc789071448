//! Dispersion of a quaternion set around its average.
//!
//! Two estimators are provided:
//!
//! - [`quaternion_covariance`]: per-axis population standard deviation of the
//!   Euler angles of each residual rotation `q_i * avg^-1`.
//! - [`quaternion_covariance_1d`]: Bessel-corrected standard deviation of the
//!   angular distances `2 * acos(<q_i, avg>)`, taken about zero.
//!
//! The per-axis estimator measures coupled angular spread. Samples built by
//! composing independent rotations about different axes do not reproduce the
//! marginal per-axis deviations of the generating angles.

use crate::average::{average_validated, validate_inputs};
use crate::config::StatsConfig;
use crate::error::{Result, StatsError};
use crate::math::stats::{population_std3, zero_mean_sample_std};
use crate::quaternion::Quaternion;
use crate::rotation::{NalgebraRotation, RotationOps};

/// All dispersion statistics of a set in one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DispersionSummary {
    /// Average the residuals were taken against.
    pub average: Quaternion,

    /// Per-axis (roll, pitch, yaw) population standard deviation, radians.
    pub axis_std: [f64; 3],

    /// Scalar angular standard deviation, radians. `None` for a single
    /// sample, where the Bessel-corrected divisor vanishes.
    pub angular_std: Option<f64>,

    /// Number of samples.
    pub samples: usize,
}

/// Per-axis standard deviation of Euler-angle residuals.
///
/// # Arguments
///
/// * `quaternions` - Input set, N >= 1
/// * `weights` - Optional weights, used only when computing the average
/// * `avg` - Precomputed average (None = computed here)
///
/// # Returns
///
/// `[roll, pitch, yaw]` standard deviations in radians (divisor N).
///
/// # Errors
///
/// Returns an error for malformed input, or
/// [`StatsError::UndefinedAverage`] when no average is supplied and none
/// exists.
pub fn quaternion_covariance(
    quaternions: &[Quaternion],
    weights: Option<&[f64]>,
    avg: Option<Quaternion>,
) -> Result<[f64; 3]> {
    quaternion_covariance_with(
        &NalgebraRotation,
        quaternions,
        weights,
        avg,
        &StatsConfig::default(),
    )
}

/// [`quaternion_covariance`] with explicit rotation operations and
/// configuration.
///
/// # Errors
///
/// See [`quaternion_covariance`].
pub fn quaternion_covariance_with<R: RotationOps>(
    ops: &R,
    quaternions: &[Quaternion],
    weights: Option<&[f64]>,
    avg: Option<Quaternion>,
    config: &StatsConfig,
) -> Result<[f64; 3]> {
    validate_inputs(quaternions, weights)?;
    let avg = resolve_average(quaternions, weights, avg, config)?;
    axis_std(ops, quaternions, &avg)
}

/// Scalar standard deviation of angular residuals.
///
/// Each residual is `2 * acos(<q_i, avg>)`, multiplied by `w_i` when weights
/// are given. The result is `sqrt(sum r_i^2 / (N - 1))`.
///
/// # Errors
///
/// Returns [`StatsError::DivisionUndefined`] for a single sample, plus the
/// errors of [`quaternion_covariance`].
pub fn quaternion_covariance_1d(
    quaternions: &[Quaternion],
    weights: Option<&[f64]>,
    avg: Option<Quaternion>,
) -> Result<f64> {
    quaternion_covariance_1d_with_config(quaternions, weights, avg, &StatsConfig::default())
}

/// [`quaternion_covariance_1d`] with an explicit configuration.
///
/// # Errors
///
/// See [`quaternion_covariance_1d`].
pub fn quaternion_covariance_1d_with_config(
    quaternions: &[Quaternion],
    weights: Option<&[f64]>,
    avg: Option<Quaternion>,
    config: &StatsConfig,
) -> Result<f64> {
    validate_inputs(quaternions, weights)?;
    if quaternions.len() < 2 {
        return Err(StatsError::division_undefined(quaternions.len()));
    }

    let avg = resolve_average(quaternions, weights, avg, config)?;
    angular_std(quaternions, weights, &avg)
}

/// Euler-angle triple of each residual rotation `q_i * avg^-1`.
///
/// # Errors
///
/// Fails if `avg` cannot be inverted.
pub fn euler_residuals<R: RotationOps>(
    ops: &R,
    quaternions: &[Quaternion],
    avg: &Quaternion,
) -> Result<Vec<[f64; 3]>> {
    let avg_inv = ops.inverse(avg)?;
    Ok(quaternions
        .iter()
        .map(|q| ops.to_euler(&ops.multiply(q, &avg_inv)))
        .collect())
}

/// Angle `2 * acos(<q_i, avg>)` between each sample and the average.
///
/// The inner product is clamped to `[-1, 1]` so rounding on unit inputs
/// cannot produce NaN. Its sign is kept, so a sample on the opposite
/// hemisphere from `avg` yields an angle above pi.
#[must_use]
pub fn angular_residuals(quaternions: &[Quaternion], avg: &Quaternion) -> Vec<f64> {
    quaternions
        .iter()
        .map(|q| 2.0 * q.dot(avg).clamp(-1.0, 1.0).acos())
        .collect()
}

/// Average plus both dispersion statistics.
///
/// # Errors
///
/// Returns an error for malformed input or an undefined average.
pub fn summarize(
    quaternions: &[Quaternion],
    weights: Option<&[f64]>,
    config: &StatsConfig,
) -> Result<DispersionSummary> {
    validate_inputs(quaternions, weights)?;
    let average = resolve_average(quaternions, weights, None, config)?;
    let axis_std = axis_std(&NalgebraRotation, quaternions, &average)?;
    let angular_std = match angular_std(quaternions, weights, &average) {
        Ok(std) => Some(std),
        Err(StatsError::DivisionUndefined { .. }) => None,
        Err(e) => return Err(e),
    };

    Ok(DispersionSummary {
        average,
        axis_std,
        angular_std,
        samples: quaternions.len(),
    })
}

/// Use the caller's average or compute one with the same weights.
///
/// Inputs must already have passed [`validate_inputs`].
fn resolve_average(
    quaternions: &[Quaternion],
    weights: Option<&[f64]>,
    avg: Option<Quaternion>,
    config: &StatsConfig,
) -> Result<Quaternion> {
    match avg {
        Some(q) => Ok(q),
        None => average_validated(quaternions, weights, config)?
            .average
            .into_result(),
    }
}

fn axis_std<R: RotationOps>(
    ops: &R,
    quaternions: &[Quaternion],
    avg: &Quaternion,
) -> Result<[f64; 3]> {
    let residuals = euler_residuals(ops, quaternions, avg)?;
    Ok(population_std3(&residuals))
}

fn angular_std(
    quaternions: &[Quaternion],
    weights: Option<&[f64]>,
    avg: &Quaternion,
) -> Result<f64> {
    let mut residuals = angular_residuals(quaternions, avg);
    if let Some(w) = weights {
        for (r, &wi) in residuals.iter_mut().zip(w.iter()) {
            *r *= wi;
        }
    }
    zero_mean_sample_std(&residuals)
}
