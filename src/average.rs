//! Eigenvector-based quaternion averaging.
//!
//! Implements the method of Markley et al., "Quaternion Averaging"
//! (NASA technical report 20070017872): the average orientation is the
//! eigenvector of the largest eigenvalue of
//!
//! ```text
//! M = sum_i w_i q_i q_i^T
//! ```
//!
//! The eigenvector's sign is then chosen to agree with the raw vector sum of
//! the inputs, because `q` and `-q` are the same rotation.

use nalgebra::{Matrix4, Vector4};

use crate::accumulator::QuaternionAccumulator;
use crate::config::StatsConfig;
use crate::error::{Result, StatsError};
use crate::math::linalg::sorted_symmetric_eigen;
use crate::quaternion::Quaternion;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outcome of quaternion averaging.
///
/// The average is undefined when the accumulator is identically zero, which
/// happens when every sample carries zero weight; callers must handle that
/// case explicitly.
///
/// A tied largest eigenvalue does not make the average undefined. Two
/// quaternions with a zero inner product (for example the identity and
/// `(1, 0, 0, 0)`) give a `Defined` unit quaternion from the plane they span,
/// chosen by the eigensolver.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AverageQuaternion {
    /// Unit-norm, sign-corrected average.
    Defined(Quaternion),
    /// No meaningful average exists for the input set.
    Undefined,
}

impl AverageQuaternion {
    /// Whether an average exists.
    #[must_use]
    pub const fn is_defined(&self) -> bool {
        matches!(self, Self::Defined(_))
    }

    /// The average, if defined.
    #[must_use]
    pub const fn quaternion(&self) -> Option<Quaternion> {
        match self {
            Self::Defined(q) => Some(*q),
            Self::Undefined => None,
        }
    }

    /// Convert into a `Result`, mapping `Undefined` to
    /// [`StatsError::UndefinedAverage`].
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::UndefinedAverage`] for the undefined case.
    pub fn into_result(self) -> Result<Quaternion> {
        match self {
            Self::Defined(q) => Ok(q),
            Self::Undefined => Err(StatsError::UndefinedAverage),
        }
    }
}

/// Averaging result together with the quantities it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct AverageBreakdown {
    /// The average (or the undefined sentinel).
    pub average: AverageQuaternion,

    /// Accumulator eigenvalues in ascending order. `None` when the
    /// single-sample shortcut skipped the decomposition.
    pub eigenvalues: Option<[f64; 4]>,

    /// Whether the eigenvector was negated to match the raw vector sum.
    pub sign_flipped: bool,

    /// Whether the raw vector sum was numerically zero, leaving the sign
    /// uncorrected.
    pub sign_ambiguous: bool,

    /// Number of samples averaged.
    pub samples: usize,

    /// Sum of sample weights.
    pub total_weight: f64,
}

/// Average a set of quaternions with the default configuration.
///
/// # Arguments
///
/// * `quaternions` - Input set, N >= 1
/// * `weights` - Optional per-sample weights (None = weight 1 each)
///
/// # Errors
///
/// Returns an error for an empty set, a weight vector whose length differs
/// from the number of quaternions, or invalid weights.
///
/// # Example
///
/// ```
/// use quaternion_stats::{average_quaternion, Quaternion};
///
/// let qs: Vec<Quaternion> = [0.1, 0.2, 0.3, 0.4]
///     .iter()
///     .map(|&t| Quaternion::from_axis_angle([0.0, 1.0, 0.0], t))
///     .collect();
///
/// let avg = average_quaternion(&qs, None)?.into_result()?;
/// let expected = Quaternion::from_axis_angle([0.0, 1.0, 0.0], 0.25);
/// assert!(avg.angle_to(&expected) < 1e-6);
/// # Ok::<(), quaternion_stats::StatsError>(())
/// ```
pub fn average_quaternion(
    quaternions: &[Quaternion],
    weights: Option<&[f64]>,
) -> Result<AverageQuaternion> {
    average_quaternion_with_config(quaternions, weights, &StatsConfig::default())
}

/// Average a set of quaternions with an explicit configuration.
///
/// # Errors
///
/// See [`average_quaternion`]; additionally fails if `config` is invalid.
pub fn average_quaternion_with_config(
    quaternions: &[Quaternion],
    weights: Option<&[f64]>,
    config: &StatsConfig,
) -> Result<AverageQuaternion> {
    Ok(average_quaternion_detailed(quaternions, weights, config)?.average)
}

/// Average a set of quaternions and report the eigen-structure and sign
/// handling behind the result.
///
/// # Errors
///
/// See [`average_quaternion_with_config`].
pub fn average_quaternion_detailed(
    quaternions: &[Quaternion],
    weights: Option<&[f64]>,
    config: &StatsConfig,
) -> Result<AverageBreakdown> {
    validate_inputs(quaternions, weights)?;
    average_validated(quaternions, weights, config)
}

/// Average inputs whose shape has already been checked.
pub(crate) fn average_validated(
    quaternions: &[Quaternion],
    weights: Option<&[f64]>,
    config: &StatsConfig,
) -> Result<AverageBreakdown> {
    let mut accumulator = QuaternionAccumulator::with_config(*config)?;
    accumulator.extend_validated(quaternions, weights)?;
    accumulator.average_detailed()
}

/// Check the shape preconditions shared by every statistic.
pub(crate) fn validate_inputs(quaternions: &[Quaternion], weights: Option<&[f64]>) -> Result<()> {
    if quaternions.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    if let Some(w) = weights {
        if w.len() != quaternions.len() {
            return Err(StatsError::weight_length_mismatch(quaternions.len(), w.len()));
        }
    }
    Ok(())
}

/// Solve for the average from an accumulator matrix and the raw vector sum.
pub(crate) fn solve_average(
    matrix: &Matrix4<f64>,
    raw_sum: &Vector4<f64>,
    samples: usize,
    total_weight: f64,
    config: &StatsConfig,
) -> Result<AverageBreakdown> {
    let eigen = sorted_symmetric_eigen(matrix, config)?;

    let mut breakdown = AverageBreakdown {
        average: AverageQuaternion::Undefined,
        eigenvalues: Some(eigen.eigenvalues),
        sign_flipped: false,
        sign_ambiguous: false,
        samples,
        total_weight,
    };

    // Exact test: scaling M by a positive constant leaves its eigenvectors unchanged
    if matrix.iter().all(|&v| v == 0.0) {
        log::debug!("average undefined: accumulator is numerically zero");
        return Ok(breakdown);
    }

    let axis = eigen.principal_axis();
    let norm = axis.norm();
    if config.is_zero(norm) {
        log::debug!("average undefined: principal eigenvector has zero norm");
        return Ok(breakdown);
    }
    let mut qf = axis / norm;

    if config.is_zero(raw_sum.norm()) {
        log::debug!("raw quaternion sum is zero; average sign left uncorrected");
        breakdown.sign_ambiguous = true;
    } else if qf.dot(raw_sum) < 0.0 {
        qf = -qf;
        breakdown.sign_flipped = true;
    }

    breakdown.average = AverageQuaternion::Defined(Quaternion::from(qf));
    Ok(breakdown)
}
