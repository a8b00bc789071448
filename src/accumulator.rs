//! Incremental quaternion averaging.
//!
//! This module provides [`QuaternionAccumulator`], which folds samples into
//! the 4x4 outer-product accumulator one at a time so an average can be
//! queried at any point without keeping the samples around.

use nalgebra::{Matrix4, Vector4};

use crate::average::{solve_average, AverageBreakdown, AverageQuaternion};
use crate::config::StatsConfig;
use crate::error::{Result, StatsError};
use crate::math::linalg::add_weighted_outer_product;
use crate::quaternion::Quaternion;

/// Running accumulator for weighted quaternion averaging.
///
/// Produces the same result as [`average_quaternion`](crate::average_quaternion)
/// over the samples pushed so far.
///
/// # Example
///
/// ```
/// use quaternion_stats::{Quaternion, QuaternionAccumulator};
///
/// let mut acc = QuaternionAccumulator::new();
/// acc.push(Quaternion::from_axis_angle([0.0, 0.0, 1.0], 0.1))?;
/// acc.push(Quaternion::from_axis_angle([0.0, 0.0, 1.0], 0.3))?;
///
/// if let Some(avg) = acc.average()?.quaternion() {
///     assert!(avg.angle_to(&Quaternion::from_axis_angle([0.0, 0.0, 1.0], 0.2)) < 1e-6);
/// }
/// # Ok::<(), quaternion_stats::StatsError>(())
/// ```
#[derive(Debug, Clone)]
pub struct QuaternionAccumulator {
    /// Numerical configuration.
    config: StatsConfig,

    /// `sum_i w_i q_i q_i^T`.
    matrix: Matrix4<f64>,

    /// Unweighted `sum_i q_i`, used for sign correction.
    raw_sum: Vector4<f64>,

    /// First sample, returned as-is while it is the only one.
    first: Option<Quaternion>,

    /// Number of samples pushed.
    count: usize,

    /// Sum of weights pushed.
    total_weight: f64,
}

impl Default for QuaternionAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl QuaternionAccumulator {
    /// Create an empty accumulator with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: StatsConfig::default(),
            matrix: Matrix4::zeros(),
            raw_sum: Vector4::zeros(),
            first: None,
            count: 0,
            total_weight: 0.0,
        }
    }

    /// Create an empty accumulator with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation.
    pub fn with_config(config: StatsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    /// Add a sample with weight 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the quaternion has non-finite components.
    pub fn push(&mut self, q: Quaternion) -> Result<()> {
        self.push_weighted(q, 1.0)
    }

    /// Add a weighted sample.
    ///
    /// # Errors
    ///
    /// Returns an error if the quaternion has non-finite components or, when
    /// weight validation is enabled, the weight is negative or not finite.
    pub fn push_weighted(&mut self, q: Quaternion, weight: f64) -> Result<()> {
        self.check_sample(self.count, &q, weight)?;
        self.accumulate(q, weight);
        Ok(())
    }

    /// Add a batch of samples with optional weights.
    ///
    /// The whole batch is validated before any sample is accumulated, so a
    /// rejected batch leaves the accumulator unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error on a weight length mismatch or any invalid sample.
    pub fn extend(&mut self, quaternions: &[Quaternion], weights: Option<&[f64]>) -> Result<()> {
        if let Some(w) = weights {
            if w.len() != quaternions.len() {
                return Err(StatsError::weight_length_mismatch(quaternions.len(), w.len()));
            }
        }
        self.extend_validated(quaternions, weights)
    }

    /// [`QuaternionAccumulator::extend`] for batches whose weight length has
    /// already been checked.
    pub(crate) fn extend_validated(
        &mut self,
        quaternions: &[Quaternion],
        weights: Option<&[f64]>,
    ) -> Result<()> {
        let weight_at = |i: usize| weights.map_or(1.0, |w| w[i]);

        for (i, q) in quaternions.iter().enumerate() {
            self.check_sample(self.count + i, q, weight_at(i))?;
        }
        for (i, q) in quaternions.iter().enumerate() {
            self.accumulate(*q, weight_at(i));
        }
        Ok(())
    }

    /// Number of samples pushed.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Whether no samples have been pushed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Sum of weights pushed.
    #[must_use]
    pub const fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// The accumulator matrix `sum_i w_i q_i q_i^T`.
    #[must_use]
    pub const fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    /// Unweighted vector sum of the samples.
    #[must_use]
    pub fn raw_sum(&self) -> Quaternion {
        Quaternion::from(self.raw_sum)
    }

    /// Discard all samples, keeping the configuration.
    pub fn reset(&mut self) {
        *self = Self {
            config: self.config,
            ..Self::new()
        };
    }

    /// Current average.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::EmptyInput`] if nothing has been pushed, or a
    /// numerical error from the eigensolver.
    pub fn average(&self) -> Result<AverageQuaternion> {
        Ok(self.average_detailed()?.average)
    }

    /// Current average with eigenvalues and sign-handling details.
    ///
    /// # Errors
    ///
    /// See [`QuaternionAccumulator::average`].
    pub fn average_detailed(&self) -> Result<AverageBreakdown> {
        match (self.count, self.first) {
            (0, _) | (_, None) => Err(StatsError::EmptyInput),
            (1, Some(q)) => {
                log::debug!("single sample; returning it unchanged");
                Ok(AverageBreakdown {
                    average: AverageQuaternion::Defined(q),
                    eigenvalues: None,
                    sign_flipped: false,
                    sign_ambiguous: false,
                    samples: 1,
                    total_weight: self.total_weight,
                })
            }
            _ => solve_average(
                &self.matrix,
                &self.raw_sum,
                self.count,
                self.total_weight,
                &self.config,
            ),
        }
    }

    fn check_sample(&self, index: usize, q: &Quaternion, weight: f64) -> Result<()> {
        if !q.is_finite() {
            return Err(StatsError::invalid_input(format!(
                "quaternion {index} has non-finite components"
            )));
        }
        if self.config.validate_weights && (!weight.is_finite() || weight < 0.0) {
            return Err(StatsError::invalid_weight(index, weight));
        }
        Ok(())
    }

    fn accumulate(&mut self, q: Quaternion, weight: f64) {
        let v = q.to_vector();
        add_weighted_outer_product(&mut self.matrix, &v, weight);
        self.raw_sum += v;
        self.total_weight += weight;
        if self.first.is_none() {
            self.first = Some(q);
        }
        self.count += 1;
    }
}
