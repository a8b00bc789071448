//! Configuration for quaternion statistics.
//!
//! This module provides the [`StatsConfig`] struct which centralizes the
//! numerical tolerances used by the averaging and dispersion routines, along
//! with presets for tighter or looser numerical regimes.
//!
//! # Example
//!
//! ```
//! use quaternion_stats::StatsConfig;
//!
//! // Use default configuration
//! let config = StatsConfig::default();
//!
//! // Tighten the zero tests for well-conditioned data
//! let strict = StatsConfig::strict();
//! assert!(strict.abs_tolerance < config.abs_tolerance);
//! ```

use crate::error::{Result, StatsError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default absolute tolerance for "is this zero" checks.
pub const DEFAULT_ABS_TOLERANCE: f64 = 1e-8;

/// Default relative tolerance for closeness checks.
pub const DEFAULT_REL_TOLERANCE: f64 = 1e-5;

/// Default iteration cap handed to the symmetric eigensolver.
pub const DEFAULT_EIGEN_MAX_ITERATIONS: usize = 1000;

/// Numerical configuration for quaternion statistics.
///
/// Closeness follows `|value - target| <= abs_tolerance + rel_tolerance * |target|`,
/// so a zero test reduces to `|value| <= abs_tolerance`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StatsConfig {
    /// Absolute tolerance used for zero-norm checks.
    pub abs_tolerance: f64,

    /// Relative tolerance used when comparing against a non-zero target.
    pub rel_tolerance: f64,

    /// Reject negative or non-finite weights before accumulating.
    pub validate_weights: bool,

    /// Iteration cap for the symmetric eigensolver (0 = unbounded).
    pub eigen_max_iterations: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            abs_tolerance: DEFAULT_ABS_TOLERANCE,
            rel_tolerance: DEFAULT_REL_TOLERANCE,
            validate_weights: true,
            eigen_max_iterations: DEFAULT_EIGEN_MAX_ITERATIONS,
        }
    }
}

impl StatsConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a tolerance is negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if !self.abs_tolerance.is_finite() || self.abs_tolerance < 0.0 {
            return Err(StatsError::invalid_config(
                "abs_tolerance must be finite and non-negative",
            ));
        }
        if !self.rel_tolerance.is_finite() || self.rel_tolerance < 0.0 {
            return Err(StatsError::invalid_config(
                "rel_tolerance must be finite and non-negative",
            ));
        }
        Ok(())
    }

    /// Preset for well-conditioned, high-precision data.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            abs_tolerance: 1e-12,
            rel_tolerance: 1e-9,
            ..Self::default()
        }
    }

    /// Preset for noisy sensor data where near-degenerate sets should be
    /// treated as degenerate.
    #[must_use]
    pub fn relaxed() -> Self {
        Self {
            abs_tolerance: 1e-6,
            rel_tolerance: 1e-4,
            ..Self::default()
        }
    }

    /// Set the absolute tolerance.
    #[must_use]
    pub const fn with_abs_tolerance(mut self, tolerance: f64) -> Self {
        self.abs_tolerance = tolerance;
        self
    }

    /// Set the relative tolerance.
    #[must_use]
    pub const fn with_rel_tolerance(mut self, tolerance: f64) -> Self {
        self.rel_tolerance = tolerance;
        self
    }

    /// Enable/disable weight validation.
    #[must_use]
    pub const fn with_validate_weights(mut self, validate: bool) -> Self {
        self.validate_weights = validate;
        self
    }

    /// Set the eigensolver iteration cap.
    #[must_use]
    pub const fn with_eigen_max_iterations(mut self, iterations: usize) -> Self {
        self.eigen_max_iterations = iterations;
        self
    }

    /// Closeness test between `value` and `target`.
    #[must_use]
    #[inline]
    pub fn is_close(&self, value: f64, target: f64) -> bool {
        (value - target).abs() <= self.abs_tolerance + self.rel_tolerance * target.abs()
    }

    /// Whether `value` is numerically zero.
    #[must_use]
    #[inline]
    pub fn is_zero(&self, value: f64) -> bool {
        self.is_close(value, 0.0)
    }
}
