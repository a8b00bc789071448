//! Error types for quaternion statistics.
//!
//! Malformed input (wrong component counts, mismatched weight vectors) and
//! mathematically undefined results surface here. Degenerate-but-valid cases
//! such as sign ambiguity are handled locally and never become errors.

use thiserror::Error;

/// Main error type for quaternion statistics operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    /// Generic input validation error.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No quaternions were supplied.
    #[error("Empty input: at least one quaternion is required")]
    EmptyInput,

    /// A quaternion row does not have exactly four components.
    #[error("Invalid shape: quaternion {index} has {components} components, expected 4")]
    InvalidShape { index: usize, components: usize },

    /// Weight vector length differs from the number of quaternions.
    #[error("Length mismatch: {quaternions} quaternions vs {weights} weights")]
    WeightLengthMismatch { quaternions: usize, weights: usize },

    /// A weight is negative or not finite.
    #[error("Invalid weight at index {index}: {value}")]
    InvalidWeight { index: usize, value: f64 },

    /// The accumulator has no well-defined principal direction.
    #[error("Average quaternion is undefined for this input set")]
    UndefinedAverage,

    /// Bessel-corrected reduction over fewer than two samples.
    #[error("Division undefined: sample standard deviation needs at least 2 samples, got {samples}")]
    DivisionUndefined { samples: usize },

    /// Numerical computation failed to converge or produced NaN/Inf.
    #[error("Numerical instability: {context}")]
    NumericalInstability { context: String },

    /// Configuration validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for quaternion statistics operations.
pub type Result<T> = std::result::Result<T, StatsError>;

impl StatsError {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an invalid shape error.
    #[must_use]
    pub const fn invalid_shape(index: usize, components: usize) -> Self {
        Self::InvalidShape { index, components }
    }

    /// Create a weight length mismatch error.
    #[must_use]
    pub const fn weight_length_mismatch(quaternions: usize, weights: usize) -> Self {
        Self::WeightLengthMismatch {
            quaternions,
            weights,
        }
    }

    /// Create an invalid weight error.
    #[must_use]
    pub const fn invalid_weight(index: usize, value: f64) -> Self {
        Self::InvalidWeight { index, value }
    }

    /// Create a division undefined error.
    #[must_use]
    pub const fn division_undefined(samples: usize) -> Self {
        Self::DivisionUndefined { samples }
    }

    /// Create a numerical instability error.
    #[must_use]
    pub fn numerical_instability(context: impl Into<String>) -> Self {
        Self::NumericalInstability {
            context: context.into(),
        }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Whether the error stems from a malformed caller input.
    #[must_use]
    pub const fn is_shape_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidShape { .. } | Self::WeightLengthMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StatsError::invalid_shape(3, 5);
        assert!(err.to_string().contains('3'));
        assert!(err.to_string().contains('5'));

        let err = StatsError::division_undefined(1);
        assert!(err.to_string().contains("at least 2"));
    }

    #[test]
    fn test_shape_classification() {
        assert!(StatsError::invalid_shape(0, 3).is_shape_error());
        assert!(StatsError::weight_length_mismatch(4, 3).is_shape_error());
        assert!(!StatsError::UndefinedAverage.is_shape_error());
        assert!(!StatsError::division_undefined(1).is_shape_error());
    }

    #[test]
    fn test_error_constructors() {
        let _ = StatsError::invalid_input("test");
        let _ = StatsError::invalid_weight(2, -1.0);
        let _ = StatsError::numerical_instability("eigendecomposition did not converge");
        let _ = StatsError::invalid_config("negative tolerance");
    }
}
