//! Quaternion Statistics Library
//!
//! Mean and dispersion of sets of 3D orientations given as unit quaternions.
//!
//! A component-wise mean of quaternions is not a valid rotation average. This
//! library computes the weighted average as the principal eigenvector of the
//! accumulator `M = sum_i w_i q_i q_i^T` (Markley et al.), then measures how
//! spread out the samples are around it.
//!
//! # Features
//!
//! - **Eigen-based averaging**: optimal L2 average on the rotation group, with
//!   sign correction against the raw vector sum
//! - **Explicit undefined case**: [`AverageQuaternion::Undefined`] instead of a
//!   silent fallback
//! - **Two dispersion estimators**: per-axis Euler residual deviation and a
//!   scalar angular deviation
//! - **Incremental accumulation**: [`QuaternionAccumulator`] for streaming input
//!
//! # Quick Start
//!
//! ```
//! use quaternion_stats::{average_quaternion, quaternion_covariance, Quaternion};
//!
//! let quaternions: Vec<Quaternion> = [0.1, 0.2, 0.3, 0.4]
//!     .iter()
//!     .map(|&theta| Quaternion::from_axis_angle([0.0, 1.0, 0.0], theta))
//!     .collect();
//!
//! let avg = average_quaternion(&quaternions, None)?.into_result()?;
//! let std = quaternion_covariance(&quaternions, None, Some(avg))?;
//!
//! // Spread is entirely about the pitch axis
//! assert!(std[1] > 0.1 && std[0] < 1e-9 && std[2] < 1e-9);
//! # Ok::<(), quaternion_stats::StatsError>(())
//! ```
//!
//! # Component Ordering
//!
//! Quaternions are `(x, y, z, w)` everywhere: vector part first, scalar
//! part last.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]

pub mod accumulator;
pub mod average;
pub mod config;
pub mod dispersion;
pub mod error;
pub mod math;
pub mod quaternion;
pub mod rotation;

// Re-exports for convenient access
pub use accumulator::QuaternionAccumulator;
pub use average::{
    average_quaternion, average_quaternion_detailed, average_quaternion_with_config,
    AverageBreakdown, AverageQuaternion,
};
pub use config::{
    StatsConfig, DEFAULT_ABS_TOLERANCE, DEFAULT_EIGEN_MAX_ITERATIONS, DEFAULT_REL_TOLERANCE,
};
pub use dispersion::{
    angular_residuals, euler_residuals, quaternion_covariance, quaternion_covariance_1d,
    quaternion_covariance_1d_with_config, quaternion_covariance_with, summarize,
    DispersionSummary,
};
pub use error::{Result, StatsError};
pub use quaternion::{quaternions_from_rows, Quaternion};
pub use rotation::{NalgebraRotation, RotationOps};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rows_to_statistics() {
        // (x, y, z, w) rows for rotations of 0.1..0.4 rad about Y
        let rows: Vec<[f64; 4]> = [0.1f64, 0.2, 0.3, 0.4]
            .iter()
            .map(|t| [0.0, (t / 2.0).sin(), 0.0, (t / 2.0).cos()])
            .collect();
        let quaternions = quaternions_from_rows(&rows).unwrap();

        let avg = average_quaternion(&quaternions, None)
            .unwrap()
            .into_result()
            .unwrap();
        assert_relative_eq!(avg.y, (0.125f64).sin(), epsilon = 1e-8);
        assert_relative_eq!(avg.w, (0.125f64).cos(), epsilon = 1e-8);

        let summary = summarize(&quaternions, None, &StatsConfig::default()).unwrap();
        assert_eq!(summary.samples, 4);
        assert!(summary.angular_std.unwrap() > 0.0);
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
