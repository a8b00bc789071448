//! Integration tests for the dispersion estimators.

use std::cell::Cell;
use std::f64::consts::PI;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use quaternion_stats::{
    average_quaternion, euler_residuals, quaternion_covariance, quaternion_covariance_1d,
    quaternion_covariance_with, summarize, NalgebraRotation, Quaternion, Result, RotationOps,
    StatsConfig, StatsError,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// =============================================================================
// HELPERS
// =============================================================================

fn common_axis(axis: [f64; 3], angles: &[f64]) -> Vec<Quaternion> {
    angles
        .iter()
        .map(|&t| Quaternion::from_axis_angle(axis, t))
        .collect()
}

fn population_std(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt()
}

/// Delegates to nalgebra and counts Euler conversions.
#[derive(Default)]
struct CountingRotation {
    euler_calls: Cell<usize>,
}

impl RotationOps for CountingRotation {
    fn multiply(&self, a: &Quaternion, b: &Quaternion) -> Quaternion {
        NalgebraRotation.multiply(a, b)
    }

    fn inverse(&self, q: &Quaternion) -> Result<Quaternion> {
        NalgebraRotation.inverse(q)
    }

    fn to_euler(&self, q: &Quaternion) -> [f64; 3] {
        self.euler_calls.set(self.euler_calls.get() + 1);
        NalgebraRotation.to_euler(q)
    }
}

// =============================================================================
// IDENTICAL AND COMMON-AXIS SETS
// =============================================================================

#[test]
fn test_identical_quaternions_have_zero_dispersion() {
    let q = Quaternion::from_axis_angle([1.0, 1.0, 0.0], 1.3);
    let qs = vec![q; 8];

    let std = quaternion_covariance(&qs, None, None).unwrap();
    assert_abs_diff_eq!(std[0], 0.0, epsilon = 1e-7);
    assert_abs_diff_eq!(std[1], 0.0, epsilon = 1e-7);
    assert_abs_diff_eq!(std[2], 0.0, epsilon = 1e-7);

    let std_1d = quaternion_covariance_1d(&qs, None, None).unwrap();
    assert_abs_diff_eq!(std_1d, 0.0, epsilon = 1e-6);
}

#[test]
fn test_common_axis_pitch_matches_angle_std() {
    let mut rng = StdRng::seed_from_u64(1234);
    let angles: Vec<f64> = (0..200).map(|_| rng.gen_range(0.2..0.8)).collect();
    let qs = common_axis([0.0, 1.0, 0.0], &angles);

    let std = quaternion_covariance(&qs, None, None).unwrap();
    let expected = population_std(&angles);

    assert!(
        (std[1] - expected).abs() / expected < 0.05,
        "pitch std {} vs angle std {}",
        std[1],
        expected
    );
    assert_abs_diff_eq!(std[0], 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(std[2], 0.0, epsilon = 1e-9);
}

#[test]
fn test_common_axis_roll_exact_for_symmetric_set() {
    let angles = [-0.4, -0.1, 0.0, 0.1, 0.4];
    let std = quaternion_covariance(&common_axis([1.0, 0.0, 0.0], &angles), None, None).unwrap();
    assert_relative_eq!(std[0], population_std(&angles), epsilon = 1e-9);
}

#[test]
fn test_1d_common_axis_sample_std() {
    let angles = [0.3, 0.5, 0.7];
    let qs = common_axis([0.0, 0.0, 1.0], &angles);

    // distances from the mean angle are 0.2, 0, 0.2; divisor N - 1 = 2
    let std = quaternion_covariance_1d(&qs, None, None).unwrap();
    assert_relative_eq!(std, (0.08f64 / 2.0).sqrt(), epsilon = 1e-7);
}

// =============================================================================
// DEGENERATE INPUT
// =============================================================================

#[test]
fn test_1d_single_sample_division_undefined() {
    let qs = vec![Quaternion::from_axis_angle([0.0, 1.0, 0.0], 0.3)];
    assert_eq!(
        quaternion_covariance_1d(&qs, None, None).unwrap_err(),
        StatsError::division_undefined(1)
    );
}

#[test]
fn test_antipodal_pair_is_finite() {
    let q = Quaternion::from_axis_angle([0.0, 1.0, 0.0], 0.7);
    let qs = vec![q, -q];

    // One residual is 0 and the other 2pi: the sign of the inner product is kept
    let std_1d = quaternion_covariance_1d(&qs, None, None).unwrap();
    assert!(std_1d.is_finite());
    assert_relative_eq!(std_1d, 2.0 * PI, epsilon = 1e-6);

    // Both residual rotations are the identity
    let std = quaternion_covariance(&qs, None, None).unwrap();
    for s in std {
        assert_abs_diff_eq!(s, 0.0, epsilon = 1e-9);
    }
}

#[test]
fn test_undefined_average_is_an_error() {
    let qs = common_axis([0.0, 1.0, 0.0], &[0.1, 0.2]);
    let err = quaternion_covariance_1d(&qs, Some(&[0.0, 0.0]), None).unwrap_err();
    assert_eq!(err, StatsError::UndefinedAverage);
}

// =============================================================================
// COUPLED-AXIS BEHAVIOR
// =============================================================================

/// Rotations composed about X then Y do not decompose into independent
/// per-axis spreads: the residual Euler angles couple and leak into yaw.
#[test]
fn test_composed_rotations_do_not_reproduce_marginal_std() {
    let ops = NalgebraRotation;
    let theta_x = [-0.6, 0.6, -0.6, 0.6];
    let theta_y = [-0.6, -0.6, 0.6, 0.6];

    let qs: Vec<Quaternion> = theta_x
        .iter()
        .zip(theta_y.iter())
        .map(|(&ax, &ay)| {
            let qx = Quaternion::from_axis_angle([1.0, 0.0, 0.0], ax);
            let qy = Quaternion::from_axis_angle([0.0, 1.0, 0.0], ay);
            ops.multiply(&qx, &qy)
        })
        .collect();

    let std = quaternion_covariance(&qs, None, None).unwrap();
    let marginal = [population_std(&theta_x), population_std(&theta_y), 0.0];

    let max_gap = std
        .iter()
        .zip(marginal.iter())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max);
    assert!(max_gap > 0.05, "std {std:?} unexpectedly matches {marginal:?}");

    // Yaw picks up dispersion that no generating angle had
    assert!(std[2] > 0.3, "yaw std {}", std[2]);
}

// =============================================================================
// WEIGHTS AND ROTATION SEAM
// =============================================================================

#[test]
fn test_weights_only_move_the_average_for_axis_std() {
    let qs = common_axis([0.0, 0.0, 1.0], &[0.0, 0.4]);
    let avg = average_quaternion(&qs, Some(&[3.0, 1.0]))
        .unwrap()
        .into_result()
        .unwrap();

    let with_weights = quaternion_covariance(&qs, Some(&[3.0, 1.0]), None).unwrap();
    let with_avg = quaternion_covariance(&qs, None, Some(avg)).unwrap();
    for (a, b) in with_weights.iter().zip(with_avg.iter()) {
        assert_relative_eq!(a, b, epsilon = 1e-12);
    }
    // Two samples 0.4 apart: population std is 0.2 wherever the average sits
    assert_relative_eq!(with_weights[2], 0.2, epsilon = 1e-9);
}

#[test]
fn test_custom_rotation_ops() {
    let ops = CountingRotation::default();
    let qs = common_axis([1.0, 0.0, 0.0], &[0.1, 0.2, 0.3, 0.4, 0.5]);

    let std = quaternion_covariance_with(&ops, &qs, None, None, &StatsConfig::default()).unwrap();
    assert_eq!(ops.euler_calls.get(), qs.len());

    let reference = quaternion_covariance(&qs, None, None).unwrap();
    assert_eq!(std, reference);
}

#[test]
fn test_euler_residuals_against_identity() {
    let qs = common_axis([0.0, 0.0, 1.0], &[0.25, -0.5]);
    let residuals = euler_residuals(&NalgebraRotation, &qs, &Quaternion::identity()).unwrap();
    assert_relative_eq!(residuals[0][2], 0.25, epsilon = 1e-12);
    assert_relative_eq!(residuals[1][2], -0.5, epsilon = 1e-12);
}

#[test]
fn test_summary_is_consistent() {
    let qs = common_axis([0.0, 1.0, 0.0], &[0.1, 0.2, 0.3, 0.4]);
    let config = StatsConfig::default();
    let summary = summarize(&qs, None, &config).unwrap();

    let axis_std = quaternion_covariance(&qs, None, Some(summary.average)).unwrap();
    let angular_std = quaternion_covariance_1d(&qs, None, Some(summary.average)).unwrap();
    assert_eq!(summary.axis_std, axis_std);
    assert_eq!(summary.angular_std, Some(angular_std));
}
