//! Rotation operations consumed by the dispersion estimators.
//!
//! The estimators only need quaternion multiplication, inversion, and a
//! quaternion-to-Euler decomposition. [`RotationOps`] keeps them independent
//! of any particular rotation library; [`NalgebraRotation`] is the default.

use nalgebra::UnitQuaternion;

use crate::error::{Result, StatsError};
use crate::quaternion::Quaternion;

/// Quaternion algebra needed to form rotation residuals.
pub trait RotationOps {
    /// Hamilton product `a * b`.
    fn multiply(&self, a: &Quaternion, b: &Quaternion) -> Quaternion;

    /// Multiplicative inverse of `q`.
    ///
    /// # Errors
    ///
    /// Fails when `q` has zero norm.
    fn inverse(&self, q: &Quaternion) -> Result<Quaternion>;

    /// Decompose `q` into `[roll, pitch, yaw]` radians (static X, Y, Z axes).
    fn to_euler(&self, q: &Quaternion) -> [f64; 3];
}

/// [`RotationOps`] backed by nalgebra's quaternion types.
#[derive(Debug, Clone, Copy, Default)]
pub struct NalgebraRotation;

impl RotationOps for NalgebraRotation {
    fn multiply(&self, a: &Quaternion, b: &Quaternion) -> Quaternion {
        let a: nalgebra::Quaternion<f64> = (*a).into();
        let b: nalgebra::Quaternion<f64> = (*b).into();
        (a * b).into()
    }

    fn inverse(&self, q: &Quaternion) -> Result<Quaternion> {
        let nq: nalgebra::Quaternion<f64> = (*q).into();
        nq.try_inverse()
            .map(Quaternion::from)
            .ok_or_else(|| StatsError::numerical_instability("cannot invert a zero quaternion"))
    }

    fn to_euler(&self, q: &Quaternion) -> [f64; 3] {
        let (roll, pitch, yaw) = UnitQuaternion::from_quaternion((*q).into()).euler_angles();
        [roll, pitch, yaw]
    }
}
