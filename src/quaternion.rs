//! Quaternion value type.
//!
//! Components are stored and exchanged in `(x, y, z, w)` order: vector part
//! first, scalar part last. `q` and `-q` describe the same rotation.

use std::ops::Neg;

use nalgebra::Vector4;

use crate::error::{Result, StatsError};
use crate::math::linalg::normalize3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A quaternion `(x, y, z, w)` with `w` the scalar part.
///
/// # Example
///
/// ```
/// use quaternion_stats::Quaternion;
///
/// let q = Quaternion::from_axis_angle([0.0, 1.0, 0.0], 0.5);
/// assert!((q.norm() - 1.0).abs() < 1e-12);
/// assert_eq!(q.to_array()[0], 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Quaternion {
    /// First vector component (i).
    pub x: f64,
    /// Second vector component (j).
    pub y: f64,
    /// Third vector component (k).
    pub z: f64,
    /// Scalar component.
    pub w: f64,
}

impl Quaternion {
    /// Create a quaternion from its components in `(x, y, z, w)` order.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// The identity rotation.
    #[must_use]
    pub const fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Rotation of `angle` radians about `axis`.
    ///
    /// The axis is normalized; a zero axis yields the identity.
    #[must_use]
    pub fn from_axis_angle(axis: [f64; 3], angle: f64) -> Self {
        let axis = normalize3(&axis);
        if axis == [0.0; 3] {
            return Self::identity();
        }
        let (s, c) = (angle / 2.0).sin_cos();
        Self::new(axis[0] * s, axis[1] * s, axis[2] * s, c)
    }

    /// Build from an `[x, y, z, w]` array.
    #[must_use]
    pub const fn from_array(a: [f64; 4]) -> Self {
        Self::new(a[0], a[1], a[2], a[3])
    }

    /// Components as `[x, y, z, w]`.
    #[must_use]
    pub const fn to_array(self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Components as a column vector in `(x, y, z, w)` order.
    #[must_use]
    pub fn to_vector(self) -> Vector4<f64> {
        Vector4::new(self.x, self.y, self.z, self.w)
    }

    /// Four-dimensional inner product.
    #[must_use]
    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.to_vector().dot(&other.to_vector())
    }

    /// Euclidean norm.
    #[must_use]
    #[inline]
    pub fn norm(&self) -> f64 {
        self.to_vector().norm()
    }

    /// Unit-norm copy, or `None` when the norm is zero or not finite.
    #[must_use]
    pub fn normalized(&self) -> Option<Self> {
        self.to_vector()
            .try_normalize(0.0)
            .map(Self::from)
            .filter(Self::is_finite)
    }

    /// Shortest rotation angle (radians, in `[0, pi]`) between two unit
    /// quaternions, independent of their signs.
    #[must_use]
    pub fn angle_to(&self, other: &Self) -> f64 {
        2.0 * self.dot(other).abs().min(1.0).acos()
    }

    /// Whether all components are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|c| c.is_finite())
    }
}

impl Neg for Quaternion {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl From<[f64; 4]> for Quaternion {
    fn from(a: [f64; 4]) -> Self {
        Self::from_array(a)
    }
}

impl From<Quaternion> for [f64; 4] {
    fn from(q: Quaternion) -> Self {
        q.to_array()
    }
}

impl From<Vector4<f64>> for Quaternion {
    fn from(v: Vector4<f64>) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Quaternion> for nalgebra::Quaternion<f64> {
    fn from(q: Quaternion) -> Self {
        nalgebra::Quaternion::new(q.w, q.x, q.y, q.z)
    }
}

impl From<nalgebra::Quaternion<f64>> for Quaternion {
    fn from(q: nalgebra::Quaternion<f64>) -> Self {
        Self::new(q.i, q.j, q.k, q.w)
    }
}

impl TryFrom<&[f64]> for Quaternion {
    type Error = StatsError;

    fn try_from(row: &[f64]) -> Result<Self> {
        match *row {
            [x, y, z, w] => Ok(Self::new(x, y, z, w)),
            _ => Err(StatsError::invalid_shape(0, row.len())),
        }
    }
}

/// Convert row-major `(x, y, z, w)` rows into quaternions.
///
/// # Errors
///
/// Returns [`StatsError::InvalidShape`] naming the first row that does not
/// have exactly four components.
pub fn quaternions_from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Vec<Quaternion>> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let row = row.as_ref();
            Quaternion::try_from(row).map_err(|_| StatsError::invalid_shape(index, row.len()))
        })
        .collect()
}
