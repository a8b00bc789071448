//! Linear algebra utilities for quaternion averaging.
//!
//! This module builds the weighted outer-product accumulator and extracts its
//! eigen-structure using nalgebra's symmetric eigensolver.

use crate::config::StatsConfig;
use crate::error::{Result, StatsError};
use nalgebra::{Matrix4, SymmetricEigen, Vector4};

/// Eigendecomposition of a 4x4 symmetric accumulator.
#[derive(Debug, Clone)]
pub struct EigenResult {
    /// Eigenvalues sorted in ascending order.
    pub eigenvalues: [f64; 4],

    /// Eigenvectors as columns, in the same order as `eigenvalues`.
    pub eigenvectors: Matrix4<f64>,
}

impl EigenResult {
    /// Get the i-th eigenvector.
    #[must_use]
    pub fn axis(&self, i: usize) -> Vector4<f64> {
        debug_assert!(i < 4);
        self.eigenvectors.column(i).into_owned()
    }

    /// Eigenvector of the largest eigenvalue.
    #[must_use]
    pub fn principal_axis(&self) -> Vector4<f64> {
        self.axis(3)
    }
}

/// Add `weight * v * v^T` to `m`.
///
/// Both `(i, j)` and `(j, i)` receive the same product so `m` stays exactly
/// symmetric.
pub fn add_weighted_outer_product(m: &mut Matrix4<f64>, v: &Vector4<f64>, weight: f64) {
    for i in 0..4 {
        let wi = weight * v[i];
        m[(i, i)] += wi * v[i];
        for j in (i + 1)..4 {
            let p = wi * v[j];
            m[(i, j)] += p;
            m[(j, i)] += p;
        }
    }
}

/// Symmetric eigendecomposition with eigenpairs sorted ascending.
///
/// # Errors
///
/// Returns [`StatsError::NumericalInstability`] if the matrix contains
/// non-finite entries or the solver fails to converge.
pub fn sorted_symmetric_eigen(m: &Matrix4<f64>, config: &StatsConfig) -> Result<EigenResult> {
    if m.iter().any(|v| !v.is_finite()) {
        return Err(StatsError::numerical_instability(
            "accumulator matrix contains NaN or Inf",
        ));
    }

    let eigen = SymmetricEigen::try_new(*m, f64::EPSILON, config.eigen_max_iterations)
        .ok_or_else(|| {
            StatsError::numerical_instability("symmetric eigendecomposition did not converge")
        })?;

    // Collect eigenvalue-eigenvector pairs and sort ascending
    let mut pairs: Vec<(f64, Vector4<f64>)> = eigen
        .eigenvalues
        .iter()
        .enumerate()
        .map(|(i, &v)| (v, eigen.eigenvectors.column(i).into_owned()))
        .collect();

    pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let eigenvalues = [pairs[0].0, pairs[1].0, pairs[2].0, pairs[3].0];
    let eigenvectors =
        Matrix4::from_columns(&[pairs[0].1, pairs[1].1, pairs[2].1, pairs[3].1]);

    log::trace!("accumulator eigenvalues (ascending): {eigenvalues:?}");

    Ok(EigenResult {
        eigenvalues,
        eigenvectors,
    })
}

/// Normalize a 3D vector to unit length.
#[must_use]
pub fn normalize3(v: &[f64; 3]) -> [f64; 3] {
    let norm = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if norm < 1e-10 {
        return [0.0, 0.0, 0.0];
    }
    [v[0] / norm, v[1] / norm, v[2] / norm]
}
