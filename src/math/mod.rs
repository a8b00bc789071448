//! Numerical utilities for quaternion statistics.
//!
//! This module provides:
//! - [`linalg`]: outer-product accumulation and sorted symmetric eigendecomposition
//! - [`stats`]: population and Bessel-corrected standard deviations

pub mod linalg;
pub mod stats;

pub use linalg::{add_weighted_outer_product, sorted_symmetric_eigen, EigenResult};
pub use stats::{population_std, population_std3, zero_mean_sample_std};
