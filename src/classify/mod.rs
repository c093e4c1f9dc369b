//! Classifiers operating on reduced feature vectors.
//!
//! - [`lda_qr`] – quadratic discriminant with a pooled covariance from QR.

pub mod lda_qr;

pub use lda_qr::LdaQr;

use crate::error::Result;
use crate::scalar::Real;
use nalgebra::{DMatrix, DVector};

/// Supervised classifier over one-observation-per-row matrices.
pub trait Classifier<T: Real> {
    /// Fit on `observations` with one integer label per row.
    fn train(&mut self, observations: &DMatrix<T>, labels: &[i32]) -> Result<()>;

    /// Predict one label per row.
    fn predict(&self, observations: &DMatrix<T>) -> Result<DVector<i32>>;

    /// Drop all trained state.
    fn clear(&mut self);

    fn is_trained(&self) -> bool;
}
