//! Dense linear algebra on top of nalgebra.
//!
//! - [`qr`] – Givens or Householder QR in economy or full mode.
//! - [`pca`] – PCA fitting and variance-driven reduction.
//! - [`stats`] – cumulative sums, axis sums, arg-max with labels, centring.

pub mod pca;
pub mod qr;
pub mod stats;

pub use pca::{dimensions_for_variability, pca_reduce_data, Pca, PcaReduction};
pub use qr::{qr, QrDecomposition, QrMode, QrStrategy};
pub use stats::{
    cum_sum, max_index, mean_along, mean_normalize, mean_std, mean_subtraction, sum_1d, sum_2d,
    sum_along, Axis,
};
