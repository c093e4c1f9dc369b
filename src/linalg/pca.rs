//! Principal component analysis and variance-driven dimensionality reduction.
//!
//! Components come from the SVD of the mean-centred data matrix (one sample
//! per row). Eigenvalues of the sample covariance are `σ² / (n - 1)`, sorted in
//! decreasing order. At most `n - 1` components are kept since centred data
//! has rank `< n`.
use super::stats::cum_sum;
use crate::error::{FeatureError, Result};
use crate::scalar::{cast, from_usize, Real};
use log::debug;
use nalgebra::{DMatrix, DVector, RowDVector};
use std::time::Instant;

/// Fitted PCA basis.
#[derive(Clone, Debug)]
pub struct Pca<T: Real> {
    mean: RowDVector<T>,
    /// One eigenvector per row, strongest first.
    components: DMatrix<T>,
    eigenvalues: DVector<T>,
}

impl<T: Real> Pca<T> {
    /// Fit on `data` (samples × features), keeping at most `max_components`.
    pub fn fit(data: &DMatrix<T>, max_components: usize) -> Result<Self> {
        let (n, d) = data.shape();
        if n < 2 || d == 0 {
            return Err(FeatureError::InvalidShape(format!(
                "PCA needs at least two samples and one feature, got {n}x{d}"
            )));
        }
        let mean = column_means(data);
        let centred = centre(data, &mean);

        let svd = centred.svd(false, true);
        let v_t = svd.v_t.as_ref().ok_or_else(|| {
            FeatureError::InvalidShape("SVD did not produce right singular vectors".to_string())
        })?;

        let mut order: Vec<usize> = (0..svd.singular_values.len()).collect();
        order.sort_by(|&a, &b| {
            svd.singular_values[b]
                .partial_cmp(&svd.singular_values[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let k = max_components.max(1).min(n - 1).min(order.len());
        order.truncate(k);

        let denom = from_usize::<T>(n - 1);
        let eigenvalues = DVector::from_iterator(
            k,
            order
                .iter()
                .map(|&i| svd.singular_values[i] * svd.singular_values[i] / denom),
        );
        let components = DMatrix::from_fn(k, d, |r, c| v_t[(order[r], c)]);
        Ok(Self {
            mean,
            components,
            eigenvalues,
        })
    }

    pub fn mean(&self) -> &RowDVector<T> {
        &self.mean
    }

    pub fn components(&self) -> &DMatrix<T> {
        &self.components
    }

    pub fn eigenvalues(&self) -> &DVector<T> {
        &self.eigenvalues
    }

    pub fn num_components(&self) -> usize {
        self.components.nrows()
    }

    /// Scores of `data` on every component: `(data - mean) · componentsᵀ`.
    pub fn project(&self, data: &DMatrix<T>) -> Result<DMatrix<T>> {
        check_features(data, self.mean.len())?;
        Ok(centre(data, &self.mean) * self.components.transpose())
    }
}

/// Result of [`pca_reduce_data`].
#[derive(Clone, Debug)]
pub struct PcaReduction<T: Real> {
    /// Samples × `num_dimensions` scores.
    pub reduced: DMatrix<T>,
    /// Features × `num_dimensions` basis, one eigenvector per column.
    pub coefficients: DMatrix<T>,
    /// Training mean, one entry per feature.
    pub mean: RowDVector<T>,
    /// Every computed eigenvalue, decreasing.
    pub eigenvalues: DVector<T>,
    /// Fraction of total variance explained by the first `i + 1` components.
    pub cumulative_variance: DVector<T>,
    pub num_dimensions: usize,
}

impl<T: Real> PcaReduction<T> {
    /// Map new samples into the reduced space.
    pub fn project(&self, data: &DMatrix<T>) -> Result<DMatrix<T>> {
        check_features(data, self.mean.len())?;
        Ok(centre(data, &self.mean) * &self.coefficients)
    }

    /// Map reduced scores back to feature space.
    pub fn reconstruct(&self, reduced: &DMatrix<T>) -> Result<DMatrix<T>> {
        if reduced.ncols() != self.num_dimensions {
            return Err(FeatureError::DimensionMismatch(format!(
                "{} score columns for {} dimensions",
                reduced.ncols(),
                self.num_dimensions
            )));
        }
        let centred = reduced * self.coefficients.transpose();
        Ok(DMatrix::from_fn(centred.nrows(), centred.ncols(), |i, j| {
            centred[(i, j)] + self.mean[j]
        }))
    }
}

/// Reduce `data` to the fewest components retaining `variability` of the
/// total variance.
pub fn pca_reduce_data<T: Real>(data: &DMatrix<T>, variability: f64) -> Result<PcaReduction<T>> {
    if !variability.is_finite() || variability <= 0.0 || variability > 1.0 {
        return Err(FeatureError::InvalidParameter(format!(
            "variability must lie in (0, 1], got {variability}"
        )));
    }
    let n = data.nrows();
    if n < 2 {
        return Err(FeatureError::InvalidShape(format!(
            "PCA reduction needs at least two samples, got {n}"
        )));
    }

    let t0 = Instant::now();
    let pca = Pca::fit(data, n - 1)?;
    let scores = pca.project(data)?;
    let eigenvalues = pca.eigenvalues().as_slice();
    let (cumulative, num_dimensions) = dimensions_for_variability(eigenvalues, variability);
    debug!(
        "pca_reduce_data {}x{} -> {} of {} components (v={}) in {:.3} ms",
        data.nrows(),
        data.ncols(),
        num_dimensions,
        pca.num_components(),
        variability,
        t0.elapsed().as_secs_f64() * 1000.0
    );

    Ok(PcaReduction {
        reduced: scores.columns(0, num_dimensions).into_owned(),
        coefficients: pca.components().rows(0, num_dimensions).transpose(),
        mean: pca.mean().clone(),
        eigenvalues: pca.eigenvalues().clone(),
        cumulative_variance: DVector::from_vec(cumulative),
        num_dimensions,
    })
}

/// Cumulative explained-variance fractions and the smallest 1-based count
/// reaching `variability`; all components when none does.
///
/// A zero total variance selects a single dimension.
pub fn dimensions_for_variability<T: Real>(eigenvalues: &[T], variability: f64) -> (Vec<T>, usize) {
    if eigenvalues.is_empty() {
        return (Vec::new(), 0);
    }
    let sums = cum_sum(eigenvalues);
    let total = sums[sums.len() - 1];
    if total <= T::zero() {
        debug!("dimensions_for_variability: zero total variance, keeping one dimension");
        return (vec![T::one(); eigenvalues.len()], 1);
    }
    let cumulative: Vec<T> = sums.iter().map(|&s| s / total).collect();
    let target = cast::<T>(variability);
    let num = cumulative
        .iter()
        .position(|&c| c >= target)
        .map(|i| i + 1)
        .unwrap_or(eigenvalues.len());
    (cumulative, num)
}

fn column_means<T: Real>(data: &DMatrix<T>) -> RowDVector<T> {
    let n = from_usize::<T>(data.nrows());
    RowDVector::from_fn(data.ncols(), |_, j| {
        data.column(j).iter().fold(T::zero(), |acc, &v| acc + v) / n
    })
}

fn centre<T: Real>(data: &DMatrix<T>, mean: &RowDVector<T>) -> DMatrix<T> {
    DMatrix::from_fn(data.nrows(), data.ncols(), |i, j| data[(i, j)] - mean[j])
}

fn check_features<T: Real>(data: &DMatrix<T>, expected: usize) -> Result<()> {
    if data.ncols() != expected {
        return Err(FeatureError::DimensionMismatch(format!(
            "{} feature columns, basis expects {}",
            data.ncols(),
            expected
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> DMatrix<f64> {
        DMatrix::from_fn(8, 5, |i, j| {
            let t = i as f64;
            match j {
                0 => t,
                1 => 2.0 * t + (t * 1.7).sin(),
                2 => (t * 0.9).cos() * 3.0,
                3 => t * t * 0.1 - 1.0,
                _ => ((i * 7 + 3) % 5) as f64,
            }
        })
    }

    #[test]
    fn cumulative_selection_matches_fractions() {
        let (cum, num) = dimensions_for_variability(&[4.0f64, 3.0, 2.0, 1.0], 0.7);
        assert_eq!(num, 2);
        let expected = [0.4, 0.7, 0.9, 1.0];
        for (c, e) in cum.iter().zip(expected) {
            assert!((c - e).abs() < 1e-12);
        }
        assert_eq!(dimensions_for_variability(&[4.0f64, 3.0, 2.0, 1.0], 1.0).1, 4);
        assert_eq!(dimensions_for_variability(&[0.0f64, 0.0], 0.5).1, 1);
    }

    #[test]
    fn full_variability_reconstructs_training_data() {
        let x = data();
        let red = pca_reduce_data(&x, 1.0).unwrap();
        assert!(red.num_dimensions <= 7);
        assert_eq!(red.reduced.nrows(), 8);
        assert_eq!(red.coefficients.shape(), (5, red.num_dimensions));
        let back = red.reconstruct(&red.reduced).unwrap();
        let err = (&back - &x).abs().max();
        assert!(err < 1e-8, "reconstruction error {err}");
    }

    #[test]
    fn partial_variability_residual_matches_discarded_eigenvalues() {
        let x = data();
        let red = pca_reduce_data(&x, 0.9).unwrap();
        let k = red.num_dimensions;
        assert_eq!(red.eigenvalues.len(), 5);
        assert!(k >= 1 && k < 5, "kept {k} of 5");

        let back = red.reconstruct(&red.reduced).unwrap();
        let residual = (&back - &x).norm_squared();
        let discarded: f64 = red.eigenvalues.iter().skip(k).sum();
        let expected = 7.0 * discarded;
        assert!(expected > 1e-6);
        assert!(
            (residual - expected).abs() < 1e-8 * expected.max(1.0),
            "residual {residual} vs (n-1)*discarded {expected}"
        );
    }

    #[test]
    fn eigenvalues_are_sorted_and_basis_is_orthonormal() {
        let pca = Pca::fit(&data(), 10).unwrap();
        assert_eq!(pca.num_components(), 5);
        let ev = pca.eigenvalues();
        for i in 1..ev.len() {
            assert!(ev[i - 1] >= ev[i]);
        }
        let gram = pca.components() * pca.components().transpose();
        let diff = (gram - DMatrix::identity(5, 5)).abs().max();
        assert!(diff < 1e-10);
    }

    #[test]
    fn components_are_capped_by_sample_count() {
        let wide = DMatrix::from_fn(4, 9, |i, j| ((i * 3 + j * j) % 7) as f64);
        let pca = Pca::fit(&wide, 100).unwrap();
        assert_eq!(pca.num_components(), 3);
        let red = pca_reduce_data(&wide, 0.999_999).unwrap();
        assert!(red.num_dimensions <= 3);
        let projected = red.project(&wide).unwrap();
        let diff = (projected - &red.reduced).abs().max();
        assert!(diff < 1e-10);
    }

    #[test]
    fn rejects_bad_inputs() {
        let one_row = DMatrix::<f64>::zeros(1, 4);
        assert!(matches!(
            pca_reduce_data(&one_row, 0.9),
            Err(FeatureError::InvalidShape(_))
        ));
        for v in [0.0, -0.1, 1.5, f64::NAN] {
            assert!(matches!(
                pca_reduce_data(&data(), v),
                Err(FeatureError::InvalidParameter(_))
            ));
        }
        let red = pca_reduce_data(&data(), 0.9).unwrap();
        assert!(matches!(
            red.project(&DMatrix::zeros(2, 3)),
            Err(FeatureError::DimensionMismatch(_))
        ));
    }
}
