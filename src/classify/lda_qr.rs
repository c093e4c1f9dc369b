//! LDA-QR: a quadratic discriminant with a pooled covariance estimated from
//! the QR factorisation of class-centred training data.
//!
//! Training centres every observation on its class mean, factors the result
//! as `Q·R` and scales `R` by `1/√(n - k)` so that `RᵀR` is the pooled
//! covariance. Prediction scores each class with
//! `ln(1/k) - ½(‖(x - μ_c)·R⁻¹‖² + ln|Σ|)` and picks the best.
use super::Classifier;
use crate::error::{FeatureError, Result};
use crate::linalg::{max_index, qr, Axis, QrMode, QrStrategy};
use crate::scalar::{from_usize, Real};
use log::debug;
use nalgebra::{DMatrix, DVector};
use std::collections::HashMap;
use std::time::Instant;

#[derive(Clone, Debug)]
struct TrainedModel<T: Real> {
    /// Distinct labels in first-encountered order.
    labels: Vec<i32>,
    frequencies: Vec<usize>,
    /// One class mean per row, aligned with `labels`.
    means: DMatrix<T>,
    r: DMatrix<T>,
    r_inv: DMatrix<T>,
    log_sigma: T,
}

/// Quadratic discriminant classifier. Untrained until [`Classifier::train`]
/// succeeds; [`Classifier::clear`] returns it to the untrained state.
#[derive(Clone, Debug)]
pub struct LdaQr<T: Real> {
    strategy: QrStrategy,
    model: Option<TrainedModel<T>>,
}

impl<T: Real> Default for LdaQr<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Real> LdaQr<T> {
    pub fn new() -> Self {
        Self {
            strategy: QrStrategy::default(),
            model: None,
        }
    }

    /// Use a specific QR strategy for training.
    pub fn with_strategy(strategy: QrStrategy) -> Self {
        Self {
            strategy,
            model: None,
        }
    }

    /// Class labels in internal index order.
    pub fn labels(&self) -> Option<&[i32]> {
        self.model.as_ref().map(|m| m.labels.as_slice())
    }

    pub fn num_classes(&self) -> usize {
        self.model.as_ref().map_or(0, |m| m.labels.len())
    }

    /// Training observations seen for `label`.
    pub fn class_frequency(&self, label: i32) -> Option<usize> {
        let m = self.model.as_ref()?;
        let idx = m.labels.iter().position(|&l| l == label)?;
        Some(m.frequencies[idx])
    }

    /// Mean of the training observations of `label`.
    pub fn class_mean(&self, label: i32) -> Option<DVector<T>> {
        let m = self.model.as_ref()?;
        let idx = m.labels.iter().position(|&l| l == label)?;
        Some(m.means.row(idx).transpose())
    }

    /// Scaled upper-triangular factor of the pooled covariance.
    pub fn r(&self) -> Option<&DMatrix<T>> {
        self.model.as_ref().map(|m| &m.r)
    }

    /// `2·Σ ln sᵢ` over the singular values of `R`.
    pub fn log_sigma(&self) -> Option<T> {
        self.model.as_ref().map(|m| m.log_sigma)
    }

    /// Discriminant score of every observation (rows) for every class
    /// (columns, internal index order).
    pub fn scores(&self, observations: &DMatrix<T>) -> Result<DMatrix<T>> {
        let model = self.model.as_ref().ok_or(FeatureError::NotTrained)?;
        let d = model.means.ncols();
        if observations.ncols() != d {
            return Err(FeatureError::DimensionMismatch(format!(
                "observations have {} features, classifier was trained on {}",
                observations.ncols(),
                d
            )));
        }
        let k = model.labels.len();
        let n = observations.nrows();
        let half = T::one() / from_usize::<T>(2);
        let log_prior = (T::one() / from_usize::<T>(k)).ln();

        let mut scores = DMatrix::<T>::zeros(n, k);
        for c in 0..k {
            let centred = DMatrix::from_fn(n, d, |i, j| observations[(i, j)] - model.means[(c, j)]);
            let a = centred * &model.r_inv;
            for i in 0..n {
                let mahalanobis = a.row(i).iter().fold(T::zero(), |acc, &v| acc + v * v);
                scores[(i, c)] = log_prior - half * (mahalanobis + model.log_sigma);
            }
        }
        Ok(scores)
    }

    fn fit(&self, observations: &DMatrix<T>, labels: &[i32]) -> Result<TrainedModel<T>> {
        let (n, d) = observations.shape();
        if n != labels.len() {
            return Err(FeatureError::DimensionMismatch(format!(
                "{} observations but {} labels",
                n,
                labels.len()
            )));
        }

        let mut index: HashMap<i32, usize> = HashMap::new();
        let mut classes = Vec::new();
        let mut frequencies = Vec::new();
        let mut assignment = Vec::with_capacity(n);
        for &label in labels {
            let idx = *index.entry(label).or_insert_with(|| {
                classes.push(label);
                frequencies.push(0);
                classes.len() - 1
            });
            frequencies[idx] += 1;
            assignment.push(idx);
        }
        let k = classes.len();

        if n <= 1 || d == 0 || n < d + 1 || n <= k {
            return Err(FeatureError::InvalidShape(format!(
                "training needs more observations than features and classes, got {n} rows, {d} features, {k} classes"
            )));
        }

        let mut means = DMatrix::<T>::zeros(k, d);
        for (i, &c) in assignment.iter().enumerate() {
            for j in 0..d {
                means[(c, j)] += observations[(i, j)];
            }
        }
        for (c, &count) in frequencies.iter().enumerate() {
            let inv = T::one() / from_usize::<T>(count);
            for j in 0..d {
                means[(c, j)] *= inv;
            }
        }

        let centred = DMatrix::from_fn(n, d, |i, j| observations[(i, j)] - means[(assignment[i], j)]);
        let decomposition = qr(&centred, QrMode::Economy, self.strategy)?;
        let r = decomposition.r / from_usize::<T>(n - k).sqrt();

        let singular = r.clone().singular_values();
        let s_max = singular.iter().fold(T::zero(), |acc, &s| if s > acc { s } else { acc });
        let tol = from_usize::<T>(n.max(d)) * T::default_epsilon() * s_max;
        if let Some(s_min) = singular.iter().copied().find(|&s| s <= T::zero() || s <= tol) {
            return Err(FeatureError::SingularCovariance(format!(
                "singular value {s_min:?} below tolerance {tol:?}"
            )));
        }
        let log_sigma = singular.iter().fold(T::zero(), |acc, &s| acc + s.ln()) * from_usize::<T>(2);

        let r_inv = r.clone().try_inverse().ok_or_else(|| {
            FeatureError::SingularCovariance("R is not invertible".to_string())
        })?;

        Ok(TrainedModel {
            labels: classes,
            frequencies,
            means,
            r,
            r_inv,
            log_sigma,
        })
    }
}

impl<T: Real> Classifier<T> for LdaQr<T> {
    fn train(&mut self, observations: &DMatrix<T>, labels: &[i32]) -> Result<()> {
        self.model = None;
        let t0 = Instant::now();
        let model = self.fit(observations, labels)?;
        debug!(
            "LdaQr::train {} observations, {} features, {} classes, log_sigma={:?} in {:.3} ms",
            observations.nrows(),
            observations.ncols(),
            model.labels.len(),
            model.log_sigma,
            t0.elapsed().as_secs_f64() * 1000.0
        );
        self.model = Some(model);
        Ok(())
    }

    fn predict(&self, observations: &DMatrix<T>) -> Result<DVector<i32>> {
        let scores = self.scores(observations)?;
        let labels = self.labels().ok_or(FeatureError::NotTrained)?;
        if scores.nrows() == 0 {
            return Ok(DVector::zeros(0));
        }
        max_index(&scores, Some(labels), Axis::Rows)
    }

    fn clear(&mut self) {
        self.model = None;
    }

    fn is_trained(&self) -> bool {
        self.model.is_some()
    }
}
