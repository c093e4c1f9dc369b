use super::extractor::extract_batch;
use super::options::FeatureOptions;
use crate::error::{FeatureError, Result};
use crate::gabor::FilterBank;
use crate::image::Image;
use crate::linalg::{pca_reduce_data, PcaReduction};
use crate::parallel::ParallelOptions;
use crate::scalar::Real;
use nalgebra::{DMatrix, RowDVector};

/// Turns a batch of images into a training feature matrix.
pub trait FeatureSet<T: Real> {
    fn generate_feature_set(&mut self, images: &[Image<T>]) -> Result<()>;
}

/// Gabor responses reduced with PCA.
///
/// `generate_feature_set` extracts one raw row per image and keeps the
/// smallest PCA basis retaining `variability` of the variance. The fitted
/// basis is reused by [`GaborFeatureSet::project`] for unseen images.
#[derive(Clone, Debug)]
pub struct GaborFeatureSet<T: Real> {
    bank: FilterBank<T>,
    options: FeatureOptions,
    variability: f64,
    parallel: ParallelOptions,
    reduction: Option<PcaReduction<T>>,
}

impl<T: Real> GaborFeatureSet<T> {
    pub fn new(bank: FilterBank<T>, options: FeatureOptions, variability: f64) -> Self {
        Self {
            bank,
            options,
            variability,
            parallel: ParallelOptions::default(),
            reduction: None,
        }
    }

    pub fn with_parallel(mut self, parallel: ParallelOptions) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn bank(&self) -> &FilterBank<T> {
        &self.bank
    }

    pub fn options(&self) -> &FeatureOptions {
        &self.options
    }

    pub fn variability(&self) -> f64 {
        self.variability
    }

    /// Reduced training rows, `images × num_dimensions`.
    pub fn training_data(&self) -> Option<&DMatrix<T>> {
        self.reduction.as_ref().map(|r| &r.reduced)
    }

    /// PCA basis, `raw features × num_dimensions`.
    pub fn coefficients(&self) -> Option<&DMatrix<T>> {
        self.reduction.as_ref().map(|r| &r.coefficients)
    }

    /// Mean raw feature row of the training batch.
    pub fn mean(&self) -> Option<&RowDVector<T>> {
        self.reduction.as_ref().map(|r| &r.mean)
    }

    pub fn reduction(&self) -> Option<&PcaReduction<T>> {
        self.reduction.as_ref()
    }

    /// Raw (unreduced) feature rows of `images`.
    pub fn raw_features(&self, images: &[Image<T>]) -> Result<DMatrix<T>> {
        extract_batch(&self.bank, images, &self.options, self.parallel)
    }

    /// Map unseen images into the fitted reduced space.
    pub fn project(&self, images: &[Image<T>]) -> Result<DMatrix<T>> {
        let reduction = self.reduction.as_ref().ok_or(FeatureError::NotTrained)?;
        reduction.project(&self.raw_features(images)?)
    }
}

impl<T: Real> FeatureSet<T> for GaborFeatureSet<T> {
    fn generate_feature_set(&mut self, images: &[Image<T>]) -> Result<()> {
        self.reduction = None;
        let raw = self.raw_features(images)?;
        self.reduction = Some(pca_reduce_data(&raw, self.variability)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gabor::FilterBankParams;
    use std::f64::consts::PI;

    fn stripes(n: usize, period: f64, shift: f64) -> Image<f64> {
        Image::from_fn(n, n, |x, y| (2.0 * PI * (x as f64 + 0.3 * y as f64 + shift) / period).sin())
    }

    fn feature_set() -> GaborFeatureSet<f64> {
        let bank = FilterBank::new(FilterBankParams::square(2, 4, 12, PI / 2.0, 2.0 * PI)).unwrap();
        GaborFeatureSet::new(bank, FeatureOptions::default(), 0.95)
    }

    #[test]
    fn training_rows_match_projection_of_training_images() {
        let images: Vec<_> = (0..6).map(|i| stripes(12, 3.0 + i as f64, 0.5 * i as f64)).collect();
        let mut fs = feature_set();
        fs.generate_feature_set(&images).unwrap();

        let train = fs.training_data().unwrap().clone();
        assert_eq!(train.nrows(), 6);
        assert!(train.ncols() >= 1 && train.ncols() <= 5);
        assert_eq!(fs.coefficients().unwrap().shape(), (8 * 144, train.ncols()));
        assert_eq!(fs.mean().unwrap().len(), 8 * 144);

        let projected = fs.project(&images).unwrap();
        let diff = (projected - train).abs().max();
        assert!(diff < 1e-8);
    }

    #[test]
    fn project_before_generation_fails() {
        let fs = feature_set();
        assert!(matches!(
            fs.project(&[stripes(12, 4.0, 0.0)]),
            Err(FeatureError::NotTrained)
        ));
    }

    #[test]
    fn single_image_batch_cannot_be_reduced() {
        let mut fs = feature_set();
        assert!(matches!(
            fs.generate_feature_set(&[stripes(12, 4.0, 0.0)]),
            Err(FeatureError::InvalidShape(_))
        ));
        assert!(fs.training_data().is_none());
    }
}
