//! End-to-end training: filter bank → features → PCA → LDA-QR.
//!
//! ```no_run
//! use gabor_features::prelude::*;
//!
//! # fn example(images: Vec<Image<f32>>, labels: Vec<i32>) -> gabor_features::Result<()> {
//! let model = TrainedPipeline::train(&PipelineConfig::default(), &images, &labels)?;
//! let predicted = model.predict(&images)?;
//! println!("{} predictions, timings: {:?}", predicted.len(), model.timing());
//! # Ok(())
//! # }
//! ```
use crate::classify::{Classifier, LdaQr};
use crate::config::PipelineConfig;
use crate::diagnostics::{elapsed_ms, TimingBreakdown};
use crate::error::{FeatureError, Result};
use crate::features::{FeatureSet, GaborFeatureSet};
use crate::gabor::FilterBank;
use crate::image::Image;
use crate::scalar::Real;
use log::debug;
use nalgebra::DVector;
use std::time::Instant;

/// Fitted feature basis and classifier.
#[derive(Clone, Debug)]
pub struct TrainedPipeline<T: Real> {
    feature_set: GaborFeatureSet<T>,
    classifier: LdaQr<T>,
    timing: TimingBreakdown,
}

impl<T: Real> TrainedPipeline<T> {
    /// Build the bank, extract and reduce features, then train the classifier.
    pub fn train(config: &PipelineConfig, images: &[Image<T>], labels: &[i32]) -> Result<Self> {
        if images.len() != labels.len() {
            return Err(FeatureError::DimensionMismatch(format!(
                "{} images but {} labels",
                images.len(),
                labels.len()
            )));
        }
        let t0 = Instant::now();
        let mut timing = TimingBreakdown::default();

        let bank = timing.time("filter_bank", || FilterBank::new(config.bank.clone()))?;
        let mut feature_set =
            GaborFeatureSet::new(bank, config.features, config.pca.variability_retained)
                .with_parallel(config.parallel);
        timing.time("features_pca", || feature_set.generate_feature_set(images))?;

        let reduced = feature_set
            .training_data()
            .ok_or(FeatureError::NotTrained)?
            .clone();
        let mut classifier = LdaQr::with_strategy(config.classifier.qr_strategy);
        timing.time("train", || classifier.train(&reduced, labels))?;

        timing.total_ms = elapsed_ms(t0);
        debug!(
            "TrainedPipeline::train {} images -> {} dims, {} classes in {:.3} ms",
            images.len(),
            reduced.ncols(),
            classifier.num_classes(),
            timing.total_ms
        );
        Ok(Self {
            feature_set,
            classifier,
            timing,
        })
    }

    /// Predict one label per image.
    pub fn predict(&self, images: &[Image<T>]) -> Result<DVector<i32>> {
        let reduced = self.feature_set.project(images)?;
        self.classifier.predict(&reduced)
    }

    pub fn feature_set(&self) -> &GaborFeatureSet<T> {
        &self.feature_set
    }

    pub fn classifier(&self) -> &LdaQr<T> {
        &self.classifier
    }

    pub fn timing(&self) -> &TimingBreakdown {
        &self.timing
    }
}
