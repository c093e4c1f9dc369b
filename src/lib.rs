#![doc = include_str!("../README.md")]

// Numerical core
pub mod classify;
pub mod features;
pub mod gabor;
pub mod linalg;
pub mod spectral;

// Supporting modules
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod parallel;
pub mod pipeline;
pub mod scalar;

// --- High-level re-exports -------------------------------------------------

pub use crate::classify::{Classifier, LdaQr};
pub use crate::error::{FeatureError, Result};
pub use crate::features::{extract_batch, extract_image, FeatureOptions, FeatureSet, GaborFeatureSet};
pub use crate::gabor::{FilterBank, FilterBankParams, GaborFilter};
pub use crate::linalg::{pca_reduce_data, PcaReduction};
pub use crate::pipeline::TrainedPipeline;
pub use crate::scalar::Real;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use gabor_features::prelude::*;
///
/// # fn main() -> gabor_features::Result<()> {
/// let bank = FilterBank::<f32>::new(FilterBankParams::square(5, 8, 64, 1.5708, 6.2832))?;
/// let img = Image::<f32>::new(64, 64);
/// let row = extract_image(&bank, &img, &FeatureOptions::default())?;
/// println!("{} features", row.len());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::classify::{Classifier, LdaQr};
    pub use crate::config::PipelineConfig;
    pub use crate::features::{extract_batch, extract_image, FeatureOptions, FeatureSet, GaborFeatureSet};
    pub use crate::gabor::{FilterBank, FilterBankParams};
    pub use crate::image::Image;
    pub use crate::pipeline::TrainedPipeline;
}
