//! Gabor feature extraction.
//!
//! - [`extractor`] – one feature row per image from a filter bank.
//! - [`feature_set`] – `FeatureSet` trait and the PCA-reduced Gabor set.
//! - [`options`] – response post-processing switches.

pub mod extractor;
pub mod feature_set;
pub mod options;

pub use extractor::{extract_batch, extract_image, feature_len};
pub use feature_set::{FeatureSet, GaborFeatureSet};
pub use options::FeatureOptions;
