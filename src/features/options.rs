use crate::error::{FeatureError, Result};
use crate::spectral::{scaled_len, Interpolation};
use serde::Deserialize;

/// Per-filter post-processing applied to each convolution response.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct FeatureOptions {
    /// Standardise real and imaginary planes of each response before taking
    /// the magnitude.
    pub zero_mean_unit_variance: bool,
    /// Resize each response by `downsampling_ratio`.
    pub downsample: bool,
    pub downsampling_ratio: f64,
    pub interpolation: Interpolation,
}

impl Default for FeatureOptions {
    fn default() -> Self {
        Self {
            zero_mean_unit_variance: false,
            downsample: false,
            downsampling_ratio: 1.0,
            interpolation: Interpolation::Lanczos4,
        }
    }
}

impl FeatureOptions {
    pub fn validate(&self) -> Result<()> {
        if self.downsample
            && (!self.downsampling_ratio.is_finite() || self.downsampling_ratio <= 0.0)
        {
            return Err(FeatureError::InvalidParameter(format!(
                "downsampling ratio must be finite and positive, got {}",
                self.downsampling_ratio
            )));
        }
        Ok(())
    }

    /// Width and height of one filter response for a `w × h` image.
    pub fn response_size(&self, w: usize, h: usize) -> (usize, usize) {
        if self.downsample {
            (
                scaled_len(w, self.downsampling_ratio),
                scaled_len(h, self.downsampling_ratio),
            )
        } else {
            (w, h)
        }
    }
}
