//! Parameters configuring Gabor filter bank generation.
//!
//! Defaults mirror a common face-recognition setup: five scales, eight
//! orientations, 120×120 kernels, `k_max = π/2` and `sigma = 2π`.

use crate::error::{FeatureError, Result};
use crate::parallel::ParallelOptions;
use crate::scalar::{cast, Real};
use serde::Deserialize;

/// Filter bank configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FilterBankParams {
    /// Number of scales (>= 1).
    pub scales: usize,
    /// Number of orientations (>= 1). Orientation `o` has angle `o·π/8`.
    pub orientations: usize,
    /// Kernel extent along the row axis (the `x` offset).
    pub size_x: usize,
    /// Kernel extent along the column axis (the `y` offset).
    pub size_y: usize,
    /// Maximum spatial frequency.
    pub k_max: f64,
    /// Gaussian envelope bandwidth.
    pub sigma: f64,
    /// Scales run `0..scales` when true, `1..=scales` otherwise.
    pub start_at_scale_zero: bool,
    /// Explicit transform size `[width, height]` for the filter spectra.
    ///
    /// When `None` each kernel dimension is padded to the next 5-smooth size.
    /// Set this to the padded size of the images the bank will be applied to
    /// when kernel and image sizes differ.
    pub spectrum_size: Option<[usize; 2]>,
    /// Fan-out over filters and kernel rows.
    pub parallel: ParallelOptions,
}

impl Default for FilterBankParams {
    fn default() -> Self {
        Self {
            scales: 5,
            orientations: 8,
            size_x: 120,
            size_y: 120,
            k_max: std::f64::consts::FRAC_PI_2,
            sigma: 2.0 * std::f64::consts::PI,
            start_at_scale_zero: true,
            spectrum_size: None,
            parallel: ParallelOptions::default(),
        }
    }
}

impl FilterBankParams {
    /// Square kernels of side `size`.
    pub fn square(scales: usize, orientations: usize, size: usize, k_max: f64, sigma: f64) -> Self {
        Self {
            scales,
            orientations,
            size_x: size,
            size_y: size,
            k_max,
            sigma,
            ..Default::default()
        }
    }

    pub fn with_start_at_scale_zero(mut self, start_at_zero: bool) -> Self {
        self.start_at_scale_zero = start_at_zero;
        self
    }

    pub fn with_spectrum_size(mut self, width: usize, height: usize) -> Self {
        self.spectrum_size = Some([width, height]);
        self
    }

    pub fn with_parallel(mut self, parallel: ParallelOptions) -> Self {
        self.parallel = parallel;
        self
    }

    /// First and last scale index (inclusive).
    pub fn scale_range(&self) -> (usize, usize) {
        if self.start_at_scale_zero {
            (0, self.scales.saturating_sub(1))
        } else {
            (1, self.scales)
        }
    }

    pub fn num_filters(&self) -> usize {
        self.scales * self.orientations
    }

    pub fn validate(&self) -> Result<()> {
        if self.scales == 0 || self.orientations == 0 {
            return Err(FeatureError::InvalidParameter(format!(
                "filter bank needs at least one scale and orientation, got {}x{}",
                self.scales, self.orientations
            )));
        }
        validate_kernel(self.size_x, self.size_y, self.k_max, self.sigma)?;
        if let Some([w, h]) = self.spectrum_size {
            if w < self.size_y || h < self.size_x {
                return Err(FeatureError::InvalidParameter(format!(
                    "spectrum size {w}x{h} cannot hold a {}x{} kernel",
                    self.size_y, self.size_x
                )));
            }
        }
        Ok(())
    }
}

pub(crate) fn validate_kernel(size_x: usize, size_y: usize, k_max: f64, sigma: f64) -> Result<()> {
    if size_x == 0 || size_y == 0 {
        return Err(FeatureError::InvalidParameter(format!(
            "kernel size must be positive, got {size_x}x{size_y}"
        )));
    }
    if !k_max.is_finite() {
        return Err(FeatureError::InvalidParameter(format!(
            "k_max must be finite, got {k_max}"
        )));
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(FeatureError::InvalidParameter(format!(
            "sigma must be finite and positive, got {sigma}"
        )));
    }
    Ok(())
}

/// Convert a configuration value into the element type, rejecting values the
/// type cannot represent (e.g. an `f64` beyond the `f32` range).
pub(crate) fn to_element<T: Real>(name: &str, v: f64) -> Result<T> {
    let out = cast::<T>(v);
    if v.is_finite() && !out.is_finite() {
        return Err(FeatureError::InvalidType(format!(
            "{name}={v} is not representable in {}",
            std::any::type_name::<T>()
        )));
    }
    Ok(out)
}
