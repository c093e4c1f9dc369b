//! Frequency-domain image operations.
//!
//! - [`dft`] – zero-padded forward/inverse 2D DFT and the `Spectrum` type.
//! - [`convolution`] – spectrum products, convolution and magnitude.
//! - [`resample`] – separable resizing (nearest, linear, Lanczos-4).
//! - [`normalize`] – zero-mean / unit-variance normalisation.

pub mod convolution;
pub mod dft;
pub mod normalize;
pub mod resample;

pub use convolution::{
    convolution_centered, convolution_complex_filter, convolve_image, convolve_image_centered, magnitude,
    multiply_spectra,
};
pub use dft::{
    complex_dft, complex_dft_complex, complex_dft_complex_with_size, complex_dft_with_size,
    inverse_dft, inverse_dft_window, optimal_dft_size, Spectrum,
};
pub use normalize::{channel_mean_std, zmu_normalize};
pub use resample::{down_sample, resize, scaled_len, Interpolation};
