//! A single complex Gabor kernel and its precomputed spectrum.
//!
//! For scale `s` and orientation `o` the wave vector is
//! `k = (k_max / √2^s) · (cos ψ, sin ψ)` with `ψ = o·π/8`. Every kernel sample
//! at offset `(ox, oy)` from the centre is
//!
//! ```text
//! g = (|k|²/σ²) · exp(-|k|²·(ox² + oy²) / (2σ²)) · (exp(i·(k_re·oy + k_im·ox)) - exp(-σ²/2))
//! ```
//!
//! The subtracted DC term makes the kernel's real part insensitive to
//! constant illumination.
//!
//! Kernel layout: the kernel has `size_x` rows and `size_y` columns. Sample
//! `(row, col)` sits at `ox = row - size_x/2`, `oy = col - size_y/2`, using
//! real-valued halves so odd sizes are centred between two samples.
use super::params::validate_kernel;
use crate::error::Result;
use crate::image::ComplexImage;
use crate::parallel::{for_each_chunk_mut, ParallelOptions};
use crate::scalar::{cast, from_usize, to_f64, Real};
use crate::spectral::{complex_dft_complex, complex_dft_complex_with_size, Spectrum};
use log::debug;
use rustfft::num_complex::Complex;
use std::time::Instant;

/// Complex Gabor kernel with its zero-padded DFT.
#[derive(Clone, Debug)]
pub struct GaborFilter<T: Real> {
    scale: usize,
    orientation: usize,
    k_max: T,
    sigma: T,
    kernel: ComplexImage<T>,
    spectrum: Spectrum<T>,
}

impl<T: Real> GaborFilter<T> {
    /// Square `size × size` kernel.
    pub fn new(scale: usize, orientation: usize, size: usize, k_max: T, sigma: T) -> Result<Self> {
        Self::with_size(scale, orientation, size, size, k_max, sigma)
    }

    /// Rectangular kernel with `size_x` rows and `size_y` columns.
    pub fn with_size(
        scale: usize,
        orientation: usize,
        size_x: usize,
        size_y: usize,
        k_max: T,
        sigma: T,
    ) -> Result<Self> {
        Self::build(
            scale,
            orientation,
            size_x,
            size_y,
            k_max,
            sigma,
            None,
            ParallelOptions::default(),
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn build(
        scale: usize,
        orientation: usize,
        size_x: usize,
        size_y: usize,
        k_max: T,
        sigma: T,
        spectrum_size: Option<(usize, usize)>,
        parallel: ParallelOptions,
    ) -> Result<Self> {
        let k_max_f = to_f64(k_max);
        let sigma_f = to_f64(sigma);
        validate_kernel(size_x, size_y, k_max_f, sigma_f)?;

        let t0 = Instant::now();
        let kernel = generate_kernel(scale, orientation, size_x, size_y, k_max, sigma, parallel);
        let spectrum = match spectrum_size {
            Some((w, h)) => complex_dft_complex_with_size(&kernel, w, h)?,
            None => complex_dft_complex(&kernel)?,
        };
        debug!(
            "GaborFilter s={} o={} {}x{} spectrum={}x{} in {:.3} ms",
            scale,
            orientation,
            size_x,
            size_y,
            spectrum.w,
            spectrum.h,
            t0.elapsed().as_secs_f64() * 1000.0
        );
        Ok(Self {
            scale,
            orientation,
            k_max,
            sigma,
            kernel,
            spectrum,
        })
    }

    pub fn scale(&self) -> usize {
        self.scale
    }

    pub fn orientation(&self) -> usize {
        self.orientation
    }

    /// `(size_x, size_y)`: kernel rows and columns.
    pub fn size(&self) -> (usize, usize) {
        (self.kernel.h, self.kernel.w)
    }

    pub fn k_max(&self) -> T {
        self.k_max
    }

    pub fn sigma(&self) -> T {
        self.sigma
    }

    /// Spatial kernel, `size_y` wide and `size_x` tall.
    pub fn kernel(&self) -> &ComplexImage<T> {
        &self.kernel
    }

    /// Kernel DFT at the size chosen when the filter was built.
    pub fn spectrum(&self) -> &Spectrum<T> {
        &self.spectrum
    }

    /// Kernel DFT zero-padded to an explicit `w × h`.
    pub fn spectrum_with_size(&self, w: usize, h: usize) -> Result<Spectrum<T>> {
        if self.spectrum.w == w && self.spectrum.h == h {
            return Ok(self.spectrum.clone());
        }
        complex_dft_complex_with_size(&self.kernel, w, h)
    }
}

/// Sample the Gabor kernel for one `(scale, orientation)` pair.
pub fn generate_kernel<T: Real>(
    scale: usize,
    orientation: usize,
    size_x: usize,
    size_y: usize,
    k_max: T,
    sigma: T,
    parallel: ParallelOptions,
) -> ComplexImage<T> {
    let two = cast::<T>(2.0);
    let half = cast::<T>(0.5);
    let psi = T::pi() * from_usize::<T>(orientation) / cast::<T>(8.0);
    let f_v = two.sqrt().powi(scale as i32);
    let k_re = (k_max / f_v) * psi.cos();
    let k_im = (k_max / f_v) * psi.sin();

    let sigma_sq = sigma * sigma;
    let ks = (k_re * k_re + k_im * k_im) / sigma_sq;
    let envelope_rate = -half * ks;
    let dc = (-half * sigma_sq).exp();

    let half_x = from_usize::<T>(size_x) / two;
    let half_y = from_usize::<T>(size_y) / two;

    let mut kernel = ComplexImage::new(size_y, size_x);
    for_each_chunk_mut(&mut kernel.data, size_y, parallel, |row, out| {
        let ox = from_usize::<T>(row) - half_x;
        for (col, px) in out.iter_mut().enumerate() {
            let oy = from_usize::<T>(col) - half_y;
            let common = ks * (envelope_rate * (ox * ox + oy * oy)).exp();
            let phase = k_re * oy + k_im * ox;
            *px = Complex::new(common * (phase.cos() - dc), common * phase.sin());
        }
    });
    kernel
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeatureError;
    use std::f64::consts::PI;

    #[test]
    fn centre_sample_matches_closed_form() {
        let (k_max, sigma) = (PI / 2.0, 2.0 * PI);
        let f = GaborFilter::<f64>::with_size(0, 0, 16, 12, k_max, sigma).unwrap();
        let ks = (k_max * k_max) / (sigma * sigma);
        let expected = ks * (1.0 - (-0.5 * sigma * sigma).exp());
        let c = f.kernel().get(6, 8);
        assert!((c.re - expected).abs() < 1e-12, "{} vs {}", c.re, expected);
        assert!(c.im.abs() < 1e-12);
        assert_eq!(f.size(), (16, 12));
        assert_eq!((f.kernel().w, f.kernel().h), (12, 16));
    }

    #[test]
    fn orientation_zero_is_symmetric_along_columns() {
        let f = GaborFilter::<f64>::new(1, 0, 9, PI / 2.0, 2.0 * PI).unwrap();
        let k = f.kernel();
        // Odd size: the centre lies between samples 4 and 5 on both axes.
        for row in 0..9 {
            let a = k.get(2, row);
            let b = k.get(7, row);
            assert!((a.re - b.re).abs() < 1e-12);
            assert!((a.im + b.im).abs() < 1e-12);
        }
    }

    #[test]
    fn coarser_scales_have_smaller_peak() {
        let fine = GaborFilter::<f64>::new(0, 3, 32, PI / 2.0, 2.0 * PI).unwrap();
        let coarse = GaborFilter::<f64>::new(3, 3, 32, PI / 2.0, 2.0 * PI).unwrap();
        let peak = |f: &GaborFilter<f64>| {
            f.kernel()
                .data
                .iter()
                .map(|c| c.norm())
                .fold(0.0f64, f64::max)
        };
        assert!(peak(&coarse) < peak(&fine));
    }

    #[test]
    fn spectrum_is_padded_to_optimal_size() {
        let f = GaborFilter::<f32>::with_size(0, 1, 7, 11, 1.5, 6.0).unwrap();
        assert_eq!((f.spectrum().w, f.spectrum().h), (12, 8));
        assert_eq!((f.spectrum().source_w, f.spectrum().source_h), (11, 7));
        let bigger = f.spectrum_with_size(16, 16).unwrap();
        assert_eq!(bigger.len(), 256);
        assert!(matches!(
            f.spectrum_with_size(4, 4),
            Err(FeatureError::DimensionMismatch(_))
        ));
    }

    #[test]
    fn parallel_and_sequential_kernels_agree() {
        let a = generate_kernel(2, 5, 24, 20, 1.2f64, 5.0, ParallelOptions::default());
        let b = generate_kernel(2, 5, 24, 20, 1.2f64, 5.0, ParallelOptions::disabled());
        assert_eq!(a.data, b.data);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(matches!(
            GaborFilter::<f64>::new(0, 0, 0, 1.0, 1.0),
            Err(FeatureError::InvalidParameter(_))
        ));
        assert!(matches!(
            GaborFilter::<f64>::new(0, 0, 8, 1.0, 0.0),
            Err(FeatureError::InvalidParameter(_))
        ));
        assert!(matches!(
            GaborFilter::<f32>::new(0, 0, 8, f32::NAN, 1.0),
            Err(FeatureError::InvalidParameter(_))
        ));
    }
}
