//! Forward and inverse 2D DFT on zero-padded buffers.
//!
//! Rows are transformed in a single batched `rustfft` call, the buffer is
//! transposed, columns are transformed the same way, and the result is
//! transposed back. Inputs are zero-padded on the right and bottom to a
//! 5-smooth size so `rustfft` can use its mixed-radix kernels.
use crate::error::{FeatureError, Result};
use crate::image::{ComplexImage, Image};
use crate::scalar::{from_usize, Real};
use rustfft::num_complex::Complex;
use rustfft::{FftDirection, FftPlanner};

/// Frequency-domain representation of a zero-padded image.
///
/// `w × h` is the transform size; `source_w × source_h` the size of the
/// signal before padding, used to crop the inverse transform.
#[derive(Clone, Debug, PartialEq)]
pub struct Spectrum<T> {
    pub w: usize,
    pub h: usize,
    pub source_w: usize,
    pub source_h: usize,
    pub data: Vec<Complex<T>>,
}

impl<T: Real> Spectrum<T> {
    pub fn same_transform_size(&self, other: &Spectrum<T>) -> bool {
        self.w == other.w && self.h == other.h
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Smallest `2^a · 3^b · 5^c` that is `>= n`.
pub fn optimal_dft_size(n: usize) -> usize {
    if n <= 1 {
        return 1;
    }
    let mut candidate = n;
    loop {
        let mut m = candidate;
        for p in [2usize, 3, 5] {
            while m % p == 0 {
                m /= p;
            }
        }
        if m == 1 {
            return candidate;
        }
        candidate += 1;
    }
}

/// Forward DFT of a real image, zero-padded to the optimal transform size.
pub fn complex_dft<T: Real>(image: &Image<T>) -> Result<Spectrum<T>> {
    complex_dft_complex(&ComplexImage::from_real(image))
}

/// Forward DFT of a real image, zero-padded to an explicit `w × h`.
pub fn complex_dft_with_size<T: Real>(image: &Image<T>, w: usize, h: usize) -> Result<Spectrum<T>> {
    complex_dft_complex_with_size(&ComplexImage::from_real(image), w, h)
}

/// Forward DFT of a complex image, zero-padded to the optimal transform size.
pub fn complex_dft_complex<T: Real>(image: &ComplexImage<T>) -> Result<Spectrum<T>> {
    complex_dft_complex_with_size(image, optimal_dft_size(image.w), optimal_dft_size(image.h))
}

/// Forward DFT of a complex image, zero-padded to an explicit `w × h`.
pub fn complex_dft_complex_with_size<T: Real>(
    image: &ComplexImage<T>,
    w: usize,
    h: usize,
) -> Result<Spectrum<T>> {
    if image.w == 0 || image.h == 0 {
        return Err(FeatureError::InvalidShape(
            "cannot transform an empty image".to_string(),
        ));
    }
    if w < image.w || h < image.h {
        return Err(FeatureError::DimensionMismatch(format!(
            "transform size {w}x{h} is smaller than the {}x{} input",
            image.w, image.h
        )));
    }
    let zero = Complex::new(T::zero(), T::zero());
    let mut data = vec![zero; w * h];
    for y in 0..image.h {
        data[y * w..y * w + image.w].copy_from_slice(image.row(y));
    }
    fft_2d(&mut data, w, h, FftDirection::Forward);
    Ok(Spectrum {
        w,
        h,
        source_w: image.w,
        source_h: image.h,
        data,
    })
}

/// Inverse DFT scaled by `1/N`, cropped back to the spectrum's source size.
pub fn inverse_dft<T: Real>(spectrum: &Spectrum<T>) -> ComplexImage<T> {
    inverse_dft_window(spectrum, 0, 0)
}

/// Inverse DFT scaled by `1/N`, keeping the `source_w × source_h` window
/// whose top-left corner is `(x0, y0)`. Indices wrap modulo the transform
/// size, so the window may straddle the periodic boundary.
pub fn inverse_dft_window<T: Real>(spectrum: &Spectrum<T>, x0: usize, y0: usize) -> ComplexImage<T> {
    let (w, h) = (spectrum.w, spectrum.h);
    let mut data = spectrum.data.clone();
    fft_2d(&mut data, w, h, FftDirection::Inverse);
    let inv_n = T::one() / from_usize::<T>(w * h);

    let (sw, sh) = (spectrum.source_w, spectrum.source_h);
    let mut out = Vec::with_capacity(sw * sh);
    for y in 0..sh {
        let row = ((y + y0) % h) * w;
        out.extend((0..sw).map(|x| data[row + (x + x0) % w].scale(inv_n)));
    }
    ComplexImage {
        w: sw,
        h: sh,
        data: out,
    }
}

fn fft_2d<T: Real>(data: &mut [Complex<T>], w: usize, h: usize, direction: FftDirection) {
    let mut planner = FftPlanner::<T>::new();

    // Rows: rustfft processes every `w`-long chunk of the buffer.
    let row_fft = planner.plan_fft(w, direction);
    row_fft.process(data);

    // Columns via transpose.
    let mut transposed = transpose(data, w, h);
    let col_fft = planner.plan_fft(h, direction);
    col_fft.process(&mut transposed);

    let back = transpose(&transposed, h, w);
    data.copy_from_slice(&back);
}

/// Transpose a row-major `w × h` buffer into a row-major `h × w` buffer.
fn transpose<T: Copy>(data: &[T], w: usize, h: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(w * h);
    for x in 0..w {
        for y in 0..h {
            out.push(data[y * w + x]);
        }
    }
    out
}
