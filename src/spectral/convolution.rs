//! Convolution through the frequency domain and magnitude extraction.
use super::dft::{
    complex_dft_complex_with_size, complex_dft_with_size, inverse_dft, inverse_dft_window, optimal_dft_size,
    Spectrum,
};
use crate::error::{FeatureError, Result};
use crate::image::{ComplexImage, Image};
use crate::scalar::Real;

/// Elementwise complex product of two spectra of identical transform size.
pub fn multiply_spectra<T: Real>(a: &Spectrum<T>, b: &Spectrum<T>) -> Result<Spectrum<T>> {
    if !a.same_transform_size(b) {
        return Err(FeatureError::DimensionMismatch(format!(
            "spectrum {}x{} vs {}x{}",
            a.w, a.h, b.w, b.h
        )));
    }
    let data = a.data.iter().zip(&b.data).map(|(&x, &y)| x * y).collect();
    Ok(Spectrum {
        w: a.w,
        h: a.h,
        source_w: a.source_w,
        source_h: a.source_h,
        data,
    })
}

/// Convolve an image with a filter given both spectra.
///
/// Multiplies the spectra, inverts with `1/N` scaling and crops the result to
/// the image's unpadded size. The product realises circular convolution over
/// the transform size.
pub fn convolution_complex_filter<T: Real>(
    image_freq: &Spectrum<T>,
    filter_freq: &Spectrum<T>,
) -> Result<ComplexImage<T>> {
    let product = multiply_spectra(image_freq, filter_freq)?;
    Ok(inverse_dft(&product))
}

/// Centred ("same"-size) convolution of an image with a filter given both
/// spectra.
///
/// `anchor` is the kernel's centre sample `(column, row)`. Output pixel
/// `(x, y)` is read from `(x + anchor.0, y + anchor.1)` of the circular
/// product, so an impulse at `p` in the image reproduces the kernel centred
/// on `p`.
pub fn convolution_centered<T: Real>(
    image_freq: &Spectrum<T>,
    filter_freq: &Spectrum<T>,
    anchor: (usize, usize),
) -> Result<ComplexImage<T>> {
    let product = multiply_spectra(image_freq, filter_freq)?;
    Ok(inverse_dft_window(&product, anchor.0, anchor.1))
}

/// Convolve a spatial image with a spatial complex kernel.
///
/// Both are zero-padded to a common transform size that covers each input.
pub fn convolve_image<T: Real>(image: &Image<T>, kernel: &ComplexImage<T>) -> Result<ComplexImage<T>> {
    let w = optimal_dft_size(image.w.max(kernel.w));
    let h = optimal_dft_size(image.h.max(kernel.h));
    let image_freq = complex_dft_with_size(image, w, h)?;
    let kernel_freq = complex_dft_complex_with_size(kernel, w, h)?;
    convolution_complex_filter(&image_freq, &kernel_freq)
}

/// Centred convolution of a spatial image with a spatial complex kernel,
/// anchored at the kernel's middle sample.
pub fn convolve_image_centered<T: Real>(
    image: &Image<T>,
    kernel: &ComplexImage<T>,
) -> Result<ComplexImage<T>> {
    let w = optimal_dft_size(image.w.max(kernel.w));
    let h = optimal_dft_size(image.h.max(kernel.h));
    let image_freq = complex_dft_with_size(image, w, h)?;
    let kernel_freq = complex_dft_complex_with_size(kernel, w, h)?;
    convolution_centered(&image_freq, &kernel_freq, (kernel.w / 2, kernel.h / 2))
}

/// Elementwise `sqrt(re² + im²)`.
pub fn magnitude<T: Real>(image: &ComplexImage<T>) -> Image<T> {
    Image {
        w: image.w,
        h: image.h,
        stride: image.w,
        data: image.data.iter().map(|c| c.norm_sqr().sqrt()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::super::dft::complex_dft_complex;
    use super::*;
    use rustfft::num_complex::Complex;

    fn test_image(w: usize, h: usize) -> Image<f64> {
        Image::from_fn(w, h, |x, y| ((x * 7 + y * 13) % 10) as f64 / 10.0 + 0.05 * y as f64)
    }

    fn test_kernel() -> ComplexImage<f64> {
        let mut k = ComplexImage::new(5, 5);
        for y in 0..5 {
            for x in 0..5 {
                let re = 1.0 / (1.0 + (x as f64 - 2.0).powi(2) + (y as f64 - 2.0).powi(2));
                let im = (x as f64 - y as f64) * 0.1;
                k.set(x, y, Complex::new(re, im));
            }
        }
        k
    }

    #[test]
    fn frequency_product_matches_direct_circular_convolution() {
        let (w, h) = (8usize, 8usize);
        let img = test_image(w, h);
        let kernel = test_kernel();

        let out = convolve_image(&img, &kernel).unwrap();
        assert_eq!((out.w, out.h), (w, h));

        for y in 0..h {
            for x in 0..w {
                let mut acc = Complex::new(0.0, 0.0);
                for ky in 0..kernel.h {
                    for kx in 0..kernel.w {
                        let sx = (x + w - kx) % w;
                        let sy = (y + h - ky) % h;
                        acc += kernel.get(kx, ky) * img.get(sx, sy);
                    }
                }
                let got = out.get(x, y);
                assert!(
                    (got - acc).norm_sqr().sqrt() < 1e-9,
                    "mismatch at ({x},{y}): got {got}, expected {acc}"
                );
            }
        }
    }

    #[test]
    fn centered_convolution_is_shifted_by_kernel_middle() {
        let (w, h) = (8usize, 8usize);
        let img = test_image(w, h);
        let kernel = test_kernel();
        let circular = convolve_image(&img, &kernel).unwrap();
        let centered = convolve_image_centered(&img, &kernel).unwrap();
        assert_eq!((centered.w, centered.h), (w, h));
        for y in 0..h {
            for x in 0..w {
                let want = circular.get((x + 2) % w, (y + 2) % h);
                assert!((centered.get(x, y) - want).norm_sqr().sqrt() < 1e-9, "({x},{y})");
            }
        }
    }

    #[test]
    fn impulse_reproduces_kernel_around_it() {
        let mut img = Image::<f64>::new(6, 6);
        img.set(3, 2, 1.0);
        let kernel = test_kernel();
        let out = convolve_image_centered(&img, &kernel).unwrap();
        assert_eq!((out.w, out.h), (6, 6));
        for y in 0..6usize {
            for x in 0..6usize {
                let (kx, ky) = (x as isize - 3 + 2, y as isize - 2 + 2);
                let want = if (0..5).contains(&kx) && (0..5).contains(&ky) {
                    kernel.get(kx as usize, ky as usize)
                } else {
                    Complex::new(0.0, 0.0)
                };
                assert!((out.get(x, y) - want).norm_sqr().sqrt() < 1e-9, "({x},{y})");
            }
        }
    }

    #[test]
    fn mismatched_spectra_are_rejected() {
        let a = complex_dft_complex(&ComplexImage::<f64>::new(8, 8)).unwrap();
        let b = complex_dft_complex(&ComplexImage::<f64>::new(6, 8)).unwrap();
        let err = convolution_complex_filter(&a, &b).unwrap_err();
        assert!(matches!(err, FeatureError::DimensionMismatch(_)));
    }

    #[test]
    fn magnitude_is_complex_modulus() {
        let img = ComplexImage::from_vec(
            2,
            1,
            vec![Complex::new(3.0f32, 4.0), Complex::new(-5.0, 12.0)],
        )
        .unwrap();
        let mag = magnitude(&img);
        assert_eq!(mag.data, vec![5.0, 13.0]);
    }
}
