//! Zero-mean / unit-variance normalisation of complex responses.
use crate::image::ComplexImage;
use crate::scalar::{from_usize, Real};
use log::debug;
use rustfft::num_complex::Complex;

/// Per-channel mean and population standard deviation, `[real, imaginary]`.
pub fn channel_mean_std<T: Real>(image: &ComplexImage<T>) -> ([T; 2], [T; 2]) {
    let zero = T::zero();
    if image.data.is_empty() {
        return ([zero; 2], [zero; 2]);
    }
    let n = from_usize::<T>(image.data.len());
    let (mut sum_re, mut sum_im) = (zero, zero);
    for c in &image.data {
        sum_re += c.re;
        sum_im += c.im;
    }
    let mean = [sum_re / n, sum_im / n];
    let (mut var_re, mut var_im) = (zero, zero);
    for c in &image.data {
        let dr = c.re - mean[0];
        let di = c.im - mean[1];
        var_re += dr * dr;
        var_im += di * di;
    }
    (mean, [(var_re / n).sqrt(), (var_im / n).sqrt()])
}

/// Subtract the channel mean and divide by the channel standard deviation.
///
/// A channel whose standard deviation is zero (a constant response) is only
/// mean-centred, leaving it identically zero instead of NaN.
pub fn zmu_normalize<T: Real>(image: &ComplexImage<T>) -> ComplexImage<T> {
    let (mean, sd) = channel_mean_std(image);
    let inv = sd.map(|s| {
        if s > T::zero() {
            T::one() / s
        } else {
            T::one()
        }
    });
    if sd.iter().any(|s| *s <= T::zero()) {
        debug!(
            "zmu_normalize: constant channel in {}x{} response (std={:?}), centring only",
            image.w, image.h, sd
        );
    }
    let data = image
        .data
        .iter()
        .map(|c| Complex::new((c.re - mean[0]) * inv[0], (c.im - mean[1]) * inv[1]))
        .collect();
    ComplexImage {
        w: image.w,
        h: image.h,
        data,
    }
}
