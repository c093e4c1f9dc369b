//! Two-channel (real, imaginary) image used for filter kernels and filter
//! responses.
use super::buffer::Image;
use crate::error::{FeatureError, Result};
use crate::scalar::Real;
use rustfft::num_complex::Complex;

#[derive(Clone, Debug, PartialEq)]
pub struct ComplexImage<T> {
    pub w: usize,
    pub h: usize,
    /// Row-major samples, `w * h` entries.
    pub data: Vec<Complex<T>>,
}

impl<T: Real> ComplexImage<T> {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![Complex::new(T::zero(), T::zero()); w * h],
        }
    }

    pub fn from_vec(w: usize, h: usize, data: Vec<Complex<T>>) -> Result<Self> {
        if data.len() != w * h {
            return Err(FeatureError::DimensionMismatch(format!(
                "complex buffer holds {} samples, expected {w}x{h}",
                data.len()
            )));
        }
        Ok(Self { w, h, data })
    }

    /// Promote a real image to complex with a zero imaginary plane.
    pub fn from_real(image: &Image<T>) -> Self {
        let mut data = Vec::with_capacity(image.w * image.h);
        for y in 0..image.h {
            let start = y * image.stride;
            data.extend(
                image.data[start..start + image.w]
                    .iter()
                    .map(|&re| Complex::new(re, T::zero())),
            );
        }
        Self {
            w: image.w,
            h: image.h,
            data,
        }
    }

    /// Recombine independent real and imaginary planes.
    pub fn from_planes(re: &Image<T>, im: &Image<T>) -> Result<Self> {
        if !re.same_size(im) {
            return Err(FeatureError::DimensionMismatch(format!(
                "real plane {}x{} vs imaginary plane {}x{}",
                re.w, re.h, im.w, im.h
            )));
        }
        let mut data = Vec::with_capacity(re.w * re.h);
        for y in 0..re.h {
            for x in 0..re.w {
                data.push(Complex::new(re.get(x, y), im.get(x, y)));
            }
        }
        Ok(Self {
            w: re.w,
            h: re.h,
            data,
        })
    }

    /// Split into (real, imaginary) planes.
    pub fn split_planes(&self) -> (Image<T>, Image<T>) {
        let re = self.data.iter().map(|c| c.re).collect();
        let im = self.data.iter().map(|c| c.im).collect();
        (
            Image {
                w: self.w,
                h: self.h,
                stride: self.w,
                data: re,
            },
            Image {
                w: self.w,
                h: self.h,
                stride: self.w,
                data: im,
            },
        )
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Complex<T> {
        self.data[y * self.w + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: Complex<T>) {
        self.data[y * self.w + x] = v;
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[Complex<T>] {
        &self.data[y * self.w..(y + 1) * self.w]
    }

    pub fn pixel_count(&self) -> usize {
        self.w * self.h
    }
}
