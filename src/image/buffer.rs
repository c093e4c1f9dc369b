//! Owned single-channel image in row-major layout (stride == width).
//!
//! Generic over the floating-point element type so the same buffer feeds the
//! `f32` and `f64` pipelines.
use super::traits::{ImageView, ImageViewMut};
use crate::error::{FeatureError, Result};
use crate::scalar::{cast, Real};

#[derive(Clone, Debug, PartialEq)]
pub struct Image<T> {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Number of elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<T>,
}

impl<T: Real> Image<T> {
    /// Construct a zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![T::zero(); w * h],
        }
    }

    /// Wrap an existing row-major buffer.
    pub fn from_vec(w: usize, h: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != w * h {
            return Err(FeatureError::DimensionMismatch(format!(
                "buffer holds {} samples, expected {w}x{h}",
                data.len()
            )));
        }
        Ok(Self {
            w,
            h,
            stride: w,
            data,
        })
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(w: usize, h: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                data.push(f(x, y));
            }
        }
        Self {
            w,
            h,
            stride: w,
            data,
        }
    }

    /// Convert tightly packed 8-bit gray samples to `[0, 1]`.
    pub fn from_gray_u8(w: usize, h: usize, gray: &[u8]) -> Result<Self> {
        if gray.len() != w * h {
            return Err(FeatureError::DimensionMismatch(format!(
                "gray buffer holds {} bytes, expected {w}x{h}",
                gray.len()
            )));
        }
        let scale = cast::<T>(1.0 / 255.0);
        let data = gray.iter().map(|&v| cast::<T>(v as f64) * scale).collect();
        Ok(Self {
            w,
            h,
            stride: w,
            data,
        })
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }
    #[inline]
    /// Get the pixel value at (x, y).
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[self.idx(x, y)]
    }
    #[inline]
    /// Set the pixel value at (x, y).
    pub fn set(&mut self, x: usize, y: usize, v: T) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    pub fn same_size<U>(&self, other: &Image<U>) -> bool {
        self.w == other.w && self.h == other.h
    }
}

impl<T: Copy> ImageView for Image<T> {
    type Pixel = T;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[T] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[T]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}

impl<T: Copy> ImageViewMut for Image<T> {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [T] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }

    #[inline]
    fn as_mut_slice(&mut self) -> Option<&mut [T]> {
        if self.stride == self.w {
            Some(&mut self.data[..self.w * self.h])
        } else {
            None
        }
    }
}
