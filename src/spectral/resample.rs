//! Separable image resampling used to downsample filter responses.
//!
//! Each output coordinate maps back to the source with pixel-centre alignment
//! (`src = (dst + 0.5) / scale - 0.5`). Taps outside the image clamp to the
//! border.
use crate::error::{FeatureError, Result};
use crate::image::{ComplexImage, Image, ImageView, ImageViewMut};
use crate::scalar::{cast, Real};
use serde::{Deserialize, Serialize};

const LANCZOS_A: isize = 4;

/// Interpolation kernel used when resizing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    Nearest,
    Linear,
    /// Windowed sinc over an 8×8 neighbourhood.
    #[default]
    Lanczos4,
}

/// Output size for a scaling `ratio`: `round(len · ratio)`, at least 1.
pub fn scaled_len(len: usize, ratio: f64) -> usize {
    ((len as f64 * ratio).round() as usize).max(1)
}

/// Resize real and imaginary planes independently by `ratio` and recombine.
pub fn down_sample<T: Real>(
    image: &ComplexImage<T>,
    ratio: f64,
    interpolation: Interpolation,
) -> Result<ComplexImage<T>> {
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(FeatureError::InvalidParameter(format!(
            "downsampling ratio must be finite and positive, got {ratio}"
        )));
    }
    let (nw, nh) = (scaled_len(image.w, ratio), scaled_len(image.h, ratio));
    let (re, im) = image.split_planes();
    let re = resize(&re, nw, nh, interpolation)?;
    let im = resize(&im, nw, nh, interpolation)?;
    ComplexImage::from_planes(&re, &im)
}

/// Resize a single plane to `new_w × new_h`.
pub fn resize<T: Real>(
    src: &Image<T>,
    new_w: usize,
    new_h: usize,
    interpolation: Interpolation,
) -> Result<Image<T>> {
    if src.w == 0 || src.h == 0 || new_w == 0 || new_h == 0 {
        return Err(FeatureError::InvalidShape(format!(
            "cannot resize {}x{} to {new_w}x{new_h}",
            src.w, src.h
        )));
    }
    if new_w == src.w && new_h == src.h {
        return Ok(src.clone());
    }

    let x_taps = axis_taps::<T>(src.w, new_w, interpolation);
    let y_taps = axis_taps::<T>(src.h, new_h, interpolation);

    // Horizontal pass: src.h rows of new_w samples.
    let mut horiz = Image::<T>::new(new_w, src.h);
    for y in 0..src.h {
        let src_row = src.row(y);
        let dst_row = horiz.row_mut(y);
        for (dst_px, taps) in dst_row.iter_mut().zip(&x_taps) {
            *dst_px = apply_taps(taps, |i| src_row[i]);
        }
    }

    // Vertical pass.
    let mut out = Image::<T>::new(new_w, new_h);
    for (y, taps) in y_taps.iter().enumerate() {
        let dst_row = out.row_mut(y);
        for (x, dst_px) in dst_row.iter_mut().enumerate() {
            *dst_px = apply_taps(taps, |i| horiz.data[i * new_w + x]);
        }
    }
    Ok(out)
}

#[inline]
fn apply_taps<T: Real>(taps: &[(usize, T)], sample: impl Fn(usize) -> T) -> T {
    let mut acc = T::zero();
    for &(i, w) in taps {
        acc += w * sample(i);
    }
    acc
}

/// Per-output-sample list of `(source index, weight)` along one axis.
fn axis_taps<T: Real>(src_len: usize, dst_len: usize, interpolation: Interpolation) -> Vec<Vec<(usize, T)>> {
    let inv_scale = src_len as f64 / dst_len as f64;
    (0..dst_len)
        .map(|d| {
            let taps = match interpolation {
                Interpolation::Nearest => {
                    let s = (d as f64 * inv_scale).floor() as isize;
                    vec![(clamp_index(s, src_len), 1.0)]
                }
                Interpolation::Linear => {
                    let s = (d as f64 + 0.5) * inv_scale - 0.5;
                    let s0 = s.floor();
                    let f = s - s0;
                    let s0 = s0 as isize;
                    vec![
                        (clamp_index(s0, src_len), 1.0 - f),
                        (clamp_index(s0 + 1, src_len), f),
                    ]
                }
                Interpolation::Lanczos4 => lanczos_taps(d, inv_scale, src_len),
            };
            taps.into_iter().map(|(i, w)| (i, cast::<T>(w))).collect()
        })
        .collect()
}

fn lanczos_taps(d: usize, inv_scale: f64, src_len: usize) -> Vec<(usize, f64)> {
    let s = (d as f64 + 0.5) * inv_scale - 0.5;
    let s0 = s.floor() as isize;
    let mut taps = Vec::with_capacity(2 * LANCZOS_A as usize);
    let mut total = 0.0;
    for i in (s0 - LANCZOS_A + 1)..=(s0 + LANCZOS_A) {
        let w = lanczos_weight(s - i as f64);
        total += w;
        taps.push((clamp_index(i, src_len), w));
    }
    if total.abs() > f64::EPSILON {
        for tap in &mut taps {
            tap.1 /= total;
        }
    }
    taps
}

fn lanczos_weight(x: f64) -> f64 {
    let a = LANCZOS_A as f64;
    if x.abs() < 1e-12 {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }
    let px = std::f64::consts::PI * x;
    a * px.sin() * (px / a).sin() / (px * px)
}

fn clamp_index(idx: isize, upper: usize) -> usize {
    if idx < 0 {
        0
    } else if (idx as usize) >= upper {
        upper - 1
    } else {
        idx as usize
    }
}
