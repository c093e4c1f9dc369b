//! Apply a filter bank to images and flatten the responses into feature rows.
//!
//! The image spectrum is computed once per image at the bank's transform
//! size. For every filter in bank order the response is obtained by spectral
//! multiplication and read back centred on the kernel's middle sample, so it
//! is aligned with the image. It is then optionally downsampled, optionally standardised, reduced to
//! its magnitude and appended row-major to the image's feature row.
use super::options::FeatureOptions;
use crate::error::{FeatureError, Result};
use crate::gabor::FilterBank;
use crate::image::Image;
use crate::parallel::{map_indexed, ParallelOptions};
use crate::scalar::Real;
use crate::spectral::{
    complex_dft_with_size, convolution_centered, down_sample, magnitude, zmu_normalize,
};
use log::debug;
use nalgebra::DMatrix;
use std::time::Instant;

/// Length of the feature row produced for a `w × h` image.
pub fn feature_len<T: Real>(bank: &FilterBank<T>, w: usize, h: usize, options: &FeatureOptions) -> usize {
    let (rw, rh) = options.response_size(w, h);
    bank.len() * rw * rh
}

/// Feature row of a single image.
pub fn extract_image<T: Real>(
    bank: &FilterBank<T>,
    image: &Image<T>,
    options: &FeatureOptions,
) -> Result<Vec<T>> {
    options.validate()?;
    if image.w == 0 || image.h == 0 {
        return Err(FeatureError::InvalidShape(
            "cannot extract features from an empty image".to_string(),
        ));
    }
    let (sw, sh) = bank.spectrum_size();
    if image.w > sw || image.h > sh {
        return Err(FeatureError::DimensionMismatch(format!(
            "{}x{} image exceeds the filter bank transform size {sw}x{sh}",
            image.w, image.h
        )));
    }

    let image_freq = complex_dft_with_size(image, sw, sh)?;
    let mut row = Vec::with_capacity(feature_len(bank, image.w, image.h, options));
    for filter in bank {
        let kernel = filter.kernel();
        let mut response =
            convolution_centered(&image_freq, filter.spectrum(), (kernel.w / 2, kernel.h / 2))?;
        if options.downsample {
            response = down_sample(&response, options.downsampling_ratio, options.interpolation)?;
        }
        if options.zero_mean_unit_variance {
            response = zmu_normalize(&response);
        }
        row.extend_from_slice(&magnitude(&response).data);
    }
    Ok(row)
}

/// Feature matrix of a batch, one row per image in input order.
pub fn extract_batch<T: Real>(
    bank: &FilterBank<T>,
    images: &[Image<T>],
    options: &FeatureOptions,
    parallel: ParallelOptions,
) -> Result<DMatrix<T>> {
    let first = images.first().ok_or_else(|| {
        FeatureError::InvalidShape("cannot extract features from an empty batch".to_string())
    })?;
    if let Some((i, img)) = images
        .iter()
        .enumerate()
        .find(|(_, img)| !img.same_size(first))
    {
        return Err(FeatureError::DimensionMismatch(format!(
            "image {i} is {}x{}, batch expects {}x{}",
            img.w, img.h, first.w, first.h
        )));
    }
    options.validate()?;

    let t0 = Instant::now();
    let rows = map_indexed(images.len(), parallel, |i| extract_image(bank, &images[i], options))
        .into_iter()
        .collect::<Result<Vec<_>>>()?;
    let cols = feature_len(bank, first.w, first.h, options);
    debug!(
        "extract_batch {} images of {}x{} -> {} features each in {:.3} ms",
        images.len(),
        first.w,
        first.h,
        cols,
        t0.elapsed().as_secs_f64() * 1000.0
    );
    Ok(DMatrix::from_fn(rows.len(), cols, |r, c| rows[r][c]))
}
