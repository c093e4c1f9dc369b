//! I/O helpers for grayscale images and JSON.
//!
//! - `load_grayscale_image`: decode a PNG/JPEG/etc. into a float image in `[0, 1]`.
//! - `list_dir_images`: sorted directory listing with an optional extension filter.
//! - `save_normalized_png`: write an image to PNG after min/max stretching.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{Image, ImageView};
use crate::error::Result;
use crate::scalar::{cast, to_f64, Real};
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Load an image from disk, convert to 8-bit grayscale and scale to `[0, 1]`.
pub fn load_grayscale_image<T: Real>(path: &Path) -> Result<Image<T>> {
    let gray = image::open(path)?.into_luma8();
    let (w, h) = (gray.width() as usize, gray.height() as usize);
    Image::from_gray_u8(w, h, gray.as_raw())
}

/// List the regular files of `dir`, sorted by path.
///
/// When `extension` is given only files whose extension matches it
/// (case-insensitive, without the leading dot) are returned.
pub fn list_dir_images(dir: &Path, extension: Option<&str>) -> Result<Vec<PathBuf>> {
    let wanted = extension.map(|e| e.trim_start_matches('.').to_ascii_lowercase());
    let mut out = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(ext) = &wanted {
            let matches = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case(ext))
                .unwrap_or(false);
            if !matches {
                continue;
            }
        }
        out.push(path);
    }
    out.sort();
    Ok(out)
}

/// Save an image to a grayscale PNG, stretching `[min, max]` to `[0, 255]`.
pub fn save_normalized_png<T: Real>(image: &Image<T>, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let (mut lo, mut hi) = match image.data.first() {
        Some(&v) => (v, v),
        None => (T::zero(), T::zero()),
    };
    for &v in &image.data {
        if v < lo {
            lo = v;
        }
        if v > hi {
            hi = v;
        }
    }
    let range = hi - lo;
    let scale = if range > T::zero() {
        cast::<T>(255.0) / range
    } else {
        T::zero()
    };
    let mut out = GrayImage::new(image.w as u32, image.h as u32);
    for y in 0..image.h {
        for (x, &px) in image.row(y).iter().enumerate() {
            let v = to_f64((px - lo) * scale);
            out.put_pixel(x as u32, y as u32, Luma([v.clamp(0.0, 255.0) as u8]));
        }
    }
    out.save(path)?;
    Ok(())
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<V: Serialize>(path: &Path, value: &V) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("gabor_features_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn listing_filters_by_extension_and_sorts() {
        let dir = scratch_dir("listing");
        for name in ["b.png", "a.PNG", "c.txt"] {
            fs::write(dir.join(name), b"x").unwrap();
        }
        fs::create_dir_all(dir.join("nested.png")).unwrap();

        let pngs = list_dir_images(&dir, Some(".png")).unwrap();
        let names: Vec<_> = pngs
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.PNG", "b.png"]);

        let all = list_dir_images(&dir, None).unwrap();
        assert_eq!(all.len(), 3);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn png_round_trip_preserves_dimensions() {
        let dir = scratch_dir("png");
        let path = dir.join("ramp.png");
        let img = Image::<f32>::from_fn(5, 3, |x, _| x as f32);
        save_normalized_png(&img, &path).unwrap();
        let loaded: Image<f32> = load_grayscale_image(&path).unwrap();
        assert_eq!((loaded.w, loaded.h), (5, 3));
        assert_eq!(loaded.get(0, 0), 0.0);
        assert!((loaded.get(4, 2) - 1.0).abs() < 1e-6);
        let _ = fs::remove_dir_all(&dir);
    }
}
