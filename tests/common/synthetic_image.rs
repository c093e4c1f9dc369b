#![allow(dead_code)]

use gabor_features::image::Image;

/// Deterministic pseudo-random source (LCG) with Box-Muller normals.
pub struct Noise(u64);

impl Noise {
    pub fn new(seed: u64) -> Self {
        Self(seed.wrapping_mul(2862933555777941757).wrapping_add(3037000493))
    }

    pub fn uniform(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 11) as f64 + 0.5) / (1u64 << 53) as f64
    }

    pub fn normal(&mut self) -> f64 {
        let (u1, u2) = (self.uniform(), self.uniform());
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }
}

/// Generates a simple high-contrast checkerboard image in `[0, 1]`.
pub fn checkerboard(width: usize, height: usize, cell: usize) -> Image<f64> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");
    Image::from_fn(width, height, |x, y| {
        if ((x / cell) + (y / cell)) & 1 == 0 {
            32.0 / 255.0
        } else {
            220.0 / 255.0
        }
    })
}

/// Sinusoidal stripes with the given wave direction (radians), period in
/// pixels and phase, plus Gaussian pixel noise.
pub fn stripes(
    size: usize,
    direction: f64,
    period: f64,
    phase: f64,
    noise_sigma: f64,
    noise: &mut Noise,
) -> Image<f64> {
    let (c, s) = (direction.cos(), direction.sin());
    let mut img = Image::from_fn(size, size, |x, y| {
        let t = x as f64 * c + y as f64 * s;
        0.5 + 0.4 * (2.0 * std::f64::consts::PI * t / period + phase).sin()
    });
    for v in img.data.iter_mut() {
        *v += noise_sigma * noise.normal();
    }
    img
}

/// Two texture classes: label 1 has vertical stripes, label 2 horizontal.
/// Phase and period jitter per sample.
pub fn stripe_dataset(size: usize, per_class: usize, seed: u64) -> (Vec<Image<f64>>, Vec<i32>) {
    let mut noise = Noise::new(seed);
    let mut images = Vec::with_capacity(per_class * 2);
    let mut labels = Vec::with_capacity(per_class * 2);
    for i in 0..per_class * 2 {
        let (direction, label) = if i % 2 == 0 {
            (0.0, 1)
        } else {
            (std::f64::consts::FRAC_PI_2, 2)
        };
        let period = 5.0 + noise.uniform();
        let phase = 2.0 * std::f64::consts::PI * noise.uniform();
        images.push(stripes(size, direction, period, phase, 0.05, &mut noise));
        labels.push(label);
    }
    (images, labels)
}

/// Isotropic Gaussian clusters, one per `(centre, label)`, interleaved.
pub fn gaussian_clusters(
    centres: &[(&[f64], i32)],
    per_class: usize,
    sigma: f64,
    seed: u64,
) -> (Vec<Vec<f64>>, Vec<i32>) {
    let mut noise = Noise::new(seed);
    let mut rows = Vec::new();
    let mut labels = Vec::new();
    for _ in 0..per_class {
        for (centre, label) in centres {
            rows.push(centre.iter().map(|c| c + sigma * noise.normal()).collect());
            labels.push(*label);
        }
    }
    (rows, labels)
}
