//! Filter bank: every `(scale, orientation)` pair of a parameter set.
//!
//! Filters are stored scale-major (all orientations of the first scale, then
//! the next scale). Construction fans out over filters with Rayon when the
//! `parallel` feature is enabled; the stored order never depends on it.
use super::filter::GaborFilter;
use super::params::{to_element, FilterBankParams};
use crate::error::Result;
use crate::parallel::map_indexed;
use crate::scalar::Real;
use log::debug;
use std::time::Instant;

/// Ordered collection of Gabor filters sharing one transform size.
#[derive(Clone, Debug)]
pub struct FilterBank<T: Real> {
    params: FilterBankParams,
    filters: Vec<GaborFilter<T>>,
}

impl<T: Real> FilterBank<T> {
    /// Build all `scales × orientations` filters.
    pub fn new(params: FilterBankParams) -> Result<Self> {
        params.validate()?;
        let k_max = to_element::<T>("k_max", params.k_max)?;
        let sigma = to_element::<T>("sigma", params.sigma)?;
        let (first_scale, _) = params.scale_range();
        let orientations = params.orientations;
        let spectrum_size = params.spectrum_size.map(|[w, h]| (w, h));

        let t0 = Instant::now();
        let built = map_indexed(params.num_filters(), params.parallel, |i| {
            GaborFilter::build(
                first_scale + i / orientations,
                i % orientations,
                params.size_x,
                params.size_y,
                k_max,
                sigma,
                spectrum_size,
                params.parallel,
            )
        });
        let filters = built.into_iter().collect::<Result<Vec<_>>>()?;
        debug!(
            "FilterBank::new {} scales x {} orientations, kernel {}x{} in {:.3} ms",
            params.scales,
            params.orientations,
            params.size_x,
            params.size_y,
            t0.elapsed().as_secs_f64() * 1000.0
        );
        Ok(Self { params, filters })
    }

    pub fn params(&self) -> &FilterBankParams {
        &self.params
    }

    pub fn scales(&self) -> usize {
        self.params.scales
    }

    pub fn orientations(&self) -> usize {
        self.params.orientations
    }

    /// `(size_x, size_y)` shared by every kernel.
    pub fn kernel_size(&self) -> (usize, usize) {
        (self.params.size_x, self.params.size_y)
    }

    pub fn k_max(&self) -> f64 {
        self.params.k_max
    }

    pub fn sigma(&self) -> f64 {
        self.params.sigma
    }

    pub fn start_at_scale_zero(&self) -> bool {
        self.params.start_at_scale_zero
    }

    /// Transform size `(w, h)` of the stored filter spectra.
    pub fn spectrum_size(&self) -> (usize, usize) {
        self.filters
            .first()
            .map(|f| (f.spectrum().w, f.spectrum().h))
            .unwrap_or((0, 0))
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Filter for an absolute scale index and orientation.
    pub fn get(&self, scale: usize, orientation: usize) -> Option<&GaborFilter<T>> {
        let (first, last) = self.params.scale_range();
        if scale < first || scale > last || orientation >= self.params.orientations {
            return None;
        }
        self.filters
            .get((scale - first) * self.params.orientations + orientation)
    }

    /// Filters in scale-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, GaborFilter<T>> {
        self.filters.iter()
    }

    pub fn filters(&self) -> &[GaborFilter<T>] {
        &self.filters
    }
}

impl<'a, T: Real> IntoIterator for &'a FilterBank<T> {
    type Item = &'a GaborFilter<T>;
    type IntoIter = std::slice::Iter<'a, GaborFilter<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}
