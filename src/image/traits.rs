/// Read-only access to a row-major single-channel pixel grid.
pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn stride(&self) -> usize;

    fn row(&self, y: usize) -> &[Self::Pixel];

    fn pixel_count(&self) -> usize {
        self.width() * self.height()
    }

    fn is_contiguous(&self) -> bool {
        self.stride() == self.width()
    }

    /// Contiguous backing slice when rows are tightly packed.
    fn as_slice(&self) -> Option<&[Self::Pixel]> {
        None
    }

    /// Copy the pixels into a tightly packed row-major vector.
    fn to_packed(&self) -> Vec<Self::Pixel> {
        if let Some(slice) = self.as_slice() {
            return slice.to_vec();
        }
        let mut out = Vec::with_capacity(self.pixel_count());
        for y in 0..self.height() {
            out.extend_from_slice(self.row(y));
        }
        out
    }
}

pub trait ImageViewMut: ImageView {
    fn row_mut(&mut self, y: usize) -> &mut [Self::Pixel];

    fn as_mut_slice(&mut self) -> Option<&mut [Self::Pixel]> {
        None
    }
}
