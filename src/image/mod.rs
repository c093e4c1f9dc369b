pub mod buffer;
pub mod complex;
pub mod io;
pub mod traits;

pub use self::buffer::Image;
pub use self::complex::ComplexImage;
pub use self::traits::{ImageView, ImageViewMut};
