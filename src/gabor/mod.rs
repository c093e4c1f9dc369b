//! Gabor filter generation.
//!
//! - [`filter`] – one complex kernel plus its DFT.
//! - [`bank`] – all `(scale, orientation)` filters of a parameter set.
//! - [`params`] – bank configuration (serde-deserializable).

pub mod bank;
pub mod filter;
pub mod params;

pub use bank::FilterBank;
pub use filter::{generate_kernel, GaborFilter};
pub use params::FilterBankParams;
