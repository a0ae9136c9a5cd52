#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![warn(missing_docs)]

pub mod error;
pub mod luminance;
pub mod pixel_grid;
pub mod sample;

pub use error::GridError;
pub use luminance::luminance;
pub use pixel_grid::PixelGrid;
pub use sample::{Sample, PADDING_SAMPLE};

/// Common test prelude for avoiding duplicate imports in test modules
#[cfg(test)]
pub(crate) mod test_prelude;
