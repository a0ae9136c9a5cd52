#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![warn(missing_docs)]

pub mod error;
pub mod load;
pub mod preview;

pub use error::ImageError;
pub use load::{is_supported_image, load_pixel_grid, pixel_grid_from_rgba, SUPPORTED_EXTENSIONS};
pub use preview::{preview_path_for, save_grayscale_preview};

/// Common test prelude for avoiding duplicate imports in test modules
#[cfg(test)]
pub(crate) mod test_prelude;
