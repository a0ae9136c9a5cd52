//! Error types for image loading and preview output.

use rif_common::GridError;
use thiserror::Error;

/// Errors that can occur while converting between image files and pixel grids.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The image file could not be read, decoded or written.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// The decoded image does not form a valid grid.
    #[error("Invalid pixel grid: {0}")]
    Grid(#[from] GridError),
}
