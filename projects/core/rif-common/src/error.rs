//! Errors raised while building a [`crate::PixelGrid`].

use thiserror::Error;

/// Errors that can occur when constructing a [`crate::PixelGrid`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Width or height is zero, or does not fit in the 32-bit header fields.
    #[error("Invalid image dimensions: {width}x{height} (both must be between 1 and 4294967295)")]
    InvalidDimensions {
        /// The requested width.
        width: u64,
        /// The requested height.
        height: u64,
    },

    /// The supplied pixel buffer does not match the requested dimensions.
    #[error("Pixel data length mismatch: expected {expected} elements, got {actual}")]
    DataLengthMismatch {
        /// Number of elements required by the dimensions.
        expected: usize,
        /// Number of elements supplied.
        actual: usize,
    },
}
