//! Error types for RIF encoding.

use rif_encode::{DeterminePatternSizeError, EncodeError, TilingError};
use thiserror::Error;

/// Result type for RIF encode operations
pub type RifResult<T> = Result<T, RifError>;

/// Errors that can occur while encoding an image into RIF.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RifError {
    /// The pattern size search bounds are unusable.
    #[error("Invalid pattern size search bounds: min {min_size}, max {max_size}, step {step}. All must be at least 1 and min must not exceed max.")]
    InvalidSizeSearchBounds {
        /// Smallest size requested.
        min_size: u32,
        /// Largest size requested.
        max_size: u32,
        /// Step between tested sizes.
        step: u32,
    },

    /// The search finished without evaluating any pattern size.
    #[error("No eligible pattern size found")]
    NoEligiblePatternSize,

    /// The grid could not be tiled at the chosen pattern size.
    #[error("Tiling failed: {0}")]
    Tiling(#[from] TilingError),

    /// Serialization failed.
    #[error("Encoding failed: {0}")]
    Encode(#[from] EncodeError),
}

impl From<DeterminePatternSizeError> for RifError {
    fn from(error: DeterminePatternSizeError) -> Self {
        match error {
            DeterminePatternSizeError::InvalidBounds {
                min_size,
                max_size,
                step,
            } => Self::InvalidSizeSearchBounds {
                min_size,
                max_size,
                step,
            },
            DeterminePatternSizeError::NoEligibleCandidate => Self::NoEligiblePatternSize,
            DeterminePatternSizeError::Tiling(e) => Self::Tiling(e),
        }
    }
}
