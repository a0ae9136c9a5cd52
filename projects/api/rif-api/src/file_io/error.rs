//! Error types for file operations.

use crate::RifError;
use lightweight_mmap::handles::HandleOpenError;
use lightweight_mmap::mmap::MmapError;
use thiserror::Error;

/// Result type for file operations
pub type FileOperationResult<T> = Result<T, FileOperationError>;

/// Errors that can occur while writing an encoded image to disk.
#[derive(Debug, Error)]
pub enum FileOperationError {
    /// The output file could not be created.
    #[error("Failed to open file handle: {0}")]
    HandleOpen(#[from] HandleOpenError),

    /// The output file could not be memory-mapped.
    #[error("Failed to create memory mapping: {0}")]
    Mmap(#[from] MmapError),

    /// A filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding failed.
    #[error("Encode operation failed: {0}")]
    Rif(#[from] RifError),
}
