//! Common test imports and utilities for rif-api tests
#![allow(unused_imports)]

pub use rstest::rstest;
pub use rif_common::{PixelGrid, Sample};

#[cfg(feature = "file-io")]
pub use tempfile::{tempdir, NamedTempFile, TempDir};

/// Creates an opaque black and white checkerboard of `tile * tile` squares.
pub fn checker_grid(width: usize, height: usize, tile: u32) -> PixelGrid {
    PixelGrid::from_fn(width, height, |x, y| {
        Sample::opaque(if (x / tile + y / tile) % 2 == 0 { 0 } else { 255 })
    })
    .unwrap()
}

/// Helper to read file contents.
#[cfg(feature = "file-io")]
pub fn read_file_contents(path: &std::path::Path) -> Vec<u8> {
    std::fs::read(path).expect("Failed to read output file")
}
