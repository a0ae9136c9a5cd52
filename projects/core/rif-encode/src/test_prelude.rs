//! Common test imports and utilities for rif-encode tests
//!
//! Grid fixtures shared by the module tests, plus a minimal RIF reader
//! used to check that encoded files reproduce their source grid.
#![allow(unused_imports)]

pub use rstest::rstest;
pub use rif_common::{PixelGrid, Sample};

use crate::catalog::PatternCatalog;
use crate::format::{
    COLUMNS_OFFSET, COMPRESSED_HEADER_SIZE, HAS_ALPHA_OFFSET, HEADER_SIZE, HEIGHT_OFFSET,
    PATTERN_COUNT_OFFSET, PATTERN_SIZE_OFFSET, ROWS_OFFSET, WIDTH_OFFSET,
};
use endian_writer::{BigEndianReader, EndianReader};

/// Creates a grid where every sample is `sample`.
pub fn solid_grid(width: usize, height: usize, sample: Sample) -> PixelGrid {
    PixelGrid::new(width, height, vec![sample; width * height]).unwrap()
}

/// Creates an opaque grid whose luminance counts up row-major from `0`, wrapping at 256.
pub fn sequential_grid(width: usize, height: usize) -> PixelGrid {
    PixelGrid::from_fn(width, height, |x, y| {
        Sample::opaque((y as usize * width + x as usize) as u8)
    })
    .unwrap()
}

/// Creates an opaque grid of pseudo-random luminance drawn from `levels` distinct values.
///
/// Few levels give many repeated blocks, which exercises deduplication.
pub fn noise_grid(width: usize, height: usize, levels: u8, seed: u64) -> PixelGrid {
    let mut state = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1;
    let levels = levels.max(1) as u64;
    PixelGrid::from_fn(width, height, |_, _| {
        // xorshift64
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        Sample::opaque(((state % levels) * (255 / levels)) as u8)
    })
    .unwrap()
}

/// Returns a copy of `grid` with the top-left sample made fully transparent.
pub fn with_transparent_corner(grid: &PixelGrid) -> PixelGrid {
    let mut samples = grid.samples().to_vec();
    samples[0].alpha = 0;
    PixelGrid::new(grid.width() as usize, grid.height() as usize, samples).unwrap()
}

/// Asserts that no two patterns in the catalog hold the same samples.
pub fn assert_catalog_unique(catalog: &PatternCatalog) {
    let patterns: Vec<&[Sample]> = catalog.iter().collect();
    for (i, a) in patterns.iter().enumerate() {
        for (j, b) in patterns.iter().enumerate().skip(i + 1) {
            assert_ne!(a, b, "patterns {i} and {j} are equal");
        }
    }
}

/// Reads a big-endian `u32` at `offset`.
pub fn read_u32(bytes: &[u8], offset: usize) -> usize {
    assert!(offset + 4 <= bytes.len());
    let mut reader = unsafe { BigEndianReader::new(bytes.as_ptr()) };
    unsafe { reader.read_u32_at(offset as isize) as usize }
}

/// Reads a RIF file back into the grid it was encoded from.
///
/// Panics on malformed input.
pub fn decode_rif(bytes: &[u8], compressed: bool) -> PixelGrid {
    assert!(bytes.len() >= HEADER_SIZE);
    let has_alpha = bytes[HAS_ALPHA_OFFSET] != 0;
    let per_sample = 1 + has_alpha as usize;
    let width = read_u32(bytes, WIDTH_OFFSET);
    let height = read_u32(bytes, HEIGHT_OFFSET);

    let read_sample = |offset: usize| {
        let alpha = if has_alpha { bytes[offset + 1] } else { 255 };
        Sample::new(bytes[offset], alpha)
    };

    if !compressed {
        assert_eq!(bytes.len(), HEADER_SIZE + width * height * per_sample);
        let samples = (0..width * height)
            .map(|i| read_sample(HEADER_SIZE + i * per_sample))
            .collect();
        return PixelGrid::new(width, height, samples).unwrap();
    }

    let body = HEADER_SIZE;
    let columns = read_u32(bytes, body + COLUMNS_OFFSET);
    let rows = read_u32(bytes, body + ROWS_OFFSET);
    let size = read_u32(bytes, body + PATTERN_SIZE_OFFSET);
    let pattern_count = read_u32(bytes, body + PATTERN_COUNT_OFFSET);

    let palette = body + COMPRESSED_HEADER_SIZE;
    let pattern_bytes = size * size * per_sample;
    let cells = palette + pattern_count * pattern_bytes;
    assert_eq!(bytes.len(), cells + columns * rows * 4);

    PixelGrid::from_fn(width, height, |x, y| {
        let (x, y) = (x as usize, y as usize);
        let cell = (y / size) * columns + x / size;
        let pattern = read_u32(bytes, cells + cell * 4);
        assert!(pattern < pattern_count);

        let within = (y % size) * size + x % size;
        read_sample(palette + pattern * pattern_bytes + within * per_sample)
    })
    .unwrap()
}
