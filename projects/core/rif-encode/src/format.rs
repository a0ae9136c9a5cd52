//! RIF byte layout.
//!
//! All multi-byte integers are big-endian and unsigned.
//!
//! ```text
//! header      has_alpha: u8, width: u32, height: u32
//! raw body    width * height samples, row-major
//! compressed  columns: u32, rows: u32, pattern_size: u32, pattern_count: u32,
//!             pattern_count * pattern_size^2 samples (palette order, row-major within a pattern),
//!             columns * rows cells: u32 (row-major)
//! ```
//!
//! A sample is one luminance byte, followed by one alpha byte only when `has_alpha` is set.

use crate::catalog::TiledImage;
use endian_writer::{BigEndianWriter, EndianWriter};
use rif_common::{PixelGrid, Sample};
use thiserror::Error;

/// Offset of the `has_alpha` flag.
pub const HAS_ALPHA_OFFSET: usize = 0;
/// Offset of the image width.
pub const WIDTH_OFFSET: usize = 1;
/// Offset of the image height.
pub const HEIGHT_OFFSET: usize = 5;
/// Size of the header common to both bodies.
pub const HEADER_SIZE: usize = 9;

/// Offset of the block grid column count, relative to the start of the compressed body.
pub const COLUMNS_OFFSET: usize = 0;
/// Offset of the block grid row count, relative to the start of the compressed body.
pub const ROWS_OFFSET: usize = 4;
/// Offset of the pattern size, relative to the start of the compressed body.
pub const PATTERN_SIZE_OFFSET: usize = 8;
/// Offset of the pattern count, relative to the start of the compressed body.
pub const PATTERN_COUNT_OFFSET: usize = 12;
/// Size of the fixed part of the compressed body.
pub const COMPRESSED_HEADER_SIZE: usize = 16;

/// Size of one serialized cell.
pub const CELL_SIZE: usize = 4;

/// An error that happened while serializing a [`RifImage`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The output buffer cannot hold the encoded image.
    #[error("Output buffer too small: required {required} bytes, got {actual} bytes")]
    OutputBufferTooSmall {
        /// Bytes needed.
        required: usize,
        /// Bytes available.
        actual: usize,
    },
}

/// The fields every RIF file starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RifHeader {
    /// Whether each sample carries an alpha byte.
    pub has_alpha: bool,
    /// Image width in samples.
    pub width: u32,
    /// Image height in samples.
    pub height: u32,
}

impl RifHeader {
    /// Takes the header fields from a grid.
    pub fn of(grid: &PixelGrid) -> Self {
        Self {
            has_alpha: grid.has_alpha(),
            width: grid.width(),
            height: grid.height(),
        }
    }

    /// Bytes per serialized sample: `2` with alpha, `1` without.
    #[inline(always)]
    pub fn bytes_per_sample(&self) -> usize {
        1 + self.has_alpha as usize
    }
}

/// What follows the header.
#[derive(Debug, Clone, Copy)]
pub enum RifBody<'a> {
    /// Every sample of the grid, row-major.
    Raw(&'a PixelGrid),
    /// Block grid, palette and cells.
    Compressed(&'a TiledImage),
}

/// An image ready to be serialized.
#[derive(Debug, Clone, Copy)]
pub struct RifImage<'a> {
    header: RifHeader,
    body: RifBody<'a>,
}

impl<'a> RifImage<'a> {
    /// An image storing every sample of `grid` directly.
    pub fn uncompressed(grid: &'a PixelGrid) -> Self {
        Self {
            header: RifHeader::of(grid),
            body: RifBody::Raw(grid),
        }
    }

    /// An image storing `tiled`, which must have been built from `grid`.
    pub fn compressed(grid: &PixelGrid, tiled: &'a TiledImage) -> Self {
        Self {
            header: RifHeader::of(grid),
            body: RifBody::Compressed(tiled),
        }
    }

    /// The header fields.
    #[inline(always)]
    pub fn header(&self) -> RifHeader {
        self.header
    }

    /// The body.
    #[inline(always)]
    pub fn body(&self) -> RifBody<'a> {
        self.body
    }

    /// Returns `true` if the body is block-compressed.
    #[inline(always)]
    pub fn is_compressed(&self) -> bool {
        matches!(self.body, RifBody::Compressed(_))
    }

    /// Exact number of bytes [`Self::write_to`] writes.
    pub fn encoded_len(&self) -> usize {
        let per_sample = self.header.bytes_per_sample();
        HEADER_SIZE
            + match self.body {
                RifBody::Raw(grid) => grid.samples().len() * per_sample,
                RifBody::Compressed(tiled) => {
                    COMPRESSED_HEADER_SIZE
                        + tiled.catalog.as_samples().len() * per_sample
                        + tiled.cells.len() * CELL_SIZE
                }
            }
    }

    /// Serializes the image into the start of `out`.
    ///
    /// # Returns
    ///
    /// Number of bytes written, always [`Self::encoded_len`].
    ///
    /// # Errors
    ///
    /// [`EncodeError::OutputBufferTooSmall`] if `out` is shorter than [`Self::encoded_len`].
    /// Nothing is written in that case.
    pub fn write_to(&self, out: &mut [u8]) -> Result<usize, EncodeError> {
        let required = self.encoded_len();
        if out.len() < required {
            return Err(EncodeError::OutputBufferTooSmall {
                required,
                actual: out.len(),
            });
        }

        let out = &mut out[..required];
        let has_alpha = self.header.has_alpha;

        // Byte fields first, then all big-endian words through a single writer.
        out[HAS_ALPHA_OFFSET] = has_alpha as u8;
        match self.body {
            RifBody::Raw(grid) => {
                write_samples(&mut out[HEADER_SIZE..], grid.samples(), has_alpha);
            }
            RifBody::Compressed(tiled) => {
                let palette_start = HEADER_SIZE + COMPRESSED_HEADER_SIZE;
                write_samples(
                    &mut out[palette_start..],
                    tiled.catalog.as_samples(),
                    has_alpha,
                );
            }
        }

        // SAFETY: `out` is exactly `encoded_len` bytes long, which covers every offset below.
        let mut writer = unsafe { BigEndianWriter::new(out.as_mut_ptr()) };
        unsafe {
            writer.write_u32_at(self.header.width, WIDTH_OFFSET as isize);
            writer.write_u32_at(self.header.height, HEIGHT_OFFSET as isize);
        }

        if let RifBody::Compressed(tiled) = self.body {
            let body = HEADER_SIZE;
            let cells_start = body
                + COMPRESSED_HEADER_SIZE
                + tiled.catalog.as_samples().len() * self.header.bytes_per_sample();

            unsafe {
                writer.write_u32_at(tiled.block_grid.columns, (body + COLUMNS_OFFSET) as isize);
                writer.write_u32_at(tiled.block_grid.rows, (body + ROWS_OFFSET) as isize);
                writer.write_u32_at(
                    tiled.block_grid.pattern_size,
                    (body + PATTERN_SIZE_OFFSET) as isize,
                );
                writer.write_u32_at(
                    tiled.catalog.len() as u32,
                    (body + PATTERN_COUNT_OFFSET) as isize,
                );

                for (i, &cell) in tiled.cells.iter().enumerate() {
                    writer.write_u32_at(cell, (cells_start + i * CELL_SIZE) as isize);
                }
            }
        }

        Ok(required)
    }

    /// Serializes the image into a new buffer of [`Self::encoded_len`] bytes.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.encoded_len()];
        // Sized by encoded_len, so this cannot fail.
        let _ = self.write_to(&mut out);
        out
    }
}

/// Writes samples back to back, with or without their alpha byte.
fn write_samples(out: &mut [u8], samples: &[Sample], has_alpha: bool) {
    if has_alpha {
        for (dst, sample) in out.chunks_exact_mut(2).zip(samples) {
            dst[0] = sample.luminance;
            dst[1] = sample.alpha;
        }
    } else {
        for (dst, sample) in out.iter_mut().zip(samples) {
            *dst = sample.luminance;
        }
    }
}
