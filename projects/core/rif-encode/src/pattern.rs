//! Block partitioning of a [`PixelGrid`].
//!
//! A grid is split into square blocks of `size * size` samples, enumerated row-major.
//! Blocks on the right and bottom edges that extend past the grid are filled with
//! [`PADDING_SAMPLE`].

use rif_common::{PixelGrid, Sample, PADDING_SAMPLE};

/// Dimensions of the block grid covering a [`PixelGrid`] for a given pattern size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockGrid {
    /// Number of blocks per row, `ceil(width / pattern_size)`.
    pub columns: u32,
    /// Number of block rows, `ceil(height / pattern_size)`.
    pub rows: u32,
    /// Edge length of a block in samples.
    pub pattern_size: u32,
}

impl BlockGrid {
    /// Computes the block grid for `grid` split into `pattern_size` blocks.
    ///
    /// `pattern_size` must be non-zero.
    #[inline]
    pub fn new(grid: &PixelGrid, pattern_size: u32) -> Self {
        debug_assert!(pattern_size > 0);
        Self {
            columns: grid.width().div_ceil(pattern_size),
            rows: grid.height().div_ceil(pattern_size),
            pattern_size,
        }
    }

    /// Total number of blocks.
    #[inline(always)]
    pub fn block_count(&self) -> u64 {
        self.columns as u64 * self.rows as u64
    }

    /// Number of samples in a single block.
    #[inline(always)]
    pub fn samples_per_pattern(&self) -> usize {
        self.pattern_size as usize * self.pattern_size as usize
    }
}

/// Values derived from the samples of one pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PatternStats {
    /// Sum of `luminance + alpha` over all samples.
    ///
    /// Only a prefilter: equal patterns share a fingerprint, but different patterns may too.
    pub fingerprint: u64,
    /// Number of samples whose alpha is not `0`.
    pub opaque_count: u32,
}

impl PatternStats {
    /// Computes the stats of a sample sequence.
    #[inline]
    pub fn of(samples: &[Sample]) -> Self {
        samples.iter().fold(Self::default(), |mut stats, sample| {
            stats.fingerprint += sample.weight();
            stats.opaque_count += sample.is_visible() as u32;
            stats
        })
    }
}

/// Copies the block at (`column`, `row`) of the block grid into `out`, row-major.
///
/// `out` is cleared first and holds exactly `pattern_size * pattern_size` samples afterwards.
pub fn extract_pattern(
    grid: &PixelGrid,
    pattern_size: u32,
    column: u32,
    row: u32,
    out: &mut Vec<Sample>,
) -> PatternStats {
    out.clear();

    let size = pattern_size as usize;
    let origin_x = column as usize * size;
    let origin_y = row as usize * size;
    let width = grid.width() as usize;
    let height = grid.height() as usize;
    let visible_columns = width.saturating_sub(origin_x).min(size);

    for y in origin_y..origin_y + size {
        if y < height {
            let start = y * width + origin_x;
            out.extend_from_slice(&grid.samples()[start..start + visible_columns]);
            out.resize(out.len() + (size - visible_columns), PADDING_SAMPLE);
        } else {
            out.resize(out.len() + size, PADDING_SAMPLE);
        }
    }

    PatternStats::of(out)
}
