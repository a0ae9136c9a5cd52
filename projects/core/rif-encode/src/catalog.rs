//! Content-addressed palette of patterns.
//!
//! A [`PatternCatalog`] holds content-distinct patterns in insertion order; the position
//! of a pattern is the palette index stored in a cell. Lookups go through the pattern
//! fingerprint first and always confirm a hit with a full sample comparison, so two
//! patterns with colliding fingerprints are never merged.

use crate::pattern::{extract_pattern, BlockGrid, PatternStats};
use ahash::AHashMap;
use rif_common::{PixelGrid, Sample};
use thiserror::Error;

/// An error that happened while tiling a grid into a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TilingError {
    /// The pattern size was zero.
    #[error("Invalid pattern size: {0} (must be at least 1)")]
    InvalidPatternSize(u32),

    /// A single pattern would hold more samples than can be counted or allocated.
    #[error("Pattern size too large: {pattern_size}")]
    PatternTooLarge {
        /// The rejected pattern size.
        pattern_size: u32,
    },

    /// The block grid has more blocks than a 32-bit cell index can address.
    #[error("Too many blocks: {count} (maximum is 4294967295)")]
    TooManyBlocks {
        /// Number of blocks required.
        count: u64,
    },
}

/// Result of looking a pattern up with [`PatternCatalog::find_or_insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Palette index of the pattern.
    pub index: u32,
    /// `true` if the pattern was not present and has just been appended.
    pub inserted: bool,
}

/// Ordered set of content-distinct patterns of one size.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    pattern_size: u32,
    /// All patterns back to back, `pattern_size * pattern_size` samples each.
    samples: Vec<Sample>,
    stats: Vec<PatternStats>,
    /// Fingerprint -> palette indices with that fingerprint, in insertion order.
    buckets: AHashMap<u64, Vec<u32>>,
}

impl PatternCatalog {
    /// Creates an empty catalog for patterns of `pattern_size * pattern_size` samples.
    pub fn new(pattern_size: u32) -> Self {
        Self {
            pattern_size,
            samples: Vec::new(),
            stats: Vec::new(),
            buckets: AHashMap::new(),
        }
    }

    /// Edge length of the patterns in this catalog.
    #[inline(always)]
    pub fn pattern_size(&self) -> u32 {
        self.pattern_size
    }

    /// Number of samples in a single pattern.
    #[inline(always)]
    pub fn samples_per_pattern(&self) -> usize {
        self.pattern_size as usize * self.pattern_size as usize
    }

    /// Number of patterns.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    /// Returns `true` if the catalog holds no patterns.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Samples of the pattern at `index`, or [`None`] if out of range.
    pub fn get(&self, index: u32) -> Option<&[Sample]> {
        let per = self.samples_per_pattern();
        let start = (index as usize).checked_mul(per)?;
        self.samples.get(start..start + per)
    }

    /// Stats of the pattern at `index`, or [`None`] if out of range.
    pub fn stats(&self, index: u32) -> Option<PatternStats> {
        self.stats.get(index as usize).copied()
    }

    /// Iterates over the patterns in palette order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[Sample]> {
        self.samples.chunks_exact(self.samples_per_pattern().max(1))
    }

    /// All pattern samples back to back, in palette order.
    #[inline(always)]
    pub fn as_samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Finds the palette index of a pattern with exactly these samples.
    pub fn find(&self, pattern: &[Sample], stats: PatternStats) -> Option<u32> {
        let per = self.samples_per_pattern();
        self.buckets
            .get(&stats.fingerprint)?
            .iter()
            .copied()
            .find(|&index| {
                let start = index as usize * per;
                &self.samples[start..start + per] == pattern
            })
    }

    /// Returns the palette index of `pattern`, appending it if no equal pattern exists.
    ///
    /// `pattern` must hold exactly [`Self::samples_per_pattern`] samples and `stats`
    /// must be [`PatternStats::of`] those samples.
    pub fn find_or_insert(&mut self, pattern: &[Sample], stats: PatternStats) -> CatalogEntry {
        debug_assert_eq!(pattern.len(), self.samples_per_pattern());
        debug_assert_eq!(stats, PatternStats::of(pattern));

        if let Some(index) = self.find(pattern, stats) {
            return CatalogEntry {
                index,
                inserted: false,
            };
        }

        // Callers bound the block count to u32, and there are never more patterns than blocks.
        let index = self.stats.len() as u32;
        self.samples.extend_from_slice(pattern);
        self.stats.push(stats);
        self.buckets.entry(stats.fingerprint).or_default().push(index);
        CatalogEntry {
            index,
            inserted: true,
        }
    }
}

/// A grid split into blocks: the deduplicated palette plus one palette index per block.
#[derive(Debug, Clone)]
pub struct TiledImage {
    /// Dimensions of the block grid.
    pub block_grid: BlockGrid,
    /// Content-distinct patterns, in first-seen order.
    pub catalog: PatternCatalog,
    /// Palette index of each block, row-major over the block grid.
    pub cells: Vec<u32>,
}

/// Checks that `pattern_size` is usable for `grid` and returns the block grid.
pub(crate) fn block_grid_for(grid: &PixelGrid, pattern_size: u32) -> Result<BlockGrid, TilingError> {
    if pattern_size == 0 {
        return Err(TilingError::InvalidPatternSize(pattern_size));
    }

    // Per-pattern counters are u32, and the scratch block must be a valid allocation.
    let max_samples = (u32::MAX as usize).min(isize::MAX as usize / core::mem::size_of::<Sample>());
    let fits = (pattern_size as usize)
        .checked_mul(pattern_size as usize)
        .is_some_and(|samples| samples <= max_samples);
    if !fits {
        return Err(TilingError::PatternTooLarge { pattern_size });
    }

    let block_grid = BlockGrid::new(grid, pattern_size);
    let count = block_grid.block_count();
    if count > u32::MAX as u64 {
        return Err(TilingError::TooManyBlocks { count });
    }

    Ok(block_grid)
}

/// Allocates the buffer one block is extracted into.
pub(crate) fn pattern_scratch(block_grid: &BlockGrid) -> Result<Vec<Sample>, TilingError> {
    let mut scratch = Vec::new();
    scratch
        .try_reserve_exact(block_grid.samples_per_pattern())
        .map_err(|_| TilingError::PatternTooLarge {
            pattern_size: block_grid.pattern_size,
        })?;
    Ok(scratch)
}

/// Splits `grid` into `pattern_size` blocks and deduplicates them into a catalog.
///
/// Blocks are visited row-major; each block reuses the index of an equal earlier block
/// or appends a new pattern. The result is fully determined by the grid and size.
///
/// # Errors
///
/// - [`TilingError::InvalidPatternSize`] if `pattern_size` is `0`
/// - [`TilingError::PatternTooLarge`] if one block cannot be held in memory
/// - [`TilingError::TooManyBlocks`] if the block grid needs more than [`u32::MAX`] cells
pub fn build_pattern_catalog(
    grid: &PixelGrid,
    pattern_size: u32,
) -> Result<TiledImage, TilingError> {
    let block_grid = block_grid_for(grid, pattern_size)?;

    let mut catalog = PatternCatalog::new(pattern_size);
    let mut cells = Vec::with_capacity(block_grid.block_count() as usize);
    let mut scratch = pattern_scratch(&block_grid)?;

    for row in 0..block_grid.rows {
        for column in 0..block_grid.columns {
            let stats = extract_pattern(grid, pattern_size, column, row, &mut scratch);
            cells.push(catalog.find_or_insert(&scratch, stats).index);
        }
    }

    Ok(TiledImage {
        block_grid,
        catalog,
        cells,
    })
}
