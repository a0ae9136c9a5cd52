//! Optimal Pattern Size Determination
//!
//! This module picks the block ("pattern") size that gives the smallest encoded RIF file
//! for a given [`PixelGrid`].
//!
//! ## Overview
//!
//! A compressed RIF file stores a palette of distinct `s * s` blocks plus one 4-byte
//! palette index per block. Large blocks give few indices but deduplicate poorly, small
//! blocks deduplicate well but need many indices. The best trade-off depends on the image,
//! so candidate sizes are tested by brute force:
//!
//! 1. Split the grid into blocks of the candidate size.
//! 2. Deduplicate the blocks into a palette, exactly as [`crate::build_pattern_catalog`] does.
//! 3. Add up the estimated bytes for every new palette entry and every cell.
//!
//! The candidate with the smallest estimate wins.
//!
//! ## Candidate Order
//!
//! With `effective_max = clamp(max_size, min_size, width)`, a counter `k` runs from
//! `min_size` to `effective_max` in steps of `step`, and the candidate tested is
//! `effective_max - (k - min_size)`. Sizes are therefore tested from largest to smallest,
//! and when `effective_max - min_size` is not a multiple of `step` the smallest tested
//! size is above `min_size`.
//!
//! ## Pruning
//!
//! Once a best estimate exists, a candidate is abandoned as soon as its running estimate
//! exceeds it. The running estimate only ever grows, so an abandoned candidate could not
//! have won; pruning never changes the result, which
//! [`PatternSearchOptions::prune`] can be switched off to verify.
//!
//! ## Ties
//!
//! A finished candidate replaces the best one when its estimate is less than *or equal to*
//! the best, so among equal estimates the last tested (smallest) size wins.

use crate::catalog::{block_grid_for, pattern_scratch, PatternCatalog, TilingError};
use crate::pattern::extract_pattern;
use core::str::FromStr;
use rif_common::PixelGrid;
use std::time::Instant;
use thiserror::Error;
use tracing::debug;

/// Bytes used by a single cell (palette index).
pub const CELL_SIZE_BYTES: u64 = 4;

/// An error that happened during pattern size determination.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeterminePatternSizeError {
    /// The search bounds are unusable: a zero size or step, or `min_size > max_size`.
    #[error("Invalid pattern size search bounds: min {min_size}, max {max_size}, step {step} (all must be at least 1 and min must not exceed max)")]
    InvalidBounds {
        /// Smallest size requested.
        min_size: u32,
        /// Largest size requested.
        max_size: u32,
        /// Step between tested sizes.
        step: u32,
    },

    /// No candidate size could be evaluated.
    #[error("No eligible pattern size found")]
    NoEligibleCandidate,

    /// A candidate size could not be tiled.
    #[error(transparent)]
    Tiling(#[from] TilingError),
}

/// How the alpha plane of a new palette entry is costed during the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlphaCostModel {
    /// One alpha byte per sample with alpha other than `0`.
    ///
    /// The serializer writes an alpha byte for every sample, so this undercounts patterns
    /// with transparent samples and may favour a size that is not the smallest real output.
    #[default]
    OpaqueSamples,

    /// One alpha byte per sample, matching what the serializer writes.
    EverySample,
}

impl FromStr for AlphaCostModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "opaque" => Ok(Self::OpaqueSamples),
            "every" => Ok(Self::EverySample),
            _ => Err(format!(
                "Unknown alpha cost model: {s}. Valid options: opaque, every"
            )),
        }
    }
}

/// The options for [`determine_optimal_pattern_size`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternSearchOptions {
    /// Smallest pattern size to consider.
    pub min_size: u32,
    /// Largest pattern size to consider. Clamped to the grid width, but never below `min_size`.
    pub max_size: u32,
    /// Distance between tested sizes.
    pub step: u32,
    /// Cost of the alpha plane of new palette entries. Ignored for grids without alpha.
    pub alpha_cost: AlphaCostModel,
    /// Abandon candidates as soon as they can no longer win.
    ///
    /// Disabling this evaluates every candidate completely; the chosen size is the same.
    pub prune: bool,
}

impl Default for PatternSearchOptions {
    fn default() -> Self {
        Self {
            min_size: 8,
            max_size: 8,
            step: 2,
            alpha_cost: AlphaCostModel::default(),
            prune: true,
        }
    }
}

impl PatternSearchOptions {
    /// Checks the search bounds.
    ///
    /// # Errors
    ///
    /// [`DeterminePatternSizeError::InvalidBounds`] if any of `min_size`, `max_size` or `step`
    /// is zero, or `min_size > max_size`.
    pub fn validate(&self) -> Result<(), DeterminePatternSizeError> {
        if self.min_size == 0 || self.max_size == 0 || self.step == 0 || self.min_size > self.max_size
        {
            return Err(DeterminePatternSizeError::InvalidBounds {
                min_size: self.min_size,
                max_size: self.max_size,
                step: self.step,
            });
        }
        Ok(())
    }

    /// Largest size actually tested for a grid of `width` samples:
    /// `max_size` clamped to `width`, but never below `min_size`.
    #[inline]
    pub fn effective_max(&self, width: u32) -> u32 {
        self.max_size.min(width).max(self.min_size)
    }

    /// Candidate sizes in the order they are tested.
    ///
    /// Assumes the options have been [validated](Self::validate).
    pub fn candidate_sizes(&self, width: u32) -> impl Iterator<Item = u32> {
        let min_size = self.min_size;
        let effective_max = self.effective_max(width);
        (min_size..=effective_max)
            .step_by(self.step.max(1) as usize)
            .map(move |k| effective_max - (k - min_size))
    }
}

/// The outcome of [`determine_optimal_pattern_size`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternSizeSelection {
    /// The chosen pattern size.
    pub pattern_size: u32,
    /// Number of distinct patterns at that size.
    pub pattern_count: u32,
    /// Estimated size of the palette and cells in bytes. Informational only.
    pub estimated_size: u64,
}

/// Determines the pattern size with the smallest estimated encoded size.
///
/// # Parameters
///
/// - `grid`: The image to encode
/// - `options`: Search bounds and estimation settings
///
/// # Returns
///
/// The [`PatternSizeSelection`] for the winning size.
///
/// # Errors
///
/// - [`DeterminePatternSizeError::InvalidBounds`] if the options fail [`PatternSearchOptions::validate`];
///   this is reported before any candidate is evaluated
/// - [`DeterminePatternSizeError::Tiling`] if a candidate needs more blocks than cells can address,
///   or a single block of that size cannot be held in memory
/// - [`DeterminePatternSizeError::NoEligibleCandidate`] if no candidate finished
pub fn determine_optimal_pattern_size(
    grid: &PixelGrid,
    options: &PatternSearchOptions,
) -> Result<PatternSizeSelection, DeterminePatternSizeError> {
    options.validate()?;
    if grid.width() == 0 {
        return Err(DeterminePatternSizeError::NoEligibleCandidate);
    }

    let started = Instant::now();
    let mut best: Option<PatternSizeSelection> = None;

    for pattern_size in options.candidate_sizes(grid.width()) {
        let budget = if options.prune {
            best.map(|b| b.estimated_size)
        } else {
            None
        };

        let Some(candidate) = estimate_pattern_size(grid, pattern_size, options.alpha_cost, budget)?
        else {
            debug!(pattern_size, "pruned, cannot beat current best");
            continue;
        };

        debug!(
            pattern_size,
            pattern_count = candidate.pattern_count,
            estimated_size = candidate.estimated_size,
            elapsed = ?started.elapsed(),
            "evaluated candidate"
        );

        if best.map_or(true, |b| candidate.estimated_size <= b.estimated_size) {
            best = Some(candidate);
        }
    }

    let best = best.ok_or(DeterminePatternSizeError::NoEligibleCandidate)?;
    debug!(
        pattern_size = best.pattern_size,
        pattern_count = best.pattern_count,
        estimated_size = best.estimated_size,
        "selected pattern size"
    );
    Ok(best)
}

/// Estimates the encoded size of the palette and cells for one pattern size.
///
/// Returns `Ok(None)` if the running estimate exceeds `budget` before all blocks
/// have been visited.
pub fn estimate_pattern_size(
    grid: &PixelGrid,
    pattern_size: u32,
    alpha_cost: AlphaCostModel,
    budget: Option<u64>,
) -> Result<Option<PatternSizeSelection>, TilingError> {
    let block_grid = block_grid_for(grid, pattern_size)?;
    let samples_per_pattern = block_grid.samples_per_pattern() as u64;
    let has_alpha = grid.has_alpha();

    let mut catalog = PatternCatalog::new(pattern_size);
    let mut scratch = pattern_scratch(&block_grid)?;
    let mut estimate: u64 = 0;
    let started = Instant::now();

    for row in 0..block_grid.rows {
        debug!(
            pattern_size,
            y = row as u64 * pattern_size as u64,
            elapsed = ?started.elapsed(),
            "scanning block row"
        );

        for column in 0..block_grid.columns {
            let stats = extract_pattern(grid, pattern_size, column, row, &mut scratch);
            let entry = catalog.find_or_insert(&scratch, stats);

            if entry.inserted {
                estimate += samples_per_pattern;
                if has_alpha {
                    estimate += match alpha_cost {
                        AlphaCostModel::OpaqueSamples => stats.opaque_count as u64,
                        AlphaCostModel::EverySample => samples_per_pattern,
                    };
                }
            }
            estimate += CELL_SIZE_BYTES;

            if budget.is_some_and(|limit| estimate > limit) {
                return Ok(None);
            }
        }
    }

    Ok(Some(PatternSizeSelection {
        pattern_size,
        pattern_count: catalog.len() as u32,
        estimated_size: estimate,
    }))
}
