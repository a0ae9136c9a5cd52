//! Builder for RIF encoding.

use crate::{RifError, RifResult};
use rif_common::PixelGrid;
use rif_encode::{
    build_pattern_catalog, determine_optimal_pattern_size, AlphaCostModel, PatternSearchOptions,
    PatternSizeSelection, RifImage, TiledImage,
};
use tracing::{debug, info};

/// Configures how a [`PixelGrid`] is encoded.
///
/// Every setting is optional; unset settings use the defaults listed on each setter.
///
/// # Examples
///
/// ```
/// use rif_api::RifEncodeBuilder;
/// use rif_common::{PixelGrid, Sample};
///
/// let grid = PixelGrid::from_fn(4, 4, |_, _| Sample::opaque(10)).unwrap();
/// let encoded = RifEncodeBuilder::new().encode(&grid).unwrap();
///
/// // Uncompressed: 9 byte header plus one luminance byte per sample.
/// assert_eq!(encoded.bytes.len(), 9 + 16);
/// assert!(encoded.selection.is_none());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RifEncodeBuilder {
    compress: Option<bool>,
    pattern_min: Option<u32>,
    pattern_max: Option<u32>,
    pattern_step: Option<u32>,
    alpha_cost: Option<AlphaCostModel>,
    prune: Option<bool>,
}

impl RifEncodeBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the image as deduplicated blocks instead of raw samples.
    ///
    /// Default: `false`.
    pub fn compress(mut self, compress: bool) -> Self {
        self.compress = Some(compress);
        self
    }

    /// Smallest pattern size to try when compressing.
    ///
    /// Default: `8`.
    pub fn pattern_min(mut self, size: u32) -> Self {
        self.pattern_min = Some(size);
        self
    }

    /// Largest pattern size to try when compressing. Clamped to the image width.
    ///
    /// Default: `8`.
    pub fn pattern_max(mut self, size: u32) -> Self {
        self.pattern_max = Some(size);
        self
    }

    /// Distance between tried pattern sizes.
    ///
    /// Default: `2`.
    pub fn pattern_step(mut self, step: u32) -> Self {
        self.pattern_step = Some(step);
        self
    }

    /// How the alpha plane is costed while comparing pattern sizes.
    ///
    /// Default: [`AlphaCostModel::OpaqueSamples`].
    pub fn alpha_cost(mut self, alpha_cost: AlphaCostModel) -> Self {
        self.alpha_cost = Some(alpha_cost);
        self
    }

    /// Stop evaluating a pattern size once it can no longer win.
    ///
    /// Turning this off only makes the search slower; the chosen size is the same.
    ///
    /// Default: `true`.
    pub fn prune(mut self, prune: bool) -> Self {
        self.prune = Some(prune);
        self
    }

    /// Whether the builder produces compressed output.
    pub fn is_compressed(&self) -> bool {
        self.compress.unwrap_or(false)
    }

    /// The pattern size search options this builder resolves to.
    pub fn search_options(&self) -> PatternSearchOptions {
        let defaults = PatternSearchOptions::default();
        PatternSearchOptions {
            min_size: self.pattern_min.unwrap_or(defaults.min_size),
            max_size: self.pattern_max.unwrap_or(defaults.max_size),
            step: self.pattern_step.unwrap_or(defaults.step),
            alpha_cost: self.alpha_cost.unwrap_or(defaults.alpha_cost),
            prune: self.prune.unwrap_or(defaults.prune),
        }
    }

    /// Checks the settings without looking at any image.
    ///
    /// Only compressed output uses the pattern size search, so raw output always passes.
    ///
    /// # Errors
    ///
    /// [`RifError::InvalidSizeSearchBounds`] if compressing with unusable search bounds.
    pub fn validate(&self) -> RifResult<()> {
        if self.is_compressed() {
            self.search_options().validate()?;
        }
        Ok(())
    }

    /// Does all work short of serialization: chooses the pattern size and tiles the grid
    /// when compressing.
    ///
    /// The returned [`PreparedRif`] knows its exact encoded length, so the caller can
    /// allocate or map the output before writing.
    ///
    /// # Errors
    ///
    /// - [`RifError::InvalidSizeSearchBounds`] if compressing with unusable search bounds
    /// - [`RifError::NoEligiblePatternSize`] if no pattern size could be evaluated
    /// - [`RifError::Tiling`] if the grid cannot be tiled at the chosen size
    pub fn prepare<'a>(&self, grid: &'a PixelGrid) -> RifResult<PreparedRif<'a>> {
        if !self.is_compressed() {
            debug!(
                width = grid.width(),
                height = grid.height(),
                has_alpha = grid.has_alpha(),
                "encoding raw samples"
            );
            return Ok(PreparedRif {
                grid,
                selection: None,
                tiled: None,
            });
        }

        let selection = determine_optimal_pattern_size(grid, &self.search_options())?;
        info!(
            pattern_size = selection.pattern_size,
            pattern_count = selection.pattern_count,
            estimated_size = selection.estimated_size,
            "chose pattern size"
        );

        let tiled = build_pattern_catalog(grid, selection.pattern_size)?;
        Ok(PreparedRif {
            grid,
            selection: Some(selection),
            tiled: Some(tiled),
        })
    }

    /// Encodes `grid` into a new buffer.
    ///
    /// # Errors
    ///
    /// See [`Self::prepare`].
    pub fn encode(&self, grid: &PixelGrid) -> RifResult<EncodedRif> {
        let prepared = self.prepare(grid)?;
        Ok(EncodedRif {
            bytes: prepared.image().to_vec(),
            selection: prepared.selection,
        })
    }
}

/// An encoding whose pattern size and catalog have been decided, ready to serialize.
#[derive(Debug, Clone)]
pub struct PreparedRif<'a> {
    grid: &'a PixelGrid,
    selection: Option<PatternSizeSelection>,
    tiled: Option<TiledImage>,
}

impl PreparedRif<'_> {
    /// The pattern size selection, or [`None`] for uncompressed output.
    pub fn selection(&self) -> Option<PatternSizeSelection> {
        self.selection
    }

    /// The tiled grid, or [`None`] for uncompressed output.
    pub fn tiled(&self) -> Option<&TiledImage> {
        self.tiled.as_ref()
    }

    /// The serializable image.
    pub fn image(&self) -> RifImage<'_> {
        match &self.tiled {
            Some(tiled) => RifImage::compressed(self.grid, tiled),
            None => RifImage::uncompressed(self.grid),
        }
    }

    /// Exact size of the encoded file in bytes.
    pub fn encoded_len(&self) -> usize {
        self.image().encoded_len()
    }

    /// Serializes into the start of `output`.
    ///
    /// # Errors
    ///
    /// [`RifError::Encode`] if `output` is shorter than [`Self::encoded_len`].
    pub fn write_to(&self, output: &mut [u8]) -> Result<usize, RifError> {
        Ok(self.image().write_to(output)?)
    }
}

/// The result of [`RifEncodeBuilder::encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedRif {
    /// The complete RIF file.
    pub bytes: Vec<u8>,
    /// The pattern size selection, or [`None`] for uncompressed output.
    pub selection: Option<PatternSizeSelection>,
}
