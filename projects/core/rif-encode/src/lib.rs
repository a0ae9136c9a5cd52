#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![warn(missing_docs)]

pub mod catalog;
pub mod determine_optimal_pattern_size;
pub mod format;
pub mod pattern;

pub use catalog::{build_pattern_catalog, CatalogEntry, PatternCatalog, TiledImage, TilingError};
pub use determine_optimal_pattern_size::{
    determine_optimal_pattern_size, estimate_pattern_size, AlphaCostModel,
    DeterminePatternSizeError, PatternSearchOptions, PatternSizeSelection,
};
pub use format::{EncodeError, RifBody, RifHeader, RifImage};
pub use pattern::{extract_pattern, BlockGrid, PatternStats};

/// Common test prelude for avoiding duplicate imports in test modules
#[cfg(test)]
pub(crate) mod test_prelude;
