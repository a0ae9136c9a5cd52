#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![warn(missing_docs)]

pub mod builder;
pub mod error;

#[cfg(feature = "file-io")]
pub mod file_io;

pub use builder::{EncodedRif, PreparedRif, RifEncodeBuilder};
pub use error::{RifError, RifResult};

// Types callers need to configure the encoder and inspect its results.
pub use rif_encode::{AlphaCostModel, PatternSearchOptions, PatternSizeSelection};

/// Common test prelude for avoiding duplicate imports in test modules
#[cfg(test)]
pub(crate) mod test_prelude;
