//! File output for RIF encoding.
//!
//! The encoded length is known before serialization starts, so the output file is created
//! at its final size, memory-mapped with `lightweight-mmap` and written in place.

mod encode_to_file;
mod error;

pub use encode_to_file::*;
pub use error::*;
