//! Common test imports and utilities for rif-image tests
#![allow(unused_imports)]

pub use image::{Rgba, RgbaImage};
pub use rif_common::{PixelGrid, Sample};
pub use rstest::rstest;
pub use tempfile::tempdir;
