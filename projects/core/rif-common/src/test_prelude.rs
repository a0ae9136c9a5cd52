//! Common test imports and utilities for rif-common tests
//!
//! This module provides a common prelude for test modules to avoid
//! duplicate imports across the codebase.
#![allow(unused_imports)]

pub use rstest::rstest;

use crate::{PixelGrid, Sample};

/// Creates a grid where every sample is `sample`.
pub fn solid_grid(width: usize, height: usize, sample: Sample) -> PixelGrid {
    PixelGrid::new(width, height, vec![sample; width * height]).unwrap()
}
