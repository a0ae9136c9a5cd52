//! Row-major grid of [`Sample`]s.
//!
//! A [`PixelGrid`] is built once per input image and is read-only afterwards.
//! Both dimensions are non-zero and fit in the 32-bit fields of the RIF header.

use crate::{luminance, GridError, Sample};

/// Width x height grid of luminance + alpha samples, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    has_alpha: bool,
    samples: Vec<Sample>,
}

impl PixelGrid {
    /// Creates a grid from row-major samples.
    ///
    /// # Errors
    ///
    /// - [`GridError::InvalidDimensions`] if either dimension is zero or exceeds [`u32::MAX`]
    /// - [`GridError::DataLengthMismatch`] if `samples.len() != width * height`
    pub fn new(width: usize, height: usize, samples: Vec<Sample>) -> Result<Self, GridError> {
        let (width, height, expected) = validate_dimensions(width, height)?;
        if samples.len() != expected {
            return Err(GridError::DataLengthMismatch {
                expected,
                actual: samples.len(),
            });
        }

        let has_alpha = samples.iter().any(|sample| sample.needs_alpha());
        Ok(Self {
            width,
            height,
            has_alpha,
            samples,
        })
    }

    /// Creates a grid from tightly packed RGBA8 pixels, converting each pixel to luminance.
    ///
    /// # Errors
    ///
    /// - [`GridError::InvalidDimensions`] if either dimension is zero or exceeds [`u32::MAX`]
    /// - [`GridError::DataLengthMismatch`] if `rgba.len() != width * height * 4`
    pub fn from_rgba8(width: usize, height: usize, rgba: &[u8]) -> Result<Self, GridError> {
        let (_, _, pixel_count) = validate_dimensions(width, height)?;
        let expected = pixel_count
            .checked_mul(4)
            .ok_or(GridError::InvalidDimensions {
                width: width as u64,
                height: height as u64,
            })?;
        if rgba.len() != expected {
            return Err(GridError::DataLengthMismatch {
                expected,
                actual: rgba.len(),
            });
        }

        let samples = rgba
            .chunks_exact(4)
            .map(|px| Sample::new(luminance(px[0], px[1], px[2]), px[3]))
            .collect();
        Self::new(width, height, samples)
    }

    /// Creates a grid by evaluating `f(x, y)` for every position, row by row.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Result<Self, GridError>
    where
        F: FnMut(u32, u32) -> Sample,
    {
        let (w, h, count) = validate_dimensions(width, height)?;
        let mut samples = Vec::with_capacity(count);
        for y in 0..h {
            for x in 0..w {
                samples.push(f(x, y));
            }
        }
        Self::new(width, height, samples)
    }

    /// Width in samples.
    #[inline(always)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in samples.
    #[inline(always)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `true` if any sample has an alpha other than `255`.
    #[inline(always)]
    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    /// All samples in row-major order.
    #[inline(always)]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Samples of row `y`.
    ///
    /// # Panics
    ///
    /// If `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[Sample] {
        let width = self.width as usize;
        let start = y as usize * width;
        &self.samples[start..start + width]
    }

    /// Iterates over the rows of the grid, top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Sample]> {
        self.samples.chunks_exact(self.width as usize)
    }

    /// Returns the sample at `(x, y)`, or [`None`] if the position lies outside the grid.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Sample> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.samples[y as usize * self.width as usize + x as usize])
    }
}

/// Checks the dimensions and returns them as `u32` alongside the sample count.
fn validate_dimensions(width: usize, height: usize) -> Result<(u32, u32, usize), GridError> {
    let invalid = || GridError::InvalidDimensions {
        width: width as u64,
        height: height as u64,
    };

    if width == 0 || height == 0 {
        return Err(invalid());
    }

    let w = u32::try_from(width).map_err(|_| invalid())?;
    let h = u32::try_from(height).map_err(|_| invalid())?;
    let count = width.checked_mul(height).ok_or_else(invalid)?;
    Ok((w, h, count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[rstest]
    #[case(0, 1)]
    #[case(1, 0)]
    #[case(0, 0)]
    fn rejects_empty_dimensions(#[case] width: usize, #[case] height: usize) {
        let result = PixelGrid::new(width, height, Vec::new());
        assert_eq!(
            result,
            Err(GridError::InvalidDimensions {
                width: width as u64,
                height: height as u64
            })
        );
    }

    #[rstest]
    #[cfg(target_pointer_width = "64")]
    fn rejects_dimensions_wider_than_header_field() {
        let width = u32::MAX as usize + 1;
        let result = PixelGrid::new(width, 1, Vec::new());
        assert!(matches!(result, Err(GridError::InvalidDimensions { .. })));
    }

    #[rstest]
    fn rejects_mismatched_sample_count() {
        let result = PixelGrid::new(2, 2, vec![Sample::opaque(0); 3]);
        assert_eq!(
            result,
            Err(GridError::DataLengthMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[rstest]
    fn rejects_mismatched_rgba_length() {
        let result = PixelGrid::from_rgba8(2, 1, &[0u8; 7]);
        assert_eq!(
            result,
            Err(GridError::DataLengthMismatch {
                expected: 8,
                actual: 7
            })
        );
    }

    #[rstest]
    fn opaque_grid_has_no_alpha() {
        let grid = solid_grid(3, 2, Sample::opaque(42));
        assert!(!grid.has_alpha());
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
    }

    #[rstest]
    #[case(254)]
    #[case(0)]
    fn single_translucent_sample_enables_alpha(#[case] alpha: u8) {
        let grid = PixelGrid::from_fn(4, 4, |x, y| {
            if (x, y) == (3, 3) {
                Sample::new(1, alpha)
            } else {
                Sample::opaque(1)
            }
        })
        .unwrap();
        assert!(grid.has_alpha());
    }

    #[rstest]
    fn converts_rgba_to_luminance() {
        let rgba = [
            255, 255, 255, 255, // white
            0, 0, 0, 128, // half transparent black
        ];
        let grid = PixelGrid::from_rgba8(2, 1, &rgba).unwrap();
        assert_eq!(
            grid.samples(),
            &[Sample::new(255, 255), Sample::new(0, 128)]
        );
        assert!(grid.has_alpha());
    }

    #[rstest]
    fn addresses_samples_row_major() {
        let grid = PixelGrid::from_fn(3, 2, |x, y| Sample::opaque((y * 3 + x) as u8)).unwrap();

        assert_eq!(grid.get(2, 1), Some(Sample::opaque(5)));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get(0, 2), None);
        assert_eq!(grid.row(1), &[Sample::opaque(3), Sample::opaque(4), Sample::opaque(5)]);
        assert_eq!(grid.rows().len(), 2);
    }
}
