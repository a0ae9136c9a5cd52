//! Decoding image files into [`PixelGrid`]s.

use crate::ImageError;
use image::RgbaImage;
use rif_common::PixelGrid;
use std::path::Path;

/// File extensions accepted by [`is_supported_image`], lowercase and without the dot.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Returns `true` if `path` has a PNG or JPEG extension, ignoring case.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// Decodes the image at `path` and converts every pixel to luminance + alpha.
///
/// Any colour type the `image` crate can decode is first expanded to 8-bit RGBA.
///
/// # Errors
///
/// - [`ImageError::Image`] if the file cannot be opened or decoded
/// - [`ImageError::Grid`] if the image has a zero dimension
pub fn load_pixel_grid(path: &Path) -> Result<PixelGrid, ImageError> {
    let rgba = image::open(path)?.to_rgba8();
    pixel_grid_from_rgba(&rgba)
}

/// Converts an RGBA image to a [`PixelGrid`].
pub fn pixel_grid_from_rgba(image: &RgbaImage) -> Result<PixelGrid, ImageError> {
    Ok(PixelGrid::from_rgba8(
        image.width() as usize,
        image.height() as usize,
        image.as_raw(),
    )?)
}
