//! Grayscale PNG previews of [`PixelGrid`]s.

use crate::ImageError;
use image::{Rgba, RgbaImage};
use rif_common::PixelGrid;
use std::path::{Path, PathBuf};

/// Returns `<dir>/<stem>-grayscale.png`, the preview path for an input named `<stem>.<ext>`.
pub fn preview_path_for(input: &Path, dir: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    dir.join(format!("{stem}-grayscale.png"))
}

/// Writes `grid` to `path` as an RGBA image with `(l, l, l, alpha)` per pixel.
///
/// The format follows the extension of `path`; use `.png` to keep the alpha channel.
///
/// # Errors
///
/// [`ImageError::Image`] if the file cannot be encoded or written.
pub fn save_grayscale_preview(grid: &PixelGrid, path: &Path) -> Result<(), ImageError> {
    let preview = RgbaImage::from_fn(grid.width(), grid.height(), |x, y| {
        let sample = grid.get(x, y).unwrap_or_default();
        let l = sample.luminance;
        Rgba([l, l, l, sample.alpha])
    });
    preview.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load_pixel_grid;
    use crate::test_prelude::*;

    #[rstest]
    #[case("dir/photo.jpeg", "out", "out/photo-grayscale.png")]
    #[case("sprite.png", "", "sprite-grayscale.png")]
    #[case("archive.tar.png", "out", "out/archive.tar-grayscale.png")]
    fn builds_preview_path(#[case] input: &str, #[case] dir: &str, #[case] expected: &str) {
        assert_eq!(
            preview_path_for(Path::new(input), Path::new(dir)),
            PathBuf::from(expected)
        );
    }

    #[rstest]
    fn preview_round_trips_through_loader() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preview.png");
        let grid = PixelGrid::from_fn(4, 3, |x, y| Sample::new((x * 60 + y) as u8, (y * 100) as u8))
            .unwrap();

        save_grayscale_preview(&grid, &path).unwrap();

        // Gray pixels keep their luminance through the weighted sum.
        assert_eq!(load_pixel_grid(&path).unwrap(), grid);
    }

    #[rstest]
    fn preview_pixels_are_gray() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gray.png");
        let grid = PixelGrid::new(2, 1, vec![Sample::new(7, 255), Sample::new(200, 50)]).unwrap();

        save_grayscale_preview(&grid, &path).unwrap();

        let image = image::open(&path).unwrap().to_rgba8();
        assert_eq!(image.get_pixel(0, 0), &Rgba([7, 7, 7, 255]));
        assert_eq!(image.get_pixel(1, 0), &Rgba([200, 200, 200, 50]));
    }
}
