#![no_main]

// Rebuilds the grid from palette + cells and checks it matches, alongside the catalog invariants.

use libfuzzer_sys::{arbitrary, fuzz_target};
use rif_common::{PixelGrid, Sample, PADDING_SAMPLE};
use rif_encode::{build_pattern_catalog, RifImage};

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct TilingInput {
    pub width: u8,
    pub pattern_size: u8,
    pub samples: Vec<(u8, u8)>,
}

fuzz_target!(|input: TilingInput| {
    let width = (input.width as usize % 32) + 1;
    let height = input.samples.len() / width;
    if height == 0 {
        return;
    }

    let samples: Vec<Sample> = input.samples[..width * height]
        .iter()
        .map(|&(luminance, alpha)| Sample::new(luminance % 3, alpha))
        .collect();
    let grid = PixelGrid::new(width, height, samples).unwrap();
    let size = (input.pattern_size % 16) as u32 + 1;

    let tiled = build_pattern_catalog(&grid, size).unwrap();
    let catalog = &tiled.catalog;
    let columns = tiled.block_grid.columns as usize;
    let s = size as usize;

    assert_eq!(columns, width.div_ceil(s));
    assert_eq!(tiled.block_grid.rows as usize, height.div_ceil(s));
    assert_eq!(tiled.cells.len(), columns * tiled.block_grid.rows as usize);

    // No two palette entries are equal.
    let patterns: Vec<&[Sample]> = catalog.iter().collect();
    for (i, a) in patterns.iter().enumerate() {
        assert!(patterns[i + 1..].iter().all(|b| a != b));
    }

    // Every block, padding included, matches its palette entry.
    for (cell_index, &cell) in tiled.cells.iter().enumerate() {
        let pattern = catalog.get(cell).expect("cell index out of range");
        let (column, row) = (cell_index % columns, cell_index / columns);
        for (i, &sample) in pattern.iter().enumerate() {
            let x = column * s + i % s;
            let y = row * s + i / s;
            let expected = grid.get(x as u32, y as u32).unwrap_or(PADDING_SAMPLE);
            assert_eq!(sample, expected);
        }
    }

    let image = RifImage::compressed(&grid, &tiled);
    assert_eq!(image.to_vec().len(), image.encoded_len());
});
