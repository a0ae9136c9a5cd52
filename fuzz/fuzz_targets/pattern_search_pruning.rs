#![no_main]

// Checks that abandoning losing candidates early never changes the chosen pattern size.

use libfuzzer_sys::{arbitrary, fuzz_target};
use rif_common::{PixelGrid, Sample};
use rif_encode::{determine_optimal_pattern_size, AlphaCostModel, PatternSearchOptions};

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct SearchInput {
    pub width: u8,
    pub min_size: u8,
    pub max_size: u8,
    pub step: u8,
    pub every_sample: bool,
    /// Pairs of (luminance, alpha); few distinct values make deduplication likely.
    pub samples: Vec<(u8, u8)>,
}

fuzz_target!(|input: SearchInput| {
    let width = (input.width as usize % 24) + 1;
    let height = input.samples.len() / width;
    if height == 0 {
        return;
    }

    let samples: Vec<Sample> = input.samples[..width * height]
        .iter()
        .map(|&(luminance, alpha)| Sample::new(luminance % 4, if alpha < 128 { 0 } else { 255 }))
        .collect();
    let grid = PixelGrid::new(width, height, samples).unwrap();

    let min_size = (input.min_size % 12) as u32 + 1;
    let pruned = PatternSearchOptions {
        min_size,
        max_size: min_size + (input.max_size % 12) as u32,
        step: (input.step % 4) as u32 + 1,
        alpha_cost: if input.every_sample {
            AlphaCostModel::EverySample
        } else {
            AlphaCostModel::OpaqueSamples
        },
        prune: true,
    };
    let exhaustive = PatternSearchOptions {
        prune: false,
        ..pruned
    };

    assert_eq!(
        determine_optimal_pattern_size(&grid, &pruned).unwrap(),
        determine_optimal_pattern_size(&grid, &exhaustive).unwrap()
    );
});
