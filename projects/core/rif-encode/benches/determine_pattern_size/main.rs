use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rif_common::{PixelGrid, Sample};
use rif_encode::{
    build_pattern_catalog, determine_optimal_pattern_size, PatternSearchOptions, RifImage,
};
use std::hint::black_box;

/// 512x512 image made of a few repeating tiles with some noise, similar to pixel art.
fn tiled_grid(size: usize) -> PixelGrid {
    let mut state = 0x2545_F491_4F6C_DD1Du64;
    PixelGrid::from_fn(size, size, |x, y| {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let tile = ((x / 16) + (y / 16)) % 4;
        let noisy = state % 64 == 0;
        Sample::opaque((tile as u8 * 60).wrapping_add(noisy as u8 * 7))
    })
    .unwrap()
}

fn criterion_benchmark(c: &mut Criterion) {
    let size = 512;
    let grid = tiled_grid(size);

    let mut group = c.benchmark_group("Pattern Size Search");
    group.throughput(Throughput::Elements((size * size) as u64));

    for (name, prune) in [("pruned", true), ("exhaustive", false)] {
        let options = PatternSearchOptions {
            min_size: 2,
            max_size: 32,
            step: 2,
            prune,
            ..Default::default()
        };
        group.bench_function(name, |b| {
            b.iter(|| determine_optimal_pattern_size(black_box(&grid), &options))
        });
    }
    group.finish();

    let mut group = c.benchmark_group("Pattern Catalog");
    group.throughput(Throughput::Elements((size * size) as u64));
    for pattern_size in [4u32, 8, 16] {
        group.bench_function(format!("build_{pattern_size}x{pattern_size}"), |b| {
            b.iter(|| build_pattern_catalog(black_box(&grid), pattern_size))
        });
    }

    let tiled = build_pattern_catalog(&grid, 8).unwrap();
    let image = RifImage::compressed(&grid, &tiled);
    let mut output = vec![0u8; image.encoded_len()];
    group.bench_function("serialize_8x8", |b| {
        b.iter(|| image.write_to(black_box(&mut output)))
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
