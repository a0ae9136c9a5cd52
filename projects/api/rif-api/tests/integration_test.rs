//! Integration tests for the RIF encode API

use rif_api::file_io::encode_to_file;
use rif_api::{AlphaCostModel, RifEncodeBuilder, RifError};
use rif_common::{PixelGrid, Sample};

/// 32x16 image built from three distinct 8x8 tiles, the last one translucent.
fn create_tiled_grid() -> PixelGrid {
    PixelGrid::from_fn(32, 16, |x, y| match (x / 8 + y / 8) % 3 {
        0 => Sample::opaque(((x % 8) * 16) as u8),
        1 => Sample::opaque(((y % 8) * 16) as u8),
        _ => Sample::new(200, 128),
    })
    .unwrap()
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

#[test]
fn test_compressed_file_header_and_layout() {
    let grid = create_tiled_grid();
    let encoded = RifEncodeBuilder::new()
        .compress(true)
        .pattern_min(2)
        .pattern_max(16)
        .pattern_step(2)
        .encode(&grid)
        .expect("Encode should succeed");
    let bytes = &encoded.bytes;
    let selection = encoded.selection.expect("Compressed output has a selection");

    assert_eq!(bytes[0], 1, "Translucent tile enables alpha");
    assert_eq!(read_u32(bytes, 1), 32);
    assert_eq!(read_u32(bytes, 5), 16);

    let size = read_u32(bytes, 17);
    let columns = read_u32(bytes, 9);
    let rows = read_u32(bytes, 13);
    let pattern_count = read_u32(bytes, 21);
    assert_eq!(size, selection.pattern_size);
    assert_eq!(pattern_count, selection.pattern_count);
    assert_eq!(columns, 32u32.div_ceil(size));
    assert_eq!(rows, 16u32.div_ceil(size));

    let palette_len = (pattern_count * size * size * 2) as usize;
    let cells_start = 25 + palette_len;
    assert_eq!(bytes.len(), cells_start + (columns * rows * 4) as usize);
    for cell in 0..(columns * rows) as usize {
        assert!(read_u32(bytes, cells_start + cell * 4) < pattern_count);
    }
}

#[test]
fn test_three_tiles_deduplicate_at_tile_size() {
    let grid = create_tiled_grid();
    let encoded = RifEncodeBuilder::new()
        .compress(true)
        .pattern_min(8)
        .pattern_max(8)
        .encode(&grid)
        .expect("Encode should succeed");

    let selection = encoded.selection.unwrap();
    assert_eq!(selection.pattern_size, 8);
    assert_eq!(selection.pattern_count, 3);
}

#[test]
fn test_pruning_and_alpha_model_are_deterministic() {
    let grid = create_tiled_grid();
    for alpha_cost in [AlphaCostModel::OpaqueSamples, AlphaCostModel::EverySample] {
        let builder = RifEncodeBuilder::new()
            .compress(true)
            .pattern_min(1)
            .pattern_max(16)
            .pattern_step(1)
            .alpha_cost(alpha_cost);

        let pruned = builder.encode(&grid).unwrap();
        let exhaustive = builder.prune(false).encode(&grid).unwrap();
        assert_eq!(pruned, exhaustive);
        assert_eq!(pruned, builder.encode(&grid).unwrap());
    }
}

#[test]
fn test_encode_to_file_roundtrip() {
    let grid = create_tiled_grid();
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("tiles.rif");
    let builder = RifEncodeBuilder::new().compress(true).pattern_min(4).pattern_max(8);

    let summary = encode_to_file(&builder, &grid, &path).expect("Write should succeed");
    let written = std::fs::read(&path).expect("Failed to read output file");

    assert_eq!(summary.bytes_written, written.len());
    assert_eq!(written, builder.encode(&grid).unwrap().bytes);
}

#[test]
fn test_invalid_bounds_are_rejected() {
    let grid = create_tiled_grid();
    let result = RifEncodeBuilder::new()
        .compress(true)
        .pattern_min(0)
        .encode(&grid);

    assert!(matches!(
        result,
        Err(RifError::InvalidSizeSearchBounds { min_size: 0, .. })
    ));
}
