//! Benchmark helper utilities for tkview-rs
//!
//! Generates synthetic atlases, static objects and maps so the decode and
//! compose paths can be measured without game data.

use tkview_types::file::epf::{File as EpfFile, encode_tile};
use tkview_types::file::{Color, MapCell, MapGrid, Palette, StaticObject, TILE_B_OFFSET, TILE_PIXELS, TableIndex};

/// A 256-color palette with a distinct color per index.
pub fn generate_palette() -> Palette {
	Palette::from_colors((0..=255u8).map(|i| Color::rgb(i, i.wrapping_mul(7), i.wrapping_mul(13))).collect())
}

/// Generates a pixel store of `frames` tiles packed back to back, with its
/// frame table.
///
/// Tile `n` is a diagonal gradient offset by `n`, with index 0 on every
/// eighth pixel so alpha decoding has transparent pixels to handle.
pub fn generate_atlas(frames: usize) -> (EpfFile, TableIndex) {
	let mut data = Vec::with_capacity(frames * 0x06C0);
	for n in 0..frames {
		let indices: Vec<u8> = (0..TILE_PIXELS)
			.map(|i| if i % 8 == 0 { 0 } else { ((i / 24 + i % 24 + n) % 255 + 1) as u8 })
			.collect();
		data.extend(encode_tile(&indices));
	}
	(EpfFile::from_bytes(data), TableIndex::contiguous(frames))
}

/// Generates `count` static objects, one to four tiles tall.
///
/// Object 0 is empty, as in game data.
pub fn generate_objects(count: usize, atlas_frames: usize) -> Vec<StaticObject> {
	(0..count)
		.map(|n| match n {
			0 => StaticObject::default(),
			_ => {
				let height = n % 4 + 1;
				let tiles = (0..height).map(|row| ((n + row) % atlas_frames) as u16).collect();
				StaticObject::new(0, tiles)
			}
		})
		.collect()
}

/// Generates a `width × height` map mixing atlas A tiles, atlas B tiles,
/// empty cells, and an object on every fifth cell.
///
/// `atlas_frames` must be at least 2.
pub fn generate_map(width: u16, height: u16, atlas_frames: usize, objects: usize) -> MapGrid {
	let cells = (0..usize::from(width) * usize::from(height))
		.map(|i| {
			let base = match i % 3 {
				0 => 0,
				1 => (i % (atlas_frames - 1) + 1) as u16,
				_ => (TILE_B_OFFSET as usize + i % atlas_frames) as u16,
			};
			let object = if i % 5 == 0 && objects > 1 { (i % (objects - 1) + 1) as u16 } else { 0 };
			MapCell::new(base, object)
		})
		.collect();
	MapGrid::new(width, height, cells).unwrap_or_else(|e| panic!("invalid benchmark map: {e}"))
}
