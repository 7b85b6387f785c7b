//! Synthetic asset directories.
//!
//! ```text
//! TileA  6 frames, frame n filled with index n        palette: n -> (n, 100, 0)
//! TileB  3 frames, frame n filled with index n + 1    palette: n -> (0, n, 100)
//! TileC  3 frames:                                    palette: n -> (100, 0, n)
//!        0  index 0 (fully transparent)
//!        1  top half index 0, bottom half index 7
//!        2  top half index 9, bottom half index 0
//! SObj   object 0 empty, object 1 = [1, 2] (two rows)
//! ```

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tkview_rs::prelude::*;
use tkview_rs::tkview_types::file::epf::encode_tile;
use tkview_rs::tkview_types::file::sobj;

pub const TILE: usize = 24 * 24;

pub fn color_a(index: u8) -> Color {
	Color::rgb(index, 100, 0)
}

pub fn color_b(index: u8) -> Color {
	Color::rgb(0, index, 100)
}

pub fn color_c(index: u8) -> Color {
	Color::rgb(100, 0, index)
}

fn palette(color: fn(u8) -> Color) -> Palette {
	Palette::from_colors((0..=255u8).map(color).collect())
}

pub fn half_tile(top: u8, bottom: u8) -> Vec<u8> {
	(0..TILE).map(|i| if i / 24 < 12 { top } else { bottom }).collect()
}

/// Writes `<stem>.tbl`, `<stem>0.pal` and `<stem>.epf` for a single-palette
/// atlas whose tiles are packed back to back.
pub fn write_atlas(dir: &Path, stem: &str, palette: &Palette, tiles: &[Vec<u8>]) {
	let index = TableIndex::contiguous(tiles.len());
	let store: Vec<u8> = tiles.iter().flat_map(|t| encode_tile(t)).collect();
	std::fs::write(dir.join(format!("{stem}.tbl")), index.to_bytes()).unwrap();
	std::fs::write(dir.join(format!("{stem}0.pal")), palette.to_bytes()).unwrap();
	std::fs::write(dir.join(format!("{stem}.epf")), store).unwrap();
}

pub fn write_map(dir: &Path, name: &str, map: &MapGrid) -> PathBuf {
	let path = dir.join(name);
	std::fs::write(&path, map.to_bytes()).unwrap();
	path
}

/// The 2×2 map: A frame 5, empty, B frame 1 with object 1, empty.
pub fn scenario_map() -> MapGrid {
	MapGrid::new(
		2,
		2,
		vec![MapCell::new(5, 0), MapCell::new(0, 0), MapCell::new(49152, 1), MapCell::new(0, 0)],
	)
	.unwrap()
}

/// A complete asset directory.
pub struct DataDir {
	pub dir: TempDir,
}

impl DataDir {
	pub fn new() -> Self {
		let dir = tempfile::tempdir().unwrap();
		let root = dir.path();

		let tiles_a: Vec<Vec<u8>> = (0..6u8).map(|n| vec![n; TILE]).collect();
		write_atlas(root, "TileA", &palette(color_a), &tiles_a);

		let tiles_b: Vec<Vec<u8>> = (0..3u8).map(|n| vec![n + 1; TILE]).collect();
		write_atlas(root, "TileB", &palette(color_b), &tiles_b);

		let tiles_c = vec![vec![0; TILE], half_tile(0, 7), half_tile(9, 0)];
		write_atlas(root, "TileC", &palette(color_c), &tiles_c);

		let objects = vec![StaticObject::default(), StaticObject::new(0, vec![1, 2])];
		std::fs::write(root.join("SObj.tbl"), sobj::to_bytes(&objects)).unwrap();

		write_map(root, "scenario.map", &scenario_map());

		Self {
			dir,
		}
	}

	pub fn path(&self) -> &Path {
		self.dir.path()
	}

	pub fn paths(&self) -> AssetPaths {
		AssetPaths::new(self.path())
	}

	pub fn stem(&self, stem: &str) -> PathBuf {
		self.path().join(stem)
	}
}
