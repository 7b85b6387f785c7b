//! A loaded asset set: the three atlases and the static object table.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::info;
use tkview_types::atlas::Atlas;
use tkview_types::config::AssetPaths;
use tkview_types::file::{AssetError, Frame, MapGrid, StaticObjects};
use tkview_types::pipeline::{load_atlas, load_map, load_static_objects};
use tkview_types::render::{Compositor, Raster, SheetLayout, contact_sheet};

use crate::export::{self, ExportError, ImageFormat};

/// The image sets a session can browse and export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileSet {
	/// Atlas A frames
	A,
	/// Atlas B frames
	B,
	/// Atlas C frames
	C,
	/// Display sprites of the static objects
	Static,
}

impl TileSet {
	/// Every set, in export order.
	pub const ALL: [Self; 4] = [Self::A, Self::B, Self::C, Self::Static];

	/// File name prefix for exported images.
	pub const fn prefix(self) -> &'static str {
		match self {
			Self::A => "tileA",
			Self::B => "tileB",
			Self::C => "tileC",
			Self::Static => "tileStatic",
		}
	}

	/// Contact sheet layout used for the set.
	pub const fn sheet_layout(self) -> SheetLayout {
		match self {
			Self::Static => SheetLayout::SPRITES,
			_ => SheetLayout::TILES,
		}
	}
}

impl fmt::Display for TileSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::A => "a",
			Self::B => "b",
			Self::C => "c",
			Self::Static => "static",
		};
		f.write_str(name)
	}
}

impl FromStr for TileSet {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"a" | "tilea" => Ok(Self::A),
			"b" | "tileb" => Ok(Self::B),
			"c" | "tilec" => Ok(Self::C),
			"static" | "sobj" | "tilestatic" => Ok(Self::Static),
			other => Err(format!("unknown tile set: {other}")),
		}
	}
}

fn frame_rasters(atlas: &Atlas) -> Vec<&Raster> {
	atlas.frames().iter().map(Frame::raster).collect()
}

/// Every asset needed to browse tiles and render maps.
#[derive(Debug, Clone)]
pub struct Session {
	paths: AssetPaths,
	tile_a: Atlas,
	tile_b: Atlas,
	tile_c: Atlas,
	static_objects: StaticObjects,
	compositor: Compositor,
}

impl Session {
	/// Loads atlases A, B and C, then the static objects built from atlas C.
	///
	/// # Errors
	///
	/// Returns the first load error; it carries the path of the failing file.
	pub fn load(paths: AssetPaths) -> Result<Self, AssetError> {
		let tile_a = load_atlas(paths.tile_a_stem())?;
		let tile_b = load_atlas(paths.tile_b_stem())?;
		let tile_c = load_atlas(paths.tile_c_stem())?;
		let static_objects = load_static_objects(paths.static_objects_path(), &tile_c)?;

		info!(
			"loaded {}: {} A, {} B, {} C frames, {} static objects",
			paths.data_dir.display(),
			tile_a.frames().len(),
			tile_b.frames().len(),
			tile_c.frames().len(),
			static_objects.len()
		);

		Ok(Self {
			paths,
			tile_a,
			tile_b,
			tile_c,
			static_objects,
			compositor: Compositor::new(),
		})
	}

	/// Replaces the compositor used by [`Self::render`].
	pub fn with_compositor(mut self, compositor: Compositor) -> Self {
		self.compositor = compositor;
		self
	}

	/// Asset locations this session was loaded from.
	#[inline]
	pub fn paths(&self) -> &AssetPaths {
		&self.paths
	}

	/// Atlas A.
	#[inline]
	pub fn tile_a(&self) -> &Atlas {
		&self.tile_a
	}

	/// Atlas B.
	#[inline]
	pub fn tile_b(&self) -> &Atlas {
		&self.tile_b
	}

	/// Atlas C.
	#[inline]
	pub fn tile_c(&self) -> &Atlas {
		&self.tile_c
	}

	/// Static objects and their sprites.
	#[inline]
	pub fn static_objects(&self) -> &StaticObjects {
		&self.static_objects
	}

	/// Rasters of one set, in index order.
	pub fn images(&self, set: TileSet) -> Vec<&Raster> {
		match set {
			TileSet::A => frame_rasters(&self.tile_a),
			TileSet::B => frame_rasters(&self.tile_b),
			TileSet::C => frame_rasters(&self.tile_c),
			TileSet::Static => self.static_objects.display_sprites().iter().collect(),
		}
	}

	/// Lays out one set as a contact sheet.
	pub fn sheet(&self, set: TileSet, layout: SheetLayout) -> Raster {
		contact_sheet(self.images(set), layout)
	}

	/// Loads a map; relative paths are resolved against the data directory.
	///
	/// # Errors
	///
	/// See [`MapGrid::open`].
	pub fn load_map(&self, map: impl AsRef<Path>) -> Result<MapGrid, AssetError> {
		load_map(self.paths.map_path(map))
	}

	/// Composes a loaded map.
	///
	/// # Errors
	///
	/// Returns [`AssetError::MissingReference`] if the map names a tile or
	/// object this session does not have.
	pub fn render(&self, map: &MapGrid) -> Result<Raster, AssetError> {
		self.compositor.compose_with(map, self.tile_a.frames(), self.tile_b.frames(), &self.static_objects)
	}

	/// Loads and composes a map file.
	///
	/// # Errors
	///
	/// See [`Self::load_map`] and [`Self::render`].
	pub fn render_map(&self, map: impl AsRef<Path>) -> Result<Raster, AssetError> {
		let path = self.paths.map_path(map);
		let grid = load_map(&path)?;
		self.render(&grid).map_err(|e| e.at(&path))
	}

	/// Exports one set into `dir`.
	///
	/// # Errors
	///
	/// See [`export::export_frames`].
	pub fn export(&self, set: TileSet, dir: impl AsRef<Path>, format: ImageFormat) -> Result<Vec<PathBuf>, ExportError> {
		export::export_frames(&self.images(set), dir, set.prefix(), format)
	}

	/// Exports every set into `dir`, distinguished by prefix.
	///
	/// # Errors
	///
	/// Stops at the first set that fails to export.
	pub fn export_all(&self, dir: impl AsRef<Path>, format: ImageFormat) -> Result<Vec<PathBuf>, ExportError> {
		let dir = dir.as_ref();
		let mut written = Vec::new();
		for set in TileSet::ALL {
			written.extend(self.export(set, dir, format)?);
		}
		Ok(written)
	}

	/// Exports frame `index` of one set to `path`.
	///
	/// # Errors
	///
	/// See [`export::export_frame`].
	pub fn export_frame(
		&self,
		set: TileSet,
		index: usize,
		path: impl AsRef<Path>,
		format: ImageFormat,
	) -> Result<(), ExportError> {
		export::export_frame(&self.images(set), index, path, format)
	}
}
