//! Map grid support.
//!
//! # File Structure
//!
//! Map files are big-endian:
//!
//! ```text
//! Offset  Size       Field     Description
//! ------  ---------  --------  ----------------------------------------
//! 0x00    2          width     Number of columns (u16)
//! 0x02    2          height    Number of rows (u16)
//! 0x04    4 × w × h  cells     Row-major cell records
//! ```
//!
//! ## Cell (4 bytes)
//!
//! ```text
//! +0x00   2   base_tile_ref      0 = background, 1..49150 = atlas A,
//!                                49151.. = atlas B (ref - 49151)
//! +0x02   2   static_object_ref  0 = none
//! ```
//!
//! The reader returns references exactly as stored; resolving them against
//! the atlases is left to the compositor.

use std::fmt;
use std::path::Path;

use log::{debug, warn};

use crate::file::{AssetError, FileType, TILE_B_OFFSET};

/// Map layout constants.
pub mod constants {
	/// Size of the header (width + height)
	pub const HEADER_SIZE: usize = 4;

	/// Size of one cell record
	pub const CELL_SIZE: usize = 4;
}

/// Atlas a base tile reference resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileRef {
	/// Nothing drawn, the background shows through
	Background,
	/// Frame of atlas A
	A(usize),
	/// Frame of atlas B
	B(usize),
}

impl TileRef {
	/// Classifies a raw base tile reference.
	pub const fn resolve(base_tile_ref: u16) -> Self {
		if base_tile_ref as u32 >= TILE_B_OFFSET {
			Self::B((base_tile_ref as u32 - TILE_B_OFFSET) as usize)
		} else if base_tile_ref > 0 {
			Self::A(base_tile_ref as usize)
		} else {
			Self::Background
		}
	}
}

/// A single map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MapCell {
	/// Raw base tile reference
	pub base_tile_ref: u16,

	/// Static object number, 0 for none
	pub static_object_ref: u16,
}

impl MapCell {
	/// Creates a new cell.
	pub const fn new(base_tile_ref: u16, static_object_ref: u16) -> Self {
		Self {
			base_tile_ref,
			static_object_ref,
		}
	}

	/// Resolves the base tile reference.
	#[inline]
	pub const fn tile(&self) -> TileRef {
		TileRef::resolve(self.base_tile_ref)
	}

	/// Returns the static object number, if any.
	#[inline]
	pub const fn static_object(&self) -> Option<usize> {
		match self.static_object_ref {
			0 => None,
			n => Some(n as usize),
		}
	}
}

/// A parsed map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapGrid {
	width: u16,
	height: u16,
	cells: Vec<MapCell>,
}

impl MapGrid {
	/// Builds a grid from its parts.
	///
	/// # Errors
	///
	/// Returns [`AssetError::MalformedMap`] if a dimension is zero or `cells`
	/// does not hold exactly `width × height` records.
	pub fn new(width: u16, height: u16, cells: Vec<MapCell>) -> Result<Self, AssetError> {
		if width == 0 || height == 0 {
			return Err(AssetError::malformed_map(format!("invalid dimensions {width}×{height}")));
		}
		let expected = width as usize * height as usize;
		if cells.len() != expected {
			return Err(AssetError::malformed_map(format!(
				"{width}×{height} grid needs {expected} cells, got {}",
				cells.len()
			)));
		}
		Ok(Self {
			width,
			height,
			cells,
		})
	}

	/// Reads a map from the specified path.
	///
	/// # Errors
	///
	/// Returns an error carrying the path if the file cannot be read or is
	/// malformed.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, AssetError> {
		let path = path.as_ref();
		std::fs::read(path)
			.map_err(AssetError::from)
			.and_then(|data| Self::from_bytes(&data))
			.map_err(|e| e.at(path))
	}

	/// Parses a map from a byte slice.
	///
	/// # Errors
	///
	/// Returns [`AssetError::MalformedMap`] if the source is shorter than the
	/// declared grid or a dimension is zero.
	pub fn from_bytes(data: &[u8]) -> Result<Self, AssetError> {
		if data.len() < constants::HEADER_SIZE {
			return Err(AssetError::malformed_map(format!(
				"header needs {} bytes, got {}",
				constants::HEADER_SIZE,
				data.len()
			)));
		}

		let width = u16::from_be_bytes([data[0], data[1]]);
		let height = u16::from_be_bytes([data[2], data[3]]);
		let cell_count = width as usize * height as usize;
		let required = constants::HEADER_SIZE + cell_count * constants::CELL_SIZE;
		if data.len() < required {
			return Err(AssetError::malformed_map(format!(
				"{width}×{height} grid needs {required} bytes, got {}",
				data.len()
			)));
		}
		if data.len() > required {
			warn!("{}: ignoring {} trailing bytes", FileType::Map, data.len() - required);
		}

		let cells = data[constants::HEADER_SIZE..required]
			.chunks_exact(constants::CELL_SIZE)
			.map(|raw| {
				MapCell::new(u16::from_be_bytes([raw[0], raw[1]]), u16::from_be_bytes([raw[2], raw[3]]))
			})
			.collect();

		let grid = Self::new(width, height, cells)?;
		debug!("{}: {}", FileType::Map, grid);
		Ok(grid)
	}

	/// Serializes the map.
	pub fn to_bytes(&self) -> Vec<u8> {
		let mut data =
			Vec::with_capacity(constants::HEADER_SIZE + self.cells.len() * constants::CELL_SIZE);
		data.extend_from_slice(&self.width.to_be_bytes());
		data.extend_from_slice(&self.height.to_be_bytes());
		for cell in &self.cells {
			data.extend_from_slice(&cell.base_tile_ref.to_be_bytes());
			data.extend_from_slice(&cell.static_object_ref.to_be_bytes());
		}
		data
	}

	/// Number of columns.
	#[inline]
	pub fn width(&self) -> u16 {
		self.width
	}

	/// Number of rows.
	#[inline]
	pub fn height(&self) -> u16 {
		self.height
	}

	/// Cells in row-major order.
	#[inline]
	pub fn cells(&self) -> &[MapCell] {
		&self.cells
	}

	/// Gets the cell at column `x`, row `y`.
	pub fn get(&self, x: u16, y: u16) -> Option<&MapCell> {
		if x >= self.width || y >= self.height {
			return None;
		}
		self.cells.get(y as usize * self.width as usize + x as usize)
	}
}

impl fmt::Display for MapGrid {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let objects = self.cells.iter().filter(|c| c.static_object_ref != 0).count();
		write!(f, "{}×{} map, {} static objects", self.width, self.height, objects)
	}
}
