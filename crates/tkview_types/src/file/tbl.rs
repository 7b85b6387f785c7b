//! `.TBL` frame table support.
//!
//! A frame table describes where each tile of an atlas lives inside the paired
//! `.epf` pixel store and which palette it is drawn with.
//!
//! # File Structure
//!
//! ```text
//! Offset  Size   Field           Description
//! ------  -----  --------------  ----------------------------------------
//! 0x00    4      frame_count     Number of entries (u32, little-endian)
//! 0x04    4      palette_count   Number of palette files for the atlas
//! 0x08    4      data_size       Length of the paired pixel store in bytes
//! 0x0C    8 × n  entries         One entry per frame
//! ```
//!
//! ## Entry (8 bytes)
//!
//! ```text
//! +0x00   4      offset          Byte offset of the tile block in the store
//! +0x04   2      palette         Palette slot used to decode the tile
//! +0x06   2      reserved        Unused, kept for round-tripping
//! ```
//!
//! Offsets are monotonic (non-decreasing) and every tile block must fit inside
//! `data_size`.

use std::fmt;
use std::path::Path;

use log::{debug, trace};

use crate::file::{AssetError, FileType, TILE_BYTES};

/// TBL layout constants.
pub mod constants {
	/// Size of the header (frame count, palette count, data size)
	pub const HEADER_SIZE: usize = 12;

	/// Size of each frame entry
	pub const ENTRY_SIZE: usize = 8;
}

/// A single frame entry of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableEntry {
	/// Byte offset of the tile block in the pixel store
	pub offset: u32,

	/// Palette slot used to decode the tile
	pub palette: u16,

	/// Reserved field
	pub reserved: u16,
}

impl TableEntry {
	/// Creates a new entry drawn with the given palette slot.
	pub const fn new(offset: u32, palette: u16) -> Self {
		Self {
			offset,
			palette,
			reserved: 0,
		}
	}

	/// End of the tile block described by this entry.
	#[inline]
	pub fn end(&self) -> usize {
		self.offset as usize + TILE_BYTES
	}
}

/// Parsed frame table of an atlas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableIndex {
	palette_count: u32,
	data_size: u32,
	entries: Vec<TableEntry>,
}

impl TableIndex {
	/// Builds a table from its parts, validating it as [`Self::from_bytes`] would.
	///
	/// # Errors
	///
	/// Returns [`AssetError::MalformedIndex`] if offsets decrease, a tile block
	/// ends past `data_size`, or an entry names a palette slot that does not
	/// exist.
	pub fn new(
		palette_count: u32,
		data_size: u32,
		entries: Vec<TableEntry>,
	) -> Result<Self, AssetError> {
		let mut previous = 0u32;
		for (frame, entry) in entries.iter().enumerate() {
			if entry.offset < previous {
				return Err(AssetError::malformed_index(format!(
					"frame {frame} offset {} precedes previous offset {previous}",
					entry.offset
				)));
			}
			if entry.end() > data_size as usize {
				return Err(AssetError::malformed_index(format!(
					"frame {frame} spans {}..{} beyond declared data size {data_size}",
					entry.offset,
					entry.end()
				)));
			}
			if palette_count > 0 && u32::from(entry.palette) >= palette_count {
				return Err(AssetError::malformed_index(format!(
					"frame {frame} uses palette {} of {palette_count}",
					entry.palette
				)));
			}
			previous = entry.offset;
		}

		Ok(Self {
			palette_count,
			data_size,
			entries,
		})
	}

	/// Builds a table for `frame_count` tiles packed back to back, all drawn
	/// with palette 0.
	pub fn contiguous(frame_count: usize) -> Self {
		let entries =
			(0..frame_count).map(|i| TableEntry::new((i * TILE_BYTES) as u32, 0)).collect();
		Self {
			palette_count: 1,
			data_size: (frame_count * TILE_BYTES) as u32,
			entries,
		}
	}

	/// Reads a table from the specified path.
	///
	/// # Errors
	///
	/// Returns an error if the file cannot be read or is malformed. The error
	/// carries the file path.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, AssetError> {
		let path = path.as_ref();
		std::fs::read(path)
			.map_err(AssetError::from)
			.and_then(|data| Self::from_bytes(&data))
			.map_err(|e| e.at(path))
	}

	/// Parses a table from a byte slice.
	///
	/// # Errors
	///
	/// Returns [`AssetError::MalformedIndex`] if the source is truncated, the
	/// offsets are not monotonic, or an offset is out of range.
	pub fn from_bytes(data: &[u8]) -> Result<Self, AssetError> {
		if data.len() < constants::HEADER_SIZE {
			return Err(AssetError::malformed_index(format!(
				"header needs {} bytes, got {}",
				constants::HEADER_SIZE,
				data.len()
			)));
		}

		let frame_count = read_u32(data, 0) as usize;
		let palette_count = read_u32(data, 4);
		let data_size = read_u32(data, 8);

		let required = frame_count
			.checked_mul(constants::ENTRY_SIZE)
			.and_then(|n| n.checked_add(constants::HEADER_SIZE))
			.ok_or_else(|| {
				AssetError::malformed_index(format!("frame count {frame_count} overflows"))
			})?;
		if data.len() < required {
			return Err(AssetError::malformed_index(format!(
				"{frame_count} entries need {required} bytes, got {}",
				data.len()
			)));
		}

		let entries = data[constants::HEADER_SIZE..required]
			.chunks_exact(constants::ENTRY_SIZE)
			.map(|raw| TableEntry {
				offset: read_u32(raw, 0),
				palette: u16::from_le_bytes([raw[4], raw[5]]),
				reserved: u16::from_le_bytes([raw[6], raw[7]]),
			})
			.collect::<Vec<_>>();
		trace!("{}: {:?}", FileType::Tbl, entries);

		let index = Self::new(palette_count, data_size, entries)?;
		debug!(
			"{}: {} frames, {} palettes, {} data bytes",
			FileType::Tbl,
			index.frame_count(),
			palette_count,
			data_size
		);
		Ok(index)
	}

	/// Serializes the table.
	pub fn to_bytes(&self) -> Vec<u8> {
		let mut data =
			Vec::with_capacity(constants::HEADER_SIZE + self.entries.len() * constants::ENTRY_SIZE);
		data.extend_from_slice(&(self.entries.len() as u32).to_le_bytes());
		data.extend_from_slice(&self.palette_count.to_le_bytes());
		data.extend_from_slice(&self.data_size.to_le_bytes());
		for entry in &self.entries {
			data.extend_from_slice(&entry.offset.to_le_bytes());
			data.extend_from_slice(&entry.palette.to_le_bytes());
			data.extend_from_slice(&entry.reserved.to_le_bytes());
		}
		data
	}

	/// Number of frames in the table.
	#[inline]
	pub fn frame_count(&self) -> usize {
		self.entries.len()
	}

	/// Number of palette files the atlas declares.
	#[inline]
	pub fn palette_count(&self) -> u32 {
		self.palette_count
	}

	/// Declared length of the paired pixel store.
	#[inline]
	pub fn data_size(&self) -> u32 {
		self.data_size
	}

	/// Returns all entries.
	#[inline]
	pub fn entries(&self) -> &[TableEntry] {
		&self.entries
	}

	/// Returns a single entry, or `None` if out of range.
	#[inline]
	pub fn get(&self, frame: usize) -> Option<&TableEntry> {
		self.entries.get(frame)
	}

	/// Iterates over frame byte offsets in table order.
	pub fn offsets(&self) -> impl Iterator<Item = u32> + '_ {
		self.entries.iter().map(|entry| entry.offset)
	}
}

impl fmt::Display for TableIndex {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"TBL: {} frames, {} palettes, {} data bytes",
			self.entries.len(),
			self.palette_count,
			self.data_size
		)
	}
}

#[inline]
fn read_u32(data: &[u8], at: usize) -> u32 {
	u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}
