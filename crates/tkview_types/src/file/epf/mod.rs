//! `.EPF` tile pixel store support.
//!
//! An `.epf` file is a flat store of fixed-size tile blocks. It carries no
//! directory of its own: the paired `.tbl` frame table records the byte offset
//! of each tile and the palette slot it is drawn with.
//!
//! # Tile Block Format
//!
//! ```text
//! Offset  Size   Field     Description
//! ------  -----  --------  --------------------------------------------
//! 0x000   576    indices   24×24 palette indices, row-major, 1 byte each
//! 0x240   1152   trailer   Auxiliary data, preserved but not decoded
//! ```
//!
//! # Usage Examples
//!
//! ```no_run
//! use tkview_types::file::epf::{Decoder, File, Transparency};
//! use tkview_types::file::{TableIndex, pal};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let index = TableIndex::open("Data/TileA.tbl")?;
//! let palettes = vec![pal::open("Data/TileA0.pal")?.remove(0)];
//! let store = File::open("Data/TileA.epf")?;
//!
//! let decoder = Decoder::new(&store, &index, &palettes);
//! for (i, frame) in decoder.iter(Transparency::None).enumerate().take(4) {
//!     println!("Frame #{i}: {}", frame?);
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, trace};

use crate::file::{AssetError, FileType, FrameDecodeError, Palette, ReferenceKind, TILE_BYTES};
use crate::file::tbl::{TableEntry, TableIndex};

pub mod frame;

#[cfg(test)]
mod tests;

pub use frame::{Frame, Transparency, encode_tile};

/// Raw tile pixel store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
	raw: Vec<u8>,
}

impl File {
	/// Opens a pixel store from the specified path.
	///
	/// # Errors
	///
	/// Returns an error carrying the path if the file cannot be read.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, AssetError> {
		let path = path.as_ref();
		let store = std::fs::File::open(path)
			.map_err(AssetError::from)
			.and_then(|file| Self::from_reader(&mut BufReader::new(file)))
			.map_err(|e| e.at(path))?;
		debug!("{}: {} bytes from {}", FileType::Epf, store.len(), path.display());
		Ok(store)
	}

	/// Wraps an in-memory pixel store.
	pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
		Self {
			raw: data.into(),
		}
	}

	/// Reads a pixel store from any reader.
	///
	/// # Errors
	///
	/// Returns an error if reading fails.
	pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, AssetError> {
		let mut raw = Vec::new();
		reader.read_to_end(&mut raw)?;
		Ok(Self {
			raw,
		})
	}

	/// Length of the store in bytes.
	#[inline]
	pub fn len(&self) -> usize {
		self.raw.len()
	}

	/// Returns `true` if the store is empty.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.raw.is_empty()
	}

	/// Returns the raw bytes of the store.
	#[inline]
	pub fn as_bytes(&self) -> &[u8] {
		&self.raw
	}

	/// Slices the tile block of `frame` described by `entry`.
	///
	/// # Errors
	///
	/// Returns [`FrameDecodeError::OutOfBounds`] if the block runs past the end
	/// of the store.
	pub fn tile_block(&self, frame: usize, entry: &TableEntry) -> Result<&[u8], FrameDecodeError> {
		let start = entry.offset as usize;
		let end = entry.end();
		if end > self.raw.len() {
			return Err(FrameDecodeError::OutOfBounds {
				frame,
				offset: entry.offset,
				required: end,
				available: self.raw.len(),
			});
		}
		Ok(&self.raw[start..end])
	}
}

impl fmt::Display for File {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "EPF: {} bytes ({} whole tiles)", self.raw.len(), self.raw.len() / TILE_BYTES)
	}
}

/// Decodes the frames of one atlas: a pixel store bound to its frame table
/// and palettes.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'a> {
	store: &'a File,
	index: &'a TableIndex,
	palettes: &'a [Palette],
}

impl<'a> Decoder<'a> {
	/// Binds a pixel store to its frame table and palette slots.
	pub fn new(store: &'a File, index: &'a TableIndex, palettes: &'a [Palette]) -> Self {
		Self {
			store,
			index,
			palettes,
		}
	}

	/// Number of frames the table declares.
	#[inline]
	pub fn frame_count(&self) -> usize {
		self.index.frame_count()
	}

	/// The frame table this decoder reads.
	#[inline]
	pub fn index(&self) -> &'a TableIndex {
		self.index
	}

	/// Returns the palette slot `entry` is drawn with.
	fn palette_for(&self, entry: &TableEntry) -> Result<&'a Palette, AssetError> {
		let slot = entry.palette as usize;
		self.palettes
			.get(slot)
			.ok_or_else(|| AssetError::missing_reference(ReferenceKind::Palette, slot, self.palettes.len()))
	}

	/// Decodes a single frame.
	///
	/// # Errors
	///
	/// Returns [`AssetError::MissingReference`] if `frame` is not in the table
	/// or its palette slot was not supplied, and [`AssetError::FrameDecode`] if
	/// the tile block is out of bounds or uses colors past the palette end.
	pub fn decode(&self, frame: usize, transparency: Transparency) -> Result<Frame, AssetError> {
		let entry = self.index.get(frame).ok_or_else(|| {
			AssetError::missing_reference(ReferenceKind::Frame, frame, self.index.frame_count())
		})?;
		let palette = self.palette_for(entry)?;
		let block = self.store.tile_block(frame, entry)?;
		trace!("{}: frame {frame} @ {:#x} ({transparency})", FileType::Epf, entry.offset);
		Ok(Frame::decode(block, palette, transparency)?)
	}

	/// Decodes every frame of the table, in table order.
	///
	/// # Errors
	///
	/// Fails on the first frame that cannot be decoded.
	pub fn get_frames(&self, transparency: Transparency) -> Result<Vec<Frame>, AssetError> {
		let frames = self.iter(transparency).collect::<Result<Vec<_>, _>>()?;
		debug!("{}: decoded {} frames ({transparency})", FileType::Epf, frames.len());
		Ok(frames)
	}

	/// Returns a lazy iterator decoding frames in table order.
	pub fn iter(&self, transparency: Transparency) -> FrameIterator<'a> {
		FrameIterator {
			decoder: *self,
			transparency,
			current_index: 0,
		}
	}
}

/// Lazy iterator over the decoded frames of an atlas.
#[derive(Debug, Clone)]
pub struct FrameIterator<'a> {
	decoder: Decoder<'a>,
	transparency: Transparency,
	current_index: usize,
}

impl<'a> Iterator for FrameIterator<'a> {
	type Item = Result<Frame, AssetError>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.current_index >= self.decoder.frame_count() {
			return None;
		}
		let frame = self.decoder.decode(self.current_index, self.transparency);
		self.current_index += 1;
		Some(frame)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = self.decoder.frame_count() - self.current_index;
		(remaining, Some(remaining))
	}
}

impl ExactSizeIterator for FrameIterator<'_> {
	fn len(&self) -> usize {
		self.decoder.frame_count() - self.current_index
	}
}
