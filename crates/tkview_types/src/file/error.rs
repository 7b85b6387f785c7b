//! Error types for asset parsing and map composition.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Asset file formats handled by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
	/// Frame table (`.tbl`)
	Tbl,
	/// Color palette (`.pal`)
	Pal,
	/// Tile pixel store (`.epf`)
	Epf,
	/// Map grid
	Map,
	/// Static object table (`SObj.tbl`)
	SObj,
}

impl fmt::Display for FileType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Tbl => write!(f, "TBL"),
			Self::Pal => write!(f, "PAL"),
			Self::Epf => write!(f, "EPF"),
			Self::Map => write!(f, "MAP"),
			Self::SObj => write!(f, "SOBJ"),
		}
	}
}

/// Kind of table a [`AssetError::MissingReference`] points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
	/// A palette loaded for an atlas
	Palette,
	/// A frame of atlas A
	AtlasA,
	/// A frame of atlas B
	AtlasB,
	/// A frame of an atlas bound to a decoder
	Frame,
	/// A static object record
	StaticObject,
	/// A static object sprite
	Sprite,
}

impl fmt::Display for ReferenceKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Palette => write!(f, "palette"),
			Self::AtlasA => write!(f, "atlas A frame"),
			Self::AtlasB => write!(f, "atlas B frame"),
			Self::Frame => write!(f, "atlas frame"),
			Self::StaticObject => write!(f, "static object"),
			Self::Sprite => write!(f, "static object sprite"),
		}
	}
}

/// Errors raised while turning a single tile block into a frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameDecodeError {
	/// The frame's byte range lies past the end of the pixel store
	#[error(
		"Frame {frame} at offset {offset} needs {required} bytes, but the source is {available} bytes long"
	)]
	OutOfBounds {
		/// Frame number in the table index
		frame: usize,
		/// Byte offset of the frame
		offset: u32,
		/// End of the frame's byte range
		required: usize,
		/// Length of the pixel store
		available: usize,
	},

	/// A tile block was handed to the decoder with the wrong length
	#[error("Invalid tile block: expected {expected} bytes, got {actual} bytes")]
	InvalidBlockSize {
		/// Expected number of bytes
		expected: usize,
		/// Actual number of bytes
		actual: usize,
	},

	/// A pixel refers to a color the palette does not have
	#[error("Palette index {index} out of range (palette has {len} colors)")]
	PaletteIndexOutOfRange {
		/// Offending palette index
		index: u8,
		/// Number of colors in the palette
		len: usize,
	},
}

/// Unified error type for asset loading and composition.
#[derive(Debug, Error)]
pub enum AssetError {
	/// The frame table is structurally invalid
	#[error("Malformed index: {reason}")]
	MalformedIndex {
		/// What is wrong with the table
		reason: String,
	},

	/// The palette source does not hold a whole number of palettes
	#[error(
		"Malformed palette: {len} bytes is not a non-zero multiple of {block_size} bytes"
	)]
	MalformedPalette {
		/// Length of the palette source
		len: usize,
		/// Size of a single palette block
		block_size: usize,
	},

	/// A frame could not be decoded
	#[error(transparent)]
	FrameDecode(#[from] FrameDecodeError),

	/// The map grid is structurally invalid
	#[error("Malformed map: {reason}")]
	MalformedMap {
		/// What is wrong with the map
		reason: String,
	},

	/// A record refers to an entry that its table does not contain
	#[error("Missing reference: {kind} {index} requested, but only {available} available")]
	MissingReference {
		/// Table the reference points into
		kind: ReferenceKind,
		/// Requested index
		index: usize,
		/// Number of entries in the table
		available: usize,
	},

	/// A map cell places a static object that has no tile rows
	#[error("Empty static object: object {index} has height 0 but is placed on the map")]
	EmptyStaticObject {
		/// Static object index
		index: usize,
	},

	/// Generic short read
	#[error("{file_type} source truncated: expected {expected} bytes, got {actual} bytes")]
	SourceTruncated {
		/// Format being read
		file_type: FileType,
		/// Expected number of bytes
		expected: usize,
		/// Actual number of bytes
		actual: usize,
	},

	/// A failure tied to a specific file on disk
	#[error("{path}: {source}")]
	File {
		/// Path of the failing file
		path: PathBuf,
		/// Underlying error
		#[source]
		source: Box<AssetError>,
	},

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}

impl AssetError {
	/// Creates a [`AssetError::MalformedIndex`] error.
	pub fn malformed_index(reason: impl Into<String>) -> Self {
		Self::MalformedIndex {
			reason: reason.into(),
		}
	}

	/// Creates a [`AssetError::MalformedMap`] error.
	pub fn malformed_map(reason: impl Into<String>) -> Self {
		Self::MalformedMap {
			reason: reason.into(),
		}
	}

	/// Creates a [`AssetError::MissingReference`] error.
	pub fn missing_reference(kind: ReferenceKind, index: usize, available: usize) -> Self {
		Self::MissingReference {
			kind,
			index,
			available,
		}
	}

	/// Creates a [`AssetError::SourceTruncated`] error.
	pub fn truncated(file_type: FileType, expected: usize, actual: usize) -> Self {
		Self::SourceTruncated {
			file_type,
			expected,
			actual,
		}
	}

	/// Attaches the path of the file that produced this error.
	pub fn at(self, path: impl Into<PathBuf>) -> Self {
		Self::File {
			path: path.into(),
			source: Box::new(self),
		}
	}

	/// Returns the innermost error, skipping any path context.
	pub fn root(&self) -> &AssetError {
		match self {
			Self::File {
				source,
				..
			} => source.root(),
			other => other,
		}
	}

	/// Short name of the error kind, suitable for user-facing messages.
	pub fn kind_name(&self) -> &'static str {
		match self.root() {
			Self::MalformedIndex {
				..
			} => "MalformedIndex",
			Self::MalformedPalette {
				..
			} => "MalformedPalette",
			Self::FrameDecode(_) => "FrameDecodeError",
			Self::MalformedMap {
				..
			} => "MalformedMap",
			Self::MissingReference {
				..
			} => "MissingReference",
			Self::EmptyStaticObject {
				..
			} => "EmptyStaticObject",
			Self::SourceTruncated {
				..
			} => "SourceTruncated",
			Self::File {
				..
			} => "File",
			Self::IOError(_) => "IOError",
		}
	}
}
