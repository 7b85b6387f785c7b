//! Atlases: a frame table, its palettes and pixel store, decoded together.
//!
//! An atlas on disk is a family of files sharing a stem:
//!
//! ```text
//! Data/TileA.tbl     frame table
//! Data/TileA0.pal    palette slot 0
//! Data/TileA1.pal    palette slot 1 (one file per declared palette)
//! Data/TileA.epf     tile pixel store
//! ```

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use log::debug;

use crate::file::epf::{Decoder, File as EpfFile, Transparency};
use crate::file::{AssetError, Frame, Palette, TableIndex, pal};

/// Appends `suffix` to the final component of `stem`.
///
/// `with_suffix("Data/TileA", "0.pal")` is `Data/TileA0.pal`.
pub fn with_suffix(stem: impl AsRef<Path>, suffix: &str) -> PathBuf {
	let mut path = OsString::from(stem.as_ref().as_os_str());
	path.push(suffix);
	PathBuf::from(path)
}

/// A fully loaded atlas with its frames decoded opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atlas {
	index: TableIndex,
	palettes: Vec<Palette>,
	store: EpfFile,
	frames: Vec<Frame>,
}

impl Atlas {
	/// Decodes every frame of `store` and bundles it with its table and
	/// palettes.
	///
	/// # Errors
	///
	/// Fails with the decoder's errors on the first frame that cannot be
	/// decoded.
	pub fn from_parts(
		index: TableIndex,
		palettes: Vec<Palette>,
		store: EpfFile,
	) -> Result<Self, AssetError> {
		let frames = Decoder::new(&store, &index, &palettes).get_frames(Transparency::None)?;
		Ok(Self {
			index,
			palettes,
			store,
			frames,
		})
	}

	/// Loads the atlas files sharing `stem`.
	///
	/// Reads `<stem>.tbl`, then one `<stem><N>.pal` per declared palette slot
	/// (using the first palette of each file), then `<stem>.epf`.
	///
	/// # Errors
	///
	/// Returns the first load or decode error, carrying the failing file path.
	pub fn load(stem: impl AsRef<Path>) -> Result<Self, AssetError> {
		let stem = stem.as_ref();
		let index = TableIndex::open(with_suffix(stem, ".tbl"))?;

		let mut palettes = Vec::with_capacity(index.palette_count() as usize);
		for slot in 0..index.palette_count() {
			let path = with_suffix(stem, &format!("{slot}.pal"));
			let first = pal::open(&path)?.into_iter().next().ok_or_else(|| {
				AssetError::MalformedPalette {
					len: 0,
					block_size: Palette::BLOCK_SIZE,
				}
				.at(&path)
			})?;
			palettes.push(first);
		}

		let epf_path = with_suffix(stem, ".epf");
		let store = EpfFile::open(&epf_path)?;
		let atlas = Self::from_parts(index, palettes, store).map_err(|e| e.at(&epf_path))?;
		debug!("loaded atlas {}: {atlas}", stem.display());
		Ok(atlas)
	}

	/// The frame table.
	#[inline]
	pub fn index(&self) -> &TableIndex {
		&self.index
	}

	/// Palette slots, in slot order.
	#[inline]
	pub fn palettes(&self) -> &[Palette] {
		&self.palettes
	}

	/// Frames decoded opaque, index-aligned with the table.
	#[inline]
	pub fn frames(&self) -> &[Frame] {
		&self.frames
	}

	/// Returns a decoder for re-decoding frames with another transparency
	/// policy.
	pub fn decoder(&self) -> Decoder<'_> {
		Decoder::new(&self.store, &self.index, &self.palettes)
	}

	/// Splits the atlas into table, palettes and frames.
	pub fn into_parts(self) -> (TableIndex, Vec<Palette>, Vec<Frame>) {
		(self.index, self.palettes, self.frames)
	}
}

impl fmt::Display for Atlas {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} frames, {} palettes, {} bytes", self.frames.len(), self.palettes.len(), self.store.len())
	}
}
