//! Tile frames and the per-tile decoding step.
//!
//! A tile block is [`TILE_BYTES`] long. The first [`TILE_PIXELS`] bytes are the
//! palette indices of the 24×24 tile in row-major order, one byte per pixel.
//! The remaining bytes form an auxiliary trailer that is kept verbatim but not
//! drawn.

use std::fmt;

use crate::file::{Color, FrameDecodeError, Palette, TILE_BYTES, TILE_HEIGHT, TILE_PIXELS, TILE_WIDTH};
use crate::render::Raster;

/// How palette indices map to alpha while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Transparency {
	/// Every pixel is opaque
	#[default]
	None,

	/// Pixels whose resolved RGB equals the key are fully transparent
	ColorKey(Color),

	/// Pixels carrying this palette index are fully transparent
	AlphaIndex(u8),
}

impl Transparency {
	/// Palette index reserved for "no pixel" in tile data.
	pub const TRANSPARENT_INDEX: u8 = 0;

	/// Alpha-channel policy on the reserved transparent index.
	pub const fn alpha() -> Self {
		Self::AlphaIndex(Self::TRANSPARENT_INDEX)
	}

	#[inline]
	fn alpha_for(self, index: u8, color: Color) -> u8 {
		let transparent = match self {
			Self::None => false,
			Self::ColorKey(key) => color.same_rgb(&key),
			Self::AlphaIndex(reserved) => index == reserved,
		};
		if transparent { 0 } else { 255 }
	}
}

impl fmt::Display for Transparency {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::None => write!(f, "opaque"),
			Self::ColorKey(key) => write!(f, "color key {key}"),
			Self::AlphaIndex(index) => write!(f, "alpha index {index}"),
		}
	}
}

/// A decoded 24×24 tile.
///
/// The frame keeps its source tile block next to the decoded pixels, so the
/// palette indices can be re-applied or written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
	block: Vec<u8>,
	raster: Raster,
}

impl Frame {
	/// Decodes one tile block against `palette`.
	///
	/// # Errors
	///
	/// Returns [`FrameDecodeError::InvalidBlockSize`] if `block` is not
	/// [`TILE_BYTES`] long, or [`FrameDecodeError::PaletteIndexOutOfRange`] if a
	/// pixel refers to a color past the end of the palette.
	pub fn decode(
		block: &[u8],
		palette: &Palette,
		transparency: Transparency,
	) -> Result<Self, FrameDecodeError> {
		if block.len() != TILE_BYTES {
			return Err(FrameDecodeError::InvalidBlockSize {
				expected: TILE_BYTES,
				actual: block.len(),
			});
		}

		let mut pixels = Vec::with_capacity(TILE_PIXELS * 4);
		for &index in &block[..TILE_PIXELS] {
			let color = palette.get(index).ok_or(FrameDecodeError::PaletteIndexOutOfRange {
				index,
				len: palette.len(),
			})?;
			pixels.extend_from_slice(&color.with_alpha(transparency.alpha_for(index, color)).to_array());
		}

		let raster = Raster::from_rgba(TILE_WIDTH, TILE_HEIGHT, pixels).ok_or(
			FrameDecodeError::InvalidBlockSize {
				expected: TILE_BYTES,
				actual: block.len(),
			},
		)?;

		Ok(Self {
			block: block.to_vec(),
			raster,
		})
	}

	/// Palette indices of the tile, row-major.
	#[inline]
	pub fn indices(&self) -> &[u8] {
		&self.block[..TILE_PIXELS]
	}

	/// Undecoded trailer bytes of the tile block.
	#[inline]
	pub fn trailer(&self) -> &[u8] {
		&self.block[TILE_PIXELS..]
	}

	/// Decoded RGBA pixels.
	#[inline]
	pub fn raster(&self) -> &Raster {
		&self.raster
	}

	/// Frame width in pixels.
	#[inline]
	pub fn width(&self) -> u32 {
		self.raster.width()
	}

	/// Frame height in pixels.
	#[inline]
	pub fn height(&self) -> u32 {
		self.raster.height()
	}

	/// Returns the source tile block.
	pub fn to_bytes(&self) -> Vec<u8> {
		self.block.clone()
	}

	/// Gets the palette index at `(x, y)`, or `None` if out of bounds.
	pub fn index_at(&self, x: u32, y: u32) -> Option<u8> {
		if x >= TILE_WIDTH || y >= TILE_HEIGHT {
			return None;
		}
		self.block.get((y * TILE_WIDTH + x) as usize).copied()
	}

	/// Gets the decoded color at `(x, y)`, or `None` if out of bounds.
	pub fn color_at(&self, x: u32, y: u32) -> Option<Color> {
		self.raster.get(x, y)
	}
}

impl fmt::Display for Frame {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}×{} tile - {} bytes", self.width(), self.height(), self.block.len())
	}
}

/// Builds a tile block from palette indices, zero-filling the trailer.
///
/// # Panics
///
/// Panics if `indices` is not exactly [`TILE_PIXELS`] long.
pub fn encode_tile(indices: &[u8]) -> Vec<u8> {
	assert_eq!(indices.len(), TILE_PIXELS, "Tile index data size mismatch");
	let mut block = indices.to_vec();
	block.resize(TILE_BYTES, 0);
	block
}
