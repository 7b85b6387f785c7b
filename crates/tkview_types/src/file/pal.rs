//! `.PAL` color palette support.
//!
//! A palette file is a plain sequence of fixed-size palette blocks. Each block
//! holds [`Palette::COLOR_COUNT`] colors stored as `R, G, B` byte triples with
//! no header and no color-space transform:
//!
//! ```text
//! Offset        Size  Field
//! ------        ----  -----------------------------
//! k * 0x300     768   palette k (256 × [R, G, B])
//! ```
//!
//! Atlases ship one palette file per palette slot (`TileA0.pal`, `TileA1.pal`,
//! ...), and only the first block of each file is used by the atlas loader.
//!
//! # Examples
//!
//! ```no_run
//! use tkview_types::file::pal;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let palettes = pal::open("Data/TileA0.pal")?;
//! println!("first color: {}", palettes[0][0]);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::Path;

use log::debug;

use crate::file::{AssetError, FileType};

/// RGBA color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
	/// Red component (0-255)
	pub r: u8,
	/// Green component (0-255)
	pub g: u8,
	/// Blue component (0-255)
	pub b: u8,
	/// Alpha component (0-255)
	pub a: u8,
}

impl Color {
	/// Opaque black, the default map background.
	pub const BLACK: Self = Self::rgb(0, 0, 0);

	/// Opaque blue, the background and color key of display sprites.
	pub const BLUE: Self = Self::rgb(0, 0, 255);

	/// Creates a new RGBA color.
	pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
		Self {
			r,
			g,
			b,
			a,
		}
	}

	/// Creates a new RGB color with full opacity.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self::new(r, g, b, 255)
	}

	/// Creates a transparent black color.
	pub const fn transparent() -> Self {
		Self::new(0, 0, 0, 0)
	}

	/// Returns this color with a different alpha value.
	pub const fn with_alpha(self, a: u8) -> Self {
		Self::new(self.r, self.g, self.b, a)
	}

	/// Returns `true` if the RGB components match, ignoring alpha.
	pub const fn same_rgb(&self, other: &Self) -> bool {
		self.r == other.r && self.g == other.g && self.b == other.b
	}

	/// Returns the color as `[R, G, B, A]` bytes.
	pub const fn to_array(self) -> [u8; 4] {
		[self.r, self.g, self.b, self.a]
	}
}

impl Default for Color {
	fn default() -> Self {
		Self::transparent()
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "RGBA({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// An ordered table of opaque colors addressed by palette index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
	colors: Vec<Color>,
}

impl Palette {
	/// Number of colors in a palette block
	pub const COLOR_COUNT: usize = 256;

	/// Size of a palette block in bytes (256 colors × 3 bytes)
	pub const BLOCK_SIZE: usize = Self::COLOR_COUNT * 3;

	/// Creates a palette from an explicit list of colors.
	///
	/// Palettes read from files always hold [`Self::COLOR_COUNT`] colors;
	/// shorter palettes are useful for synthetic assets and tests.
	pub fn from_colors(colors: Vec<Color>) -> Self {
		Self {
			colors,
		}
	}

	/// Parses a single 768-byte palette block.
	///
	/// # Errors
	///
	/// Returns [`AssetError::MalformedPalette`] if `block` is not exactly one
	/// palette long.
	pub fn from_block(block: &[u8]) -> Result<Self, AssetError> {
		if block.len() != Self::BLOCK_SIZE {
			return Err(AssetError::MalformedPalette {
				len: block.len(),
				block_size: Self::BLOCK_SIZE,
			});
		}

		let colors = block.chunks_exact(3).map(|rgb| Color::rgb(rgb[0], rgb[1], rgb[2])).collect();
		Ok(Self {
			colors,
		})
	}

	/// Number of colors in the palette.
	#[inline]
	pub fn len(&self) -> usize {
		self.colors.len()
	}

	/// Returns `true` if the palette holds no colors.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.colors.is_empty()
	}

	/// Gets a color by index, or `None` if the index is out of range.
	#[inline]
	pub fn get(&self, index: u8) -> Option<Color> {
		self.colors.get(index as usize).copied()
	}

	/// Returns the colors of the palette.
	#[inline]
	pub fn colors(&self) -> &[Color] {
		&self.colors
	}

	/// Resolves a run of palette indices to packed `R, G, B` bytes.
	///
	/// Returns `None` if any index is out of range.
	pub fn resolve_rgb(&self, indices: &[u8]) -> Option<Vec<u8>> {
		let mut rgb = Vec::with_capacity(indices.len() * 3);
		for &index in indices {
			let color = self.get(index)?;
			rgb.extend_from_slice(&[color.r, color.g, color.b]);
		}
		Some(rgb)
	}

	/// Serializes the palette as one block of `R, G, B` triples.
	///
	/// Palettes shorter than a block are padded with black.
	pub fn to_bytes(&self) -> Vec<u8> {
		let mut data = Vec::with_capacity(Self::BLOCK_SIZE);
		for color in self.colors.iter().take(Self::COLOR_COUNT) {
			data.extend_from_slice(&[color.r, color.g, color.b]);
		}
		data.resize(Self::BLOCK_SIZE, 0);
		data
	}
}

impl fmt::Display for Palette {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Palette: {} colors", self.colors.len())
	}
}

impl std::ops::Index<u8> for Palette {
	type Output = Color;

	fn index(&self, index: u8) -> &Self::Output {
		&self.colors[index as usize]
	}
}

/// Parses every palette block in `data`.
///
/// # Errors
///
/// Returns [`AssetError::MalformedPalette`] if the length of `data` is not a
/// multiple of [`Palette::BLOCK_SIZE`]. An empty source holds no palettes.
pub fn from_bytes(data: &[u8]) -> Result<Vec<Palette>, AssetError> {
	if data.len() % Palette::BLOCK_SIZE != 0 {
		return Err(AssetError::MalformedPalette {
			len: data.len(),
			block_size: Palette::BLOCK_SIZE,
		});
	}

	let palettes = data
		.chunks_exact(Palette::BLOCK_SIZE)
		.map(Palette::from_block)
		.collect::<Result<Vec<_>, _>>()?;
	debug!("{}: parsed {} palette(s) from {} bytes", FileType::Pal, palettes.len(), data.len());
	Ok(palettes)
}

/// Reads every palette block of a `.pal` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is malformed. The error
/// carries the file path.
pub fn open(path: impl AsRef<Path>) -> Result<Vec<Palette>, AssetError> {
	let path = path.as_ref();
	std::fs::read(path)
		.map_err(AssetError::from)
		.and_then(|data| from_bytes(&data))
		.map_err(|e| e.at(path))
}
