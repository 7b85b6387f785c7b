//! Static object table (`SObj.tbl`) support.
//!
//! Static objects are map decorations taller than one cell: trees, walls,
//! signposts. Each object is a column of atlas C tiles stacked upwards from the
//! cell it is anchored to.
//!
//! # File Structure
//!
//! ```text
//! Offset  Size  Field          Description
//! ------  ----  -------------  ----------------------------------------
//! 0x00    4     object_count   Number of records (u32, little-endian)
//! 0x04    ...   records        Variable-length object records
//! ```
//!
//! ## Object Record
//!
//! ```text
//! +0x00   1          movement   Movement/passability flags
//! +0x01   1          height     Number of tile rows (h)
//! +0x02   2 × h      tiles      Atlas C frame numbers, top row first (u16 LE)
//! ```
//!
//! Object 0 exists in the table but is never placed, since a map cell uses 0
//! to mean "no object".

use std::fmt;
use std::path::Path;

use log::{debug, trace};

use crate::file::epf::{Decoder, Transparency};
use crate::file::{AssetError, Color, FileType, TILE_HEIGHT, TILE_WIDTH};
use crate::render::Raster;

/// Static object metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct StaticObject {
	/// Movement/passability flags
	pub movement: u8,

	/// Atlas C frame numbers, top row first
	pub tiles: Vec<u16>,
}

impl StaticObject {
	/// Creates a new object from its tile column.
	pub fn new(movement: u8, tiles: Vec<u16>) -> Self {
		Self {
			movement,
			tiles,
		}
	}

	/// Number of tile rows the object occupies, its anchor row included.
	#[inline]
	pub fn height(&self) -> u32 {
		self.tiles.len() as u32
	}
}

impl fmt::Display for StaticObject {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "height {} (movement {:#04x}) tiles {:?}", self.height(), self.movement, self.tiles)
	}
}

/// Parses the object records of a static object table.
///
/// # Errors
///
/// Returns [`AssetError::SourceTruncated`] if a record runs past the end of the
/// source.
pub fn from_bytes(data: &[u8]) -> Result<Vec<StaticObject>, AssetError> {
	if data.len() < 4 {
		return Err(AssetError::truncated(FileType::SObj, 4, data.len()));
	}

	let count = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;
	let mut objects = Vec::with_capacity(count.min(data.len() / 2));
	let mut cursor = 4usize;
	for _ in 0..count {
		if data.len() < cursor + 2 {
			return Err(AssetError::truncated(FileType::SObj, cursor + 2, data.len()));
		}
		let movement = data[cursor];
		let height = data[cursor + 1] as usize;
		cursor += 2;

		let end = cursor + height * 2;
		if data.len() < end {
			return Err(AssetError::truncated(FileType::SObj, end, data.len()));
		}
		let tiles = data[cursor..end].chunks_exact(2).map(|t| u16::from_le_bytes([t[0], t[1]])).collect();
		cursor = end;

		let object = StaticObject::new(movement, tiles);
		trace!("{}: object {}: {object}", FileType::SObj, objects.len());
		objects.push(object);
	}

	debug!("{}: {} objects in {} bytes", FileType::SObj, objects.len(), cursor);
	Ok(objects)
}

/// Serializes object records.
pub fn to_bytes(objects: &[StaticObject]) -> Vec<u8> {
	let mut data = Vec::new();
	data.extend_from_slice(&(objects.len() as u32).to_le_bytes());
	for object in objects {
		data.push(object.movement);
		data.push(object.tiles.len() as u8);
		for tile in &object.tiles {
			data.extend_from_slice(&tile.to_le_bytes());
		}
	}
	data
}

/// How object sprites are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteStyle {
	/// Transparency policy used to decode each tile
	pub transparency: Transparency,

	/// Fill for pixels no tile covers; `None` leaves them transparent
	pub background: Option<Color>,

	/// Extra rows added above the tile column
	pub height_pad: u32,
}

impl SpriteStyle {
	/// Sprites for browsing: opaque, keyed on a blue fill, padded by 10 rows.
	///
	/// Every transparent tile pixel carries the key color, so a viewer can key
	/// the sprite out again with `Transparency::ColorKey(Color::BLUE)`.
	pub const fn display() -> Self {
		Self {
			transparency: Transparency::alpha(),
			background: Some(Color::BLUE),
			height_pad: 10,
		}
	}

	/// Sprites for map composition: true alpha, no padding.
	pub const fn composite() -> Self {
		Self {
			transparency: Transparency::alpha(),
			background: None,
			height_pad: 0,
		}
	}

	/// Renders one object as a sprite, decoding its tiles with `decoder`.
	///
	/// The sprite is one tile wide and `height × 24 + height_pad` pixels tall.
	///
	/// # Errors
	///
	/// Fails with the decoder's errors, including
	/// [`AssetError::MissingReference`] for tiles outside the atlas.
	pub fn render(&self, object: &StaticObject, decoder: &Decoder<'_>) -> Result<Raster, AssetError> {
		let height = object.height() * TILE_HEIGHT + self.height_pad;
		let mut sprite = match self.background {
			Some(color) => Raster::filled(TILE_WIDTH, height, color),
			None => Raster::new(TILE_WIDTH, height),
		};

		for (row, &tile) in object.tiles.iter().enumerate() {
			let frame = decoder.decode(tile as usize, self.transparency)?;
			let y = i64::from(self.height_pad) + (row as i64) * i64::from(TILE_HEIGHT);
			sprite.blend_from(frame.raster(), 0, y);
		}
		Ok(sprite)
	}
}

/// A static object table with its two sprite sets, index-aligned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticObjects {
	objects: Vec<StaticObject>,
	display_sprites: Vec<Raster>,
	composite_sprites: Vec<Raster>,
}

impl StaticObjects {
	/// Renders both sprite sets for `objects` using the atlas C `decoder`.
	///
	/// # Errors
	///
	/// Fails with the decoder's errors on the first sprite that cannot be built.
	pub fn build(objects: Vec<StaticObject>, decoder: &Decoder<'_>) -> Result<Self, AssetError> {
		let render_all = |style: SpriteStyle| {
			objects.iter().map(|object| style.render(object, decoder)).collect::<Result<Vec<_>, _>>()
		};
		let display_sprites = render_all(SpriteStyle::display())?;
		let composite_sprites = render_all(SpriteStyle::composite())?;
		debug!("{}: rendered {} sprite pairs", FileType::SObj, objects.len());

		Ok(Self {
			objects,
			display_sprites,
			composite_sprites,
		})
	}

	/// Parses a static object table and renders its sprites.
	///
	/// # Errors
	///
	/// Returns [`AssetError::SourceTruncated`] for short metadata, or the
	/// decoder's errors.
	pub fn from_bytes(data: &[u8], decoder: &Decoder<'_>) -> Result<Self, AssetError> {
		Self::build(from_bytes(data)?, decoder)
	}

	/// Reads a static object table from `path` and renders its sprites.
	///
	/// # Errors
	///
	/// Returns an error carrying the path if the file cannot be read, is
	/// malformed, or references tiles the decoder cannot produce.
	pub fn open(path: impl AsRef<Path>, decoder: &Decoder<'_>) -> Result<Self, AssetError> {
		let path = path.as_ref();
		std::fs::read(path)
			.map_err(AssetError::from)
			.and_then(|data| Self::from_bytes(&data, decoder))
			.map_err(|e| e.at(path))
	}

	/// Object metadata.
	#[inline]
	pub fn objects(&self) -> &[StaticObject] {
		&self.objects
	}

	/// Blue-keyed, padded sprites for browsing.
	#[inline]
	pub fn display_sprites(&self) -> &[Raster] {
		&self.display_sprites
	}

	/// Alpha-transparent sprites for map composition.
	#[inline]
	pub fn composite_sprites(&self) -> &[Raster] {
		&self.composite_sprites
	}

	/// Number of objects.
	#[inline]
	pub fn len(&self) -> usize {
		self.objects.len()
	}

	/// Returns `true` if the table has no objects.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.objects.is_empty()
	}

	/// Splits into metadata, display sprites and composite sprites.
	pub fn into_parts(self) -> (Vec<StaticObject>, Vec<Raster>, Vec<Raster>) {
		(self.objects, self.display_sprites, self.composite_sprites)
	}
}
