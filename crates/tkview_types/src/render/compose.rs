//! Map composition.
//!
//! Flattens a [`MapGrid`] into one raster: each cell paints its base tile,
//! then any static object anchored to the cell is alpha-composited on top,
//! shifted up by `height - 1` rows so tall objects overlap the rows above.
//!
//! Cells are placed by a `(length, depth)` cursor rather than by `i % width`
//! and `i / width`. The cursor advances after each cell and rolls over to the
//! next row when `(i + 1) % width == 0 && i != 0`. The `i != 0` guard only
//! changes anything for one-column maps, where cell 0 does not roll over and
//! every later cell lands one row higher (cell 1 falls off the right edge).

use log::debug;

use crate::file::{
	AssetError, Color, Frame, MapGrid, ReferenceKind, StaticObject, StaticObjects, TILE_HEIGHT,
	TILE_WIDTH, TileRef,
};
use crate::render::Raster;

/// Row-major placement cursor over map cells.
///
/// Yields `(index, length, depth)` for each cell, where `length` is the column
/// and `depth` the row the cell is drawn at.
#[derive(Debug, Clone)]
pub struct CellCursor {
	width: usize,
	count: usize,
	index: usize,
	length: i64,
	depth: i64,
}

impl CellCursor {
	/// Creates a cursor over `count` cells of a `width`-column map.
	pub fn new(width: usize, count: usize) -> Self {
		Self {
			width,
			count,
			index: 0,
			length: 0,
			depth: 0,
		}
	}
}

impl Iterator for CellCursor {
	type Item = (usize, i64, i64);

	fn next(&mut self) -> Option<Self::Item> {
		if self.index >= self.count || self.width == 0 {
			return None;
		}
		let item = (self.index, self.length, self.depth);

		let i = self.index;
		if (i + 1) % self.width == 0 && i != 0 {
			self.depth += 1;
			self.length = 0;
		} else {
			self.length += 1;
		}
		self.index += 1;

		Some(item)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = if self.width == 0 {
			0
		} else {
			self.count - self.index
		};
		(remaining, Some(remaining))
	}
}

impl ExactSizeIterator for CellCursor {}

/// Composes maps onto a background color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Compositor {
	background: Color,
}

impl Compositor {
	/// Creates a compositor with an opaque black background.
	pub const fn new() -> Self {
		Self {
			background: Color::BLACK,
		}
	}

	/// Sets the color of the canvas and of empty cells.
	pub const fn with_background(mut self, background: Color) -> Self {
		self.background = background;
		self
	}

	/// Background color.
	#[inline]
	pub const fn background(&self) -> Color {
		self.background
	}

	/// Renders `map` into a raster of `width × 24` by `height × 24` pixels.
	///
	/// `objects` and `sprites` are index-aligned; a cell's static object
	/// reference selects from both.
	///
	/// # Errors
	///
	/// Returns [`AssetError::MissingReference`] on the first cell naming a
	/// frame, object or sprite that does not exist, and
	/// [`AssetError::EmptyStaticObject`] on a cell placing an object with no
	/// tile rows. No partial raster is returned.
	pub fn compose(
		&self,
		map: &MapGrid,
		tiles_a: &[Frame],
		tiles_b: &[Frame],
		objects: &[StaticObject],
		sprites: &[Raster],
	) -> Result<Raster, AssetError> {
		let width = u32::from(map.width());
		let height = u32::from(map.height());
		let mut canvas = Raster::filled(width * TILE_WIDTH, height * TILE_HEIGHT, self.background);
		let empty = Raster::filled(TILE_WIDTH, TILE_HEIGHT, self.background);

		let tile_w = i64::from(TILE_WIDTH);
		let tile_h = i64::from(TILE_HEIGHT);
		let cells = map.cells();
		for (i, length, depth) in CellCursor::new(map.width() as usize, cells.len()) {
			let cell = &cells[i];
			let tile = match cell.tile() {
				TileRef::B(n) => tiles_b
					.get(n)
					.map(Frame::raster)
					.ok_or_else(|| AssetError::missing_reference(ReferenceKind::AtlasB, n, tiles_b.len()))?,
				TileRef::A(n) => tiles_a
					.get(n)
					.map(Frame::raster)
					.ok_or_else(|| AssetError::missing_reference(ReferenceKind::AtlasA, n, tiles_a.len()))?,
				TileRef::Background => &empty,
			};
			canvas.copy_from(tile, length * tile_w, depth * tile_h);

			let Some(n) = cell.static_object() else {
				continue;
			};
			let object = objects.get(n).ok_or_else(|| {
				AssetError::missing_reference(ReferenceKind::StaticObject, n, objects.len())
			})?;
			if object.height() == 0 {
				return Err(AssetError::EmptyStaticObject {
					index: n,
				});
			}
			let sprite = sprites
				.get(n)
				.ok_or_else(|| AssetError::missing_reference(ReferenceKind::Sprite, n, sprites.len()))?;
			let rise = i64::from(object.height()) - 1;
			canvas.blend_from(sprite, length * tile_w, (depth - rise) * tile_h);
		}

		debug!("composed {map} into {canvas}");
		Ok(canvas)
	}

	/// Renders `map` using the composite sprites of a static object set.
	///
	/// # Errors
	///
	/// See [`Self::compose`].
	pub fn compose_with(
		&self,
		map: &MapGrid,
		tiles_a: &[Frame],
		tiles_b: &[Frame],
		static_objects: &StaticObjects,
	) -> Result<Raster, AssetError> {
		self.compose(
			map,
			tiles_a,
			tiles_b,
			static_objects.objects(),
			static_objects.composite_sprites(),
		)
	}
}

impl Default for Compositor {
	fn default() -> Self {
		Self::new()
	}
}

/// Renders `map` onto an opaque black background.
///
/// # Errors
///
/// See [`Compositor::compose`].
pub fn compose(
	map: &MapGrid,
	tiles_a: &[Frame],
	tiles_b: &[Frame],
	objects: &[StaticObject],
	sprites: &[Raster],
) -> Result<Raster, AssetError> {
	Compositor::new().compose(map, tiles_a, tiles_b, objects, sprites)
}
