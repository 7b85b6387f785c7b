//! Contact sheets: many frames laid out in one raster for browsing.

use crate::file::Color;
use crate::render::Raster;

/// Grid layout of a contact sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SheetLayout {
	/// Frames per row; 0 puts every frame on a single row
	pub columns: usize,

	/// Gap between cells in pixels
	pub spacing: u32,

	/// Color of gaps and of cell area not covered by a frame
	pub background: Color,
}

impl SheetLayout {
	/// Tile browser layout: 14 columns, 1 pixel gaps.
	pub const TILES: Self = Self {
		columns: 14,
		spacing: 1,
		background: Color::BLACK,
	};

	/// Sprite browser layout: a single row, 1 pixel gaps.
	pub const SPRITES: Self = Self {
		columns: 0,
		spacing: 1,
		background: Color::BLACK,
	};
}

impl Default for SheetLayout {
	fn default() -> Self {
		Self::TILES
	}
}

/// Lays `items` out in a grid, row by row.
///
/// Every cell is as large as the largest item; items are drawn in the top-left
/// corner of their cell. An empty input yields a 0×0 raster.
pub fn contact_sheet<'a, I>(items: I, layout: SheetLayout) -> Raster
where
	I: IntoIterator<Item = &'a Raster>,
{
	let items: Vec<&Raster> = items.into_iter().collect();
	if items.is_empty() {
		return Raster::new(0, 0);
	}

	let cell_w = items.iter().map(|r| r.width()).max().unwrap_or(0);
	let cell_h = items.iter().map(|r| r.height()).max().unwrap_or(0);
	let columns = match layout.columns {
		0 => items.len(),
		n => n.min(items.len()),
	};
	let rows = items.len().div_ceil(columns);

	let span = |cells: usize, size: u32| cells as u32 * size + (cells as u32 - 1) * layout.spacing;
	let mut sheet = Raster::filled(span(columns, cell_w), span(rows, cell_h), layout.background);

	for (i, item) in items.into_iter().enumerate() {
		let (row, col) = (i / columns, i % columns);
		let x = col as u32 * (cell_w + layout.spacing);
		let y = row as u32 * (cell_h + layout.spacing);
		sheet.copy_from(item, i64::from(x), i64::from(y));
	}
	sheet
}
