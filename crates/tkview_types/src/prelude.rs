//! Prelude module for `tkview_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and constants.
//!
//! # Examples
//!
//! ```no_run
//! use tkview_types::prelude::*;
//!
//! let map = MapGrid::new(1, 1, vec![MapCell::new(0, 0)]).unwrap();
//! let raster = compose(&map, &[], &[], &[], &[]).unwrap();
//! assert_eq!(raster.get(0, 0), Some(Color::BLACK));
//! ```

// File module types
#[doc(inline)]
pub use crate::file::{
	// Errors
	AssetError,
	// Pixel store types
	EpfDecoder,
	EpfFile,
	FileType,
	Frame,
	FrameDecodeError,

	// Map types
	MapCell,
	MapGrid,

	// Palette types
	Color,
	Palette,
	ReferenceKind,

	// Static object types
	SpriteStyle,
	StaticObject,
	StaticObjects,

	// Constants
	TILE_B_OFFSET,
	TILE_BYTES,
	TILE_HEIGHT,
	TILE_WIDTH,

	// Table types
	TableEntry,
	TableIndex,
	TileRef,
	Transparency,
};

// Rendering types
#[doc(inline)]
pub use crate::render::{CellCursor, Compositor, PixelFormat, Raster, SheetLayout, contact_sheet};

#[doc(inline)]
pub use crate::atlas::Atlas;

#[doc(inline)]
pub use crate::config::AssetPaths;

#[doc(inline)]
pub use crate::pipeline::{compose, load_atlas, load_map, load_static_objects};

// Re-export the file module for advanced usage
#[doc(inline)]
pub use crate::file;
