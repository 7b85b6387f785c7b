//! This crate provides core data types and file format support for the `tkview-rs` project.
//!
//! # File Formats
//!
//! - **TBL**: Frame tables locating tiles inside a pixel store, and static object tables
//! - **PAL**: 256-color RGB palettes
//! - **EPF**: Tile pixel stores holding 24×24 indexed tiles
//! - **MAP**: Map grids of base tile and static object references
//!
//! # Pipeline
//!
//! Atlases are loaded by stem, static objects are rendered from atlas C, and a
//! map is composed from atlases A and B plus the static object sprites:
//!
//! ```no_run
//! use tkview_types::prelude::*;
//!
//! # fn main() -> Result<(), AssetError> {
//! let tile_a = load_atlas("Data/TileA")?;
//! let tile_b = load_atlas("Data/TileB")?;
//! let tile_c = load_atlas("Data/TileC")?;
//! let objects = load_static_objects("Data/SObj.tbl", &tile_c)?;
//!
//! let map = load_map("Data/town.map")?;
//! let raster = compose(
//! 	&map,
//! 	tile_a.frames(),
//! 	tile_b.frames(),
//! 	objects.objects(),
//! 	objects.composite_sprites(),
//! )?;
//! assert_eq!(raster.width(), u32::from(map.width()) * 24);
//! # Ok(())
//! # }
//! ```

pub mod atlas;
pub mod config;
pub mod file;
pub mod pipeline;
pub mod render;

/// `use tkview_types::prelude::*;` to import commonly used items.
pub mod prelude;
