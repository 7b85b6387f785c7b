#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `tkview-rs` reads the tile atlases, palettes, maps and static objects of an
//! old tile-based online game, and composes maps into plain RGBA rasters.
//!
//! ```no_run
//! use tkview_rs::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Session::load(AssetPaths::new("Data"))?;
//! for set in TileSet::ALL {
//! 	session.export(set, "export", ImageFormat::Bmp)?;
//! }
//! # Ok(())
//! # }
//! ```
//!
pub use tkview_internal::*;
