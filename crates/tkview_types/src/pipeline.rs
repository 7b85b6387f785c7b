//! Function-style entry points of the decode/compose pipeline.
//!
//! These are the operations presentation code calls. Every loaded value is
//! read-only; composing never modifies its inputs.

use std::path::Path;

use crate::atlas::Atlas;
use crate::file::{AssetError, MapGrid, StaticObjects};

pub use crate::render::compose;

/// Loads and decodes the atlas whose files share `stem`.
///
/// # Errors
///
/// See [`Atlas::load`].
pub fn load_atlas(stem: impl AsRef<Path>) -> Result<Atlas, AssetError> {
	Atlas::load(stem)
}

/// Loads a map grid.
///
/// # Errors
///
/// See [`MapGrid::open`].
pub fn load_map(path: impl AsRef<Path>) -> Result<MapGrid, AssetError> {
	MapGrid::open(path)
}

/// Loads a static object table and renders its sprites from `atlas`.
///
/// # Errors
///
/// See [`StaticObjects::open`].
pub fn load_static_objects(
	path: impl AsRef<Path>,
	atlas: &Atlas,
) -> Result<StaticObjects, AssetError> {
	StaticObjects::open(path, &atlas.decoder())
}
