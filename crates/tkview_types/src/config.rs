//! Where asset files live.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Locations of the asset families a session loads.
///
/// Atlas and table entries are stems relative to `data_dir`; the loader appends
/// `.tbl`, `.epf` and `<N>.pal` to atlas stems and `.tbl` to the object table
/// stem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
	/// Directory holding every asset file
	pub data_dir: PathBuf,

	/// Atlas A stem (ground tiles)
	pub tile_a: String,

	/// Atlas B stem (second ground tile set)
	pub tile_b: String,

	/// Atlas C stem (static object tiles)
	pub tile_c: String,

	/// Static object table stem
	pub static_objects: String,
}

impl AssetPaths {
	/// Default asset layout rooted at `data_dir`.
	pub fn new(data_dir: impl Into<PathBuf>) -> Self {
		Self {
			data_dir: data_dir.into(),
			..Self::default()
		}
	}

	/// Atlas A stem path.
	pub fn tile_a_stem(&self) -> PathBuf {
		self.data_dir.join(&self.tile_a)
	}

	/// Atlas B stem path.
	pub fn tile_b_stem(&self) -> PathBuf {
		self.data_dir.join(&self.tile_b)
	}

	/// Atlas C stem path.
	pub fn tile_c_stem(&self) -> PathBuf {
		self.data_dir.join(&self.tile_c)
	}

	/// Static object table path.
	pub fn static_objects_path(&self) -> PathBuf {
		self.data_dir.join(format!("{}.tbl", self.static_objects))
	}

	/// Resolves a map path: absolute paths are kept, relative ones are taken
	/// from the data directory.
	pub fn map_path(&self, map: impl AsRef<Path>) -> PathBuf {
		let map = map.as_ref();
		if map.is_absolute() {
			map.to_path_buf()
		} else {
			self.data_dir.join(map)
		}
	}
}

impl Default for AssetPaths {
	fn default() -> Self {
		Self {
			data_dir: PathBuf::from("Data"),
			tile_a: "TileA".to_string(),
			tile_b: "TileB".to_string(),
			tile_c: "TileC".to_string(),
			static_objects: "SObj".to_string(),
		}
	}
}
