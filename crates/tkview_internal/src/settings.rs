//! Layered settings: built-in defaults, an optional TOML file, then
//! `TKVIEW_*` environment variables.
//!
//! ```text
//! [assets]
//! data_dir = "Data"
//! tile_a = "TileA"
//! static_objects = "SObj"
//!
//! [export]
//! format = "png"
//! sheet_columns = 14
//! ```
//!
//! Environment keys use `__` between sections: `TKVIEW_ASSETS__DATA_DIR`,
//! `TKVIEW_EXPORT__FORMAT`.

use std::path::Path;

use config::{Config, Environment, File};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tkview_types::config::AssetPaths;
use tkview_types::render::SheetLayout;

use crate::export::ImageFormat;

/// Prefix of environment variables read by [`load_settings`]
pub const ENV_PREFIX: &str = "TKVIEW";

/// File name (without extension) looked up when no settings file is given
pub const DEFAULT_FILE: &str = "tkview";

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
	/// A source could not be read or the merged values do not fit [`Settings`]
	#[error("Settings error: {0}")]
	Config(#[from] config::ConfigError),
}

/// Export and contact sheet options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
	/// Image format for exported files
	pub format: ImageFormat,

	/// Columns per contact sheet row; 0 puts everything on one row
	pub sheet_columns: usize,

	/// Pixels between contact sheet cells
	pub sheet_spacing: u32,
}

impl ExportSettings {
	/// Contact sheet layout for these options.
	pub fn sheet_layout(&self) -> SheetLayout {
		SheetLayout {
			columns: self.sheet_columns,
			spacing: self.sheet_spacing,
			..SheetLayout::TILES
		}
	}
}

impl Default for ExportSettings {
	fn default() -> Self {
		Self {
			format: ImageFormat::Bmp,
			sheet_columns: SheetLayout::TILES.columns,
			sheet_spacing: SheetLayout::TILES.spacing,
		}
	}
}

/// Everything a viewer session is configured with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	/// Asset file locations
	pub assets: AssetPaths,

	/// Export options
	pub export: ExportSettings,
}

/// Loads settings from defaults, a TOML file and the environment.
///
/// An explicit `file` must exist. Without one, `tkview.toml` in the working
/// directory is used when present.
///
/// # Errors
///
/// Returns [`SettingsError::Config`] if the file cannot be parsed or a value
/// has the wrong type.
pub fn load_settings(file: Option<&Path>) -> Result<Settings, SettingsError> {
	load_settings_with(file, environment())
}

fn environment() -> Environment {
	Environment::with_prefix(ENV_PREFIX).prefix_separator("_").separator("__").try_parsing(true)
}

fn load_settings_with(file: Option<&Path>, env: Environment) -> Result<Settings, SettingsError> {
	let file = match file {
		Some(path) => File::from(path).required(true),
		None => File::with_name(DEFAULT_FILE).required(false),
	};

	let settings: Settings = Config::builder()
		.add_source(Config::try_from(&Settings::default())?)
		.add_source(file)
		.add_source(env)
		.build()?
		.try_deserialize()?;
	debug!("settings: {settings:?}");
	Ok(settings)
}
