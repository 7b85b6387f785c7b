//! Prelude module for `tkview_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```no_run
//! use tkview_internal::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = load_settings(None)?;
//! let session = Session::load(settings.assets)?;
//! let raster = session.render_map("town.map")?;
//! save_raster(&raster, "town.png", ImageFormat::Png)?;
//! # Ok(())
//! # }
//! ```

// Re-export everything from tkview_types::prelude
#[doc(inline)]
pub use tkview_types::prelude::*;

#[doc(inline)]
pub use crate::export::{ExportError, ImageFormat, export_frame, export_frames, save_raster};

#[doc(inline)]
pub use crate::session::{Session, TileSet};

#[doc(inline)]
pub use crate::settings::{ExportSettings, Settings, SettingsError, load_settings};

// Re-export the entire tkview_types module for advanced usage
#[doc(inline)]
pub use tkview_types;
