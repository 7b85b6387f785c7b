//! Session, settings and export support for `tkview-rs`.
//!
//! This crate sits between the format types in `tkview_types` and the
//! `tkview-rs` facade, and should not be used directly.

pub mod export;
pub mod session;
pub mod settings;

/// `use tkview_rs::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export tkview_types for convenience
pub use tkview_types;

// Re-export commonly used types at crate root
pub use export::{ExportError, ImageFormat};
pub use session::{Session, TileSet};
pub use settings::{ExportSettings, Settings, SettingsError, load_settings};
