//! Raster output: map composition and tile sheets.

pub mod compose;
pub mod raster;
pub mod sheet;

pub use compose::{CellCursor, Compositor, compose};
pub use raster::{PixelFormat, Raster};
pub use sheet::{SheetLayout, contact_sheet};
