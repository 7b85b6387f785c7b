//! Asset file format support for `tkview-rs`.

mod error;

pub mod epf;
pub mod map;
pub mod pal;
pub mod sobj;
pub mod tbl;

/// Width of a tile in pixels
pub const TILE_WIDTH: u32 = 24;

/// Height of a tile in pixels
pub const TILE_HEIGHT: u32 = 24;

/// Number of pixels in a tile
pub const TILE_PIXELS: usize = (TILE_WIDTH * TILE_HEIGHT) as usize;

/// Size of a tile block in an `.epf` pixel store (1728 bytes / 0x06C0)
pub const TILE_BYTES: usize = 0x06C0;

/// First base tile reference that selects atlas B
pub const TILE_B_OFFSET: u32 = 49151;

// Re-export unified error type
pub use error::{AssetError, FileType, FrameDecodeError, ReferenceKind};

// Re-export main file types
pub use epf::{Decoder as EpfDecoder, File as EpfFile, Frame, Transparency};
pub use map::{MapCell, MapGrid, TileRef};
pub use pal::{Color, Palette};
pub use sobj::{SpriteStyle, StaticObject, StaticObjects};
pub use tbl::{TableEntry, TableIndex};
