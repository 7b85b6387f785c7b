//! Writing frames, sprites and composed maps to image files.
//!
//! Frame sets are written one file per frame, named
//! `<prefix>_<index>.<ext>` with the index zero-padded to the number of digits
//! in the frame count (`tileA_007.bmp` for a 120-frame atlas).

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use image::{RgbImage, RgbaImage};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tkview_types::render::Raster;

/// Errors raised while exporting images.
#[derive(Debug, Error)]
pub enum ExportError {
	/// The image encoder failed
	#[error("Failed to write {}: {source}", path.display())]
	Image {
		/// Destination path
		path: PathBuf,
		/// Encoder error
		#[source]
		source: image::ImageError,
	},

	/// The destination directory could not be created
	#[error("IO error: {0}")]
	IOError(#[from] std::io::Error),

	/// A raster's pixel buffer does not match its dimensions
	#[error("Invalid raster: {width}x{height}")]
	InvalidRaster {
		/// Raster width
		width: u32,
		/// Raster height
		height: u32,
	},

	/// A frame index outside the exported set
	#[error("Frame {index} out of range: {count} frames")]
	FrameOutOfRange {
		/// Requested index
		index: usize,
		/// Number of frames
		count: usize,
	},
}

/// Output image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
	/// 24-bit BMP; alpha is dropped
	#[default]
	Bmp,

	/// 32-bit PNG with alpha
	Png,
}

impl ImageFormat {
	/// File extension without the dot.
	pub const fn extension(self) -> &'static str {
		match self {
			Self::Bmp => "bmp",
			Self::Png => "png",
		}
	}

	/// Picks a format from a path's extension, if it names one.
	pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
		let ext = path.as_ref().extension()?.to_str()?;
		ext.parse().ok()
	}

	const fn to_image_format(self) -> image::ImageFormat {
		match self {
			Self::Bmp => image::ImageFormat::Bmp,
			Self::Png => image::ImageFormat::Png,
		}
	}
}

impl fmt::Display for ImageFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.extension())
	}
}

impl FromStr for ImageFormat {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"bmp" => Ok(Self::Bmp),
			"png" => Ok(Self::Png),
			other => Err(format!("unsupported image format: {other}")),
		}
	}
}

/// Converts a raster to an `image` RGBA buffer.
///
/// # Errors
///
/// Returns [`ExportError::InvalidRaster`] if the pixel buffer is inconsistent.
pub fn to_rgba_image(raster: &Raster) -> Result<RgbaImage, ExportError> {
	RgbaImage::from_raw(raster.width(), raster.height(), raster.pixels().to_vec()).ok_or(
		ExportError::InvalidRaster {
			width: raster.width(),
			height: raster.height(),
		},
	)
}

/// Writes one raster to `path`.
///
/// # Errors
///
/// Returns [`ExportError::Image`] if encoding or writing fails.
pub fn save_raster(raster: &Raster, path: impl AsRef<Path>, format: ImageFormat) -> Result<(), ExportError> {
	let path = path.as_ref();
	let invalid = || ExportError::InvalidRaster {
		width: raster.width(),
		height: raster.height(),
	};
	let result = match format {
		ImageFormat::Bmp => RgbImage::from_raw(raster.width(), raster.height(), raster.rgb_bytes())
			.ok_or_else(invalid)?
			.save_with_format(path, format.to_image_format()),
		ImageFormat::Png => to_rgba_image(raster)?.save_with_format(path, format.to_image_format()),
	};
	result.map_err(|source| ExportError::Image {
		path: path.to_path_buf(),
		source,
	})?;
	debug!("wrote {raster} to {}", path.display());
	Ok(())
}

/// File name for frame `index` of a `count`-frame set.
pub fn frame_file_name(prefix: &str, index: usize, count: usize, format: ImageFormat) -> String {
	let width = count.to_string().len();
	format!("{prefix}_{index:0width$}.{}", format.extension())
}

/// Writes every raster of a set into `dir`, creating it if needed.
///
/// Returns the written paths in frame order.
///
/// # Errors
///
/// Fails on the first raster that cannot be written.
pub fn export_frames(
	rasters: &[&Raster],
	dir: impl AsRef<Path>,
	prefix: &str,
	format: ImageFormat,
) -> Result<Vec<PathBuf>, ExportError> {
	let dir = dir.as_ref();
	std::fs::create_dir_all(dir)?;

	let count = rasters.len();
	let mut written = Vec::with_capacity(count);
	for (index, raster) in rasters.iter().enumerate() {
		let path = dir.join(frame_file_name(prefix, index, count, format));
		save_raster(raster, &path, format)?;
		written.push(path);
	}

	info!("exported {count} {prefix} images to {}", dir.display());
	Ok(written)
}

/// Writes frame `index` of a set to `path`.
///
/// # Errors
///
/// Returns [`ExportError::FrameOutOfRange`] for an index outside the set, or
/// the write error.
pub fn export_frame(
	rasters: &[&Raster],
	index: usize,
	path: impl AsRef<Path>,
	format: ImageFormat,
) -> Result<(), ExportError> {
	let raster = rasters.get(index).ok_or(ExportError::FrameOutOfRange {
		index,
		count: rasters.len(),
	})?;
	save_raster(raster, path, format)
}
