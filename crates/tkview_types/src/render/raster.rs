//! RGBA raster buffers exchanged with export and presentation code.

use std::fmt;

use crate::file::Color;

/// Pixel layout of a [`Raster`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelFormat {
	/// 8 bits per channel, `R, G, B, A` order
	#[default]
	Rgba8,
}

impl PixelFormat {
	/// Bytes used by a single pixel.
	pub const fn bytes_per_pixel(self) -> usize {
		match self {
			Self::Rgba8 => 4,
		}
	}
}

/// An owned, row-major RGBA image.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Raster {
	width: u32,
	height: u32,
	pixels: Vec<u8>,
}

impl Raster {
	/// Creates a fully transparent raster.
	pub fn new(width: u32, height: u32) -> Self {
		Self::filled(width, height, Color::transparent())
	}

	/// Creates a raster where every pixel is `color`.
	pub fn filled(width: u32, height: u32, color: Color) -> Self {
		let pixels = color.to_array().repeat(width as usize * height as usize);
		Self {
			width,
			height,
			pixels,
		}
	}

	/// Wraps existing RGBA bytes.
	///
	/// Returns `None` if `pixels` does not hold exactly `width × height` pixels.
	pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
		let expected = width as usize * height as usize * PixelFormat::Rgba8.bytes_per_pixel();
		(pixels.len() == expected).then_some(Self {
			width,
			height,
			pixels,
		})
	}

	/// Width in pixels.
	#[inline]
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Height in pixels.
	#[inline]
	pub fn height(&self) -> u32 {
		self.height
	}

	/// Pixel format of the buffer.
	#[inline]
	pub fn format(&self) -> PixelFormat {
		PixelFormat::Rgba8
	}

	/// Raw RGBA bytes.
	#[inline]
	pub fn pixels(&self) -> &[u8] {
		&self.pixels
	}

	/// Consumes the raster, returning its RGBA bytes.
	#[inline]
	pub fn into_pixels(self) -> Vec<u8> {
		self.pixels
	}

	#[inline]
	fn offset(&self, x: u32, y: u32) -> usize {
		(y as usize * self.width as usize + x as usize) * 4
	}

	/// Gets the pixel at `(x, y)`, or `None` if out of bounds.
	pub fn get(&self, x: u32, y: u32) -> Option<Color> {
		if x >= self.width || y >= self.height {
			return None;
		}
		let at = self.offset(x, y);
		let p = &self.pixels[at..at + 4];
		Some(Color::new(p[0], p[1], p[2], p[3]))
	}

	/// Sets the pixel at `(x, y)`.
	///
	/// Returns `false` if the coordinates are out of bounds.
	pub fn put(&mut self, x: u32, y: u32, color: Color) -> bool {
		if x >= self.width || y >= self.height {
			return false;
		}
		let at = self.offset(x, y);
		self.pixels[at..at + 4].copy_from_slice(&color.to_array());
		true
	}

	/// Packed `R, G, B` bytes with the alpha channel dropped.
	pub fn rgb_bytes(&self) -> Vec<u8> {
		self.pixels.chunks_exact(4).flat_map(|p| [p[0], p[1], p[2]]).collect()
	}

	/// Copies `src` onto this raster with its top-left corner at `(x, y)`,
	/// replacing every covered pixel including its alpha.
	///
	/// Parts of `src` that fall outside this raster are discarded.
	pub fn copy_from(&mut self, src: &Raster, x: i64, y: i64) {
		self.paste(src, x, y, |_, s| s);
	}

	/// Composites `src` over this raster with its top-left corner at `(x, y)`.
	///
	/// Every channel is interpolated by the source alpha: fully transparent
	/// source pixels leave the destination untouched and fully opaque ones
	/// replace it. Parts of `src` that fall outside this raster are discarded.
	pub fn blend_from(&mut self, src: &Raster, x: i64, y: i64) {
		self.paste(src, x, y, |d, s| {
			let a = u32::from(s[3]);
			match a {
				0 => d,
				255 => s,
				_ => {
					let mix = |s: u8, d: u8| {
						((u32::from(s) * a + u32::from(d) * (255 - a) + 127) / 255) as u8
					};
					[mix(s[0], d[0]), mix(s[1], d[1]), mix(s[2], d[2]), mix(s[3], d[3])]
				}
			}
		});
	}

	fn paste<F>(&mut self, src: &Raster, x: i64, y: i64, op: F)
	where
		F: Fn([u8; 4], [u8; 4]) -> [u8; 4],
	{
		let x0 = x.max(0);
		let y0 = y.max(0);
		let x1 = (x + i64::from(src.width)).min(i64::from(self.width));
		let y1 = (y + i64::from(src.height)).min(i64::from(self.height));
		if x0 >= x1 || y0 >= y1 {
			return;
		}

		for dy in y0..y1 {
			for dx in x0..x1 {
				let s_at = src.offset((dx - x) as u32, (dy - y) as u32);
				let d_at = self.offset(dx as u32, dy as u32);
				let s = [
					src.pixels[s_at],
					src.pixels[s_at + 1],
					src.pixels[s_at + 2],
					src.pixels[s_at + 3],
				];
				let d = [
					self.pixels[d_at],
					self.pixels[d_at + 1],
					self.pixels[d_at + 2],
					self.pixels[d_at + 3],
				];
				self.pixels[d_at..d_at + 4].copy_from_slice(&op(d, s));
			}
		}
	}
}

impl fmt::Debug for Raster {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Raster")
			.field("width", &self.width)
			.field("height", &self.height)
			.field("format", &self.format())
			.finish_non_exhaustive()
	}
}

impl fmt::Display for Raster {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}×{} RGBA", self.width, self.height)
	}
}
