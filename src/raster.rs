//! Filtered RGBA scanline buffer

use crate::error::Result;
use crate::png::{raster_len, validate_dimensions};
use image::{Rgba, RgbaImage};

/// Straight (non-premultiplied) 8-bit RGBA.
pub type Pixel = Rgba<u8>;

pub const TRANSPARENT: Pixel = Rgba([0, 0, 0, 0]);

/// Row-major RGBA scanlines, each led by a filter-type byte of `0`.
///
/// Every row is exactly `1 + 4 * width` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl Raster {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    fn stride(&self) -> usize {
        1 + 4 * self.width as usize
    }

    /// One scanline including its leading filter byte.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride();
        &self.bytes[start..start + self.stride()]
    }

    pub fn pixel(&self, x: u32, y: u32) -> Pixel {
        let at = 1 + 4 * x as usize;
        let row = self.row(y);
        Rgba([row[at], row[at + 1], row[at + 2], row[at + 3]])
    }

    /// Drop the filter bytes and hand the pixels over as an [`RgbaImage`].
    pub fn into_rgba_image(self) -> RgbaImage {
        let stride = self.stride();
        let mut pixels = Vec::with_capacity(self.width as usize * self.height as usize * 4);
        for row in self.bytes.chunks_exact(stride) {
            pixels.extend_from_slice(&row[1..]);
        }
        RgbaImage::from_raw(self.width, self.height, pixels)
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }
}

/// Evaluate `pixel_fn` at every coordinate, top-to-bottom and left-to-right,
/// prefixing each row with filter type `0`.
pub fn synthesize<F>(width: u32, height: u32, mut pixel_fn: F) -> Result<Raster>
where
    F: FnMut(u32, u32) -> Pixel,
{
    validate_dimensions(width, height)?;

    let mut bytes = Vec::with_capacity(raster_len(width, height));
    for y in 0..height {
        bytes.push(0);
        for x in 0..width {
            bytes.extend_from_slice(&pixel_fn(x, y).0);
        }
    }

    Ok(Raster {
        width,
        height,
        bytes,
    })
}
