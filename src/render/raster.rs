use crate::error::{Error, Result};
use crate::models::ModuleMatrix;
use image::{ImageFormat, Rgba, RgbaImage};
use rayon::prelude::*;
use std::io::{Seek, Write};
use std::path::Path;

/// Pixel color used for dark and light modules
pub type Color = Rgba<u8>;

/// Opaque black
pub const BLACK: Color = Rgba([0, 0, 0, 255]);
/// Opaque white
pub const WHITE: Color = Rgba([255, 255, 255, 255]);

/// Images with at least this many pixels are filled row-parallel
const PARALLEL_MIN_PIXELS: usize = 512 * 512;

/// Largest output side in pixels (1 GiB of RGBA)
pub const MAX_IMAGE_SIDE: u32 = 16_384;

/// Square RGBA image of a rendered module matrix.
///
/// Owned by the caller; the renderer keeps no reference to it.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pixels: RgbaImage,
    pixels_per_module: u32,
}

impl RasterImage {
    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels (always equal to width)
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Magnification used when rendering
    pub fn pixels_per_module(&self) -> u32 {
        self.pixels_per_module
    }

    /// Pixel at (x, y)
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        *self.pixels.get_pixel(x, y)
    }

    /// Borrow the underlying image buffer
    pub fn as_image(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Encode as PNG into `writer`
    pub fn write_png<W: Write + Seek>(&self, writer: &mut W) -> Result<()> {
        self.pixels.write_to(writer, ImageFormat::Png)?;
        Ok(())
    }

    /// Save as a PNG file
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.pixels.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

/// Pixel side of a `side`-module matrix at `pixels_per_module`, checked
/// against zero scale and [`MAX_IMAGE_SIDE`].
fn output_side(side: usize, pixels_per_module: u32) -> Result<u32> {
    if pixels_per_module == 0 {
        return Err(Error::InvalidScale(pixels_per_module));
    }
    u32::try_from(side)
        .ok()
        .and_then(|side| side.checked_mul(pixels_per_module))
        .filter(|&size| size <= MAX_IMAGE_SIDE)
        .ok_or(Error::InvalidScale(pixels_per_module))
}

/// Render a module matrix into a square RGBA image.
///
/// Module (row, col) becomes the `pixels_per_module` square block whose top-left
/// pixel is `(col * p, row * p)`.
pub fn render(
    matrix: &ModuleMatrix,
    pixels_per_module: u32,
    dark: Color,
    light: Color,
) -> Result<RasterImage> {
    let size = output_side(matrix.side(), pixels_per_module)?;

    let mut pixels = RgbaImage::new(size, size);
    let block = pixels_per_module as usize;
    let row_bytes = size as usize * 4;

    let fill_row = |(y, row): (usize, &mut [u8])| {
        let module_row = y / block;
        for (col, span) in row.chunks_exact_mut(block * 4).enumerate() {
            let color = if matrix.get(module_row, col) { dark } else { light };
            for px in span.chunks_exact_mut(4) {
                px.copy_from_slice(&color.0);
            }
        }
    };

    let buffer: &mut [u8] = &mut pixels;
    if (size as usize) * (size as usize) >= PARALLEL_MIN_PIXELS {
        buffer.par_chunks_mut(row_bytes).enumerate().for_each(fill_row);
    } else {
        buffer.chunks_mut(row_bytes).enumerate().for_each(fill_row);
    }

    Ok(RasterImage {
        pixels,
        pixels_per_module,
    })
}
