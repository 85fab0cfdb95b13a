//! Share raster encoding
//!
//! Shares are written as 8-bit grayscale PNGs holding only the two
//! [`SHARE_POLARITY`] levels, so decoding is lossless.

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageOutputFormat};

use crate::error::{Result, VssError};
use crate::models::{BitGrid, SHARE_POLARITY, Share};
use crate::normalize::{NormalizeOptions, normalize};

/// Largest raster, in pixels, the renderer will allocate
pub const MAX_RENDER_PIXELS: usize = 1 << 28;

/// Draw a grid as a grayscale image
///
/// Each cell becomes a `scale x scale` block (scale 0 counts as 1), framed by
/// `margin` pixels of the bit-0 level on every side. Rasters over
/// [`MAX_RENDER_PIXELS`] or past `u32` sides fail with `ImageWrite`.
pub fn render_gray(grid: &BitGrid, scale: u32, margin: u32) -> Result<GrayImage> {
    let scale = scale.max(1) as usize;
    let margin = margin as usize;
    let side = |cells: usize| {
        cells
            .checked_mul(scale)
            .and_then(|px| px.checked_add(margin.checked_mul(2)?))
    };
    let too_large = || {
        VssError::ImageWrite(format!(
            "{}x{} cells at scale {} exceeds image limits",
            grid.width(),
            grid.height(),
            scale
        ))
    };

    let (width, height) = side(grid.width())
        .zip(side(grid.height()))
        .ok_or_else(too_large)?;
    let w = u32::try_from(width).map_err(|_| too_large())?;
    let h = u32::try_from(height).map_err(|_| too_large())?;
    let total = width
        .checked_mul(height)
        .filter(|&n| n <= MAX_RENDER_PIXELS)
        .ok_or_else(too_large)?;

    let background = SHARE_POLARITY.level(false);
    let mut pixels = vec![background; total];
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if !grid.get(x, y) {
                continue;
            }
            let level = SHARE_POLARITY.level(true);
            for dy in 0..scale {
                let row = (margin + y * scale + dy) * width;
                let start = row + margin + x * scale;
                pixels[start..start + scale].fill(level);
            }
        }
    }

    GrayImage::from_raw(w, h, pixels).ok_or_else(too_large)
}

/// Encode a grid as a share PNG
pub fn encode_grid(grid: &BitGrid, scale: u32) -> Result<Vec<u8>> {
    if grid.is_empty() {
        return Err(VssError::EmptyImage);
    }
    let img = render_gray(grid, scale, 0)?;
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(img)
        .write_to(&mut buf, ImageOutputFormat::Png)
        .map_err(|e| VssError::ImageWrite(e.to_string()))?;
    Ok(buf.into_inner())
}

/// Encode a share as a PNG
pub fn encode_share(share: &Share, scale: u32) -> Result<Vec<u8>> {
    encode_grid(&share.grid, scale)
}

/// Decode a share PNG (or any supported raster) at its own resolution
pub fn decode_share(bytes: &[u8]) -> Result<BitGrid> {
    normalize(bytes, &NormalizeOptions::default())
}
