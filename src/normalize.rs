//! Bitmap normalizer: raw image bytes to a bit grid
//!
//! Decode, reduce to one intensity channel, resample (nearest neighbor only),
//! then binarize under [`SHARE_POLARITY`].

use image::{DynamicImage, GenericImageView};
use tracing::debug;

use crate::error::{Result, VssError};
use crate::models::{BitGrid, DEFAULT_THRESHOLD, SHARE_POLARITY};
use crate::utils::binarization::threshold_binarize;
use crate::utils::grayscale::{rgb_to_grayscale, rgba_to_grayscale};
use crate::utils::resize::resize_gray_nearest;

/// Output resolution of the normalizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetSize {
    /// Keep the image's own pixel size
    #[default]
    Native,
    /// Resample to exactly this size
    Exact {
        /// Target width in pixels
        width: usize,
        /// Target height in pixels
        height: usize,
    },
}

/// Normalizer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Output resolution
    pub target: TargetSize,
    /// `intensity <= threshold` becomes 1
    pub threshold: u8,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            target: TargetSize::Native,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl NormalizeOptions {
    /// Native size with a custom threshold
    pub fn native(threshold: u8) -> Self {
        Self {
            target: TargetSize::Native,
            threshold,
        }
    }

    /// Fixed output size with a custom threshold
    pub fn exact(width: usize, height: usize, threshold: u8) -> Self {
        Self {
            target: TargetSize::Exact { width, height },
            threshold,
        }
    }
}

/// Decode image bytes of any supported format
pub fn load_image(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(|e| VssError::UnsupportedFormat(e.to_string()))
}

/// Single-channel intensity plane of an image
///
/// Grayscale images are taken as-is so stored levels survive untouched;
/// color images go through the luminance weights.
pub fn intensity_plane(img: &DynamicImage) -> (Vec<u8>, usize, usize) {
    let (w, h) = img.dimensions();
    let (width, height) = (w as usize, h as usize);

    let gray = if !img.color().has_color() {
        img.to_luma8().into_raw()
    } else if img.color().has_alpha() {
        rgba_to_grayscale(img.to_rgba8().as_raw(), width, height)
    } else {
        rgb_to_grayscale(img.to_rgb8().as_raw(), width, height)
    };

    (gray, width, height)
}

/// Normalize a decoded image into a bit grid
pub fn normalize_image(img: &DynamicImage, options: &NormalizeOptions) -> Result<BitGrid> {
    let (gray, width, height) = intensity_plane(img);
    if width == 0 || height == 0 {
        return Err(VssError::EmptyImage);
    }

    let (out_w, out_h) = match options.target {
        TargetSize::Native => (width, height),
        TargetSize::Exact { width, height } => (width, height),
    };
    if out_w == 0 || out_h == 0 {
        return Err(VssError::EmptyImage);
    }

    let gray = if (out_w, out_h) != (width, height) {
        debug!(
            from_width = width,
            from_height = height,
            to_width = out_w,
            to_height = out_h,
            "nearest-neighbor resample"
        );
        resize_gray_nearest(&gray, width, height, out_w, out_h)
    } else {
        gray
    };

    Ok(threshold_binarize(
        &gray,
        out_w,
        out_h,
        options.threshold,
        SHARE_POLARITY,
    ))
}

/// Normalize raw image bytes into a bit grid
///
/// Fails with `UnsupportedFormat` when the bytes do not decode and with
/// `EmptyImage` when either the source or the target has zero area.
pub fn normalize(bytes: &[u8], options: &NormalizeOptions) -> Result<BitGrid> {
    let img = load_image(bytes)?;
    normalize_image(&img, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, ImageOutputFormat, Luma, Rgb, RgbImage};
    use std::io::Cursor;

    fn png_bytes(img: DynamicImage) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageOutputFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_garbage_is_unsupported_format() {
        let err = normalize(b"definitely not an image", &NormalizeOptions::default()).unwrap_err();
        assert!(matches!(err, VssError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_zero_target_is_empty_image() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 4, Luma([0])));
        let err = normalize_image(&img, &NormalizeOptions::exact(0, 4, 128)).unwrap_err();
        assert!(matches!(err, VssError::EmptyImage));
    }

    #[test]
    fn test_dark_pixels_become_ones() {
        let mut img = GrayImage::from_pixel(3, 2, Luma([255]));
        img.put_pixel(0, 0, Luma([0]));
        img.put_pixel(2, 1, Luma([128]));
        img.put_pixel(1, 1, Luma([129]));

        let grid = normalize(
            &png_bytes(DynamicImage::ImageLuma8(img)),
            &NormalizeOptions::default(),
        )
        .unwrap();

        assert_eq!(grid.dimensions(), (3, 2));
        assert!(grid.get(0, 0));
        assert!(grid.get(2, 1));
        assert!(!grid.get(1, 1));
        assert_eq!(grid.count_ones(), 2);
    }

    #[test]
    fn test_color_input_is_reduced() {
        let mut img = RgbImage::from_pixel(2, 1, Rgb([255, 255, 255]));
        img.put_pixel(1, 0, Rgb([10, 20, 30]));
        let grid = normalize(
            &png_bytes(DynamicImage::ImageRgb8(img)),
            &NormalizeOptions::default(),
        )
        .unwrap();
        assert!(!grid.get(0, 0));
        assert!(grid.get(1, 0));
    }

    #[test]
    fn test_exact_target_resamples_nearest() {
        // 2x1 black/white upscaled to 4x2 keeps hard edges.
        let mut img = GrayImage::from_pixel(2, 1, Luma([255]));
        img.put_pixel(0, 0, Luma([0]));
        let grid = normalize_image(
            &DynamicImage::ImageLuma8(img),
            &NormalizeOptions::exact(4, 2, 128),
        )
        .unwrap();
        let expected = BitGrid::from_fn(4, 2, |x, _| x < 2);
        assert_eq!(grid, expected);
    }
}
