//! QR payload extraction from a reconstructed grid
//!
//! One detection pass, then the detected symbols are decoded in order. No
//! alternate thresholds, rotations or rescaling are tried: a degraded
//! reconstruction is reported as a [`QrMiss`].

use std::panic::{self, AssertUnwindSafe};

use image::GrayImage;
use tracing::{debug, warn};

use crate::error::QrMiss;
use crate::models::BitGrid;
use crate::shares::codec::render_gray;

/// Side length of the smallest QR symbol (version 1), in modules
pub const MIN_QR_SIDE: usize = 21;

/// A successfully decoded QR symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedQr {
    /// Decoded text
    pub payload: String,
    /// QR version (1-40)
    pub version: usize,
    /// Error correction level as stored in the format bits
    pub ecc_level: u16,
    /// Number of candidate symbols the detector found
    pub symbols_detected: usize,
}

/// Scan a grid for a QR symbol and decode it
///
/// The grid is rendered at share polarity, one pixel per cell, with
/// `margin` white pixels around it as a quiet zone.
pub fn extract(grid: &BitGrid, margin: u32) -> Result<DecodedQr, QrMiss> {
    let (width, height) = grid.dimensions();
    if width < MIN_QR_SIDE || height < MIN_QR_SIDE {
        return Err(QrMiss::TooSmall { width, height });
    }

    let img = render_gray(grid, 1, margin).map_err(|e| QrMiss::Undecodable(e.to_string()))?;

    // rqrr asserts on some well-formed one-pixel-per-module symbols.
    panic::catch_unwind(AssertUnwindSafe(|| scan(&img, width, height))).unwrap_or_else(|cause| {
        let reason = cause
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| cause.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "detector aborted".to_string());
        warn!(%reason, width, height, "qr detector panicked");
        Err(QrMiss::Undecodable(reason))
    })
}

fn scan(img: &GrayImage, width: usize, height: usize) -> Result<DecodedQr, QrMiss> {
    let (img_w, img_h) = (img.width() as usize, img.height() as usize);
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(img_w, img_h, |x, y| {
        img.get_pixel(x as u32, y as u32).0[0]
    });

    let symbols = prepared.detect_grids();
    debug!(symbols = symbols.len(), width, height, "qr detection pass");
    if symbols.is_empty() {
        return Err(QrMiss::NoSymbol);
    }

    let mut last_error = String::new();
    for symbol in &symbols {
        match symbol.decode() {
            Ok((meta, payload)) => {
                return Ok(DecodedQr {
                    payload,
                    version: meta.version.0,
                    ecc_level: meta.ecc_level,
                    symbols_detected: symbols.len(),
                });
            }
            Err(err) => last_error = format!("{:?}", err),
        }
    }

    Err(QrMiss::Undecodable(last_error))
}
