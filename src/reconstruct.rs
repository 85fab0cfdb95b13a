//! XOR reconstruction of a secret from ShareA and ShareB
//!
//! ShareB is brought to ShareA's resolution first (nearest neighbor), so two
//! images produced at different pixel densities still combine. Mismatched
//! pairs are not an error here: they XOR to noise and the QR extractor
//! reports the miss.

use image::GenericImageView;
use tracing::{debug, warn};

use crate::config::VssConfig;
use crate::error::{QrMiss, Result};
use crate::extract::{DecodedQr, extract};
use crate::models::BitGrid;
use crate::normalize::{NormalizeOptions, load_image, normalize_image};

/// Recovered grid plus what the QR extractor made of it
#[derive(Debug, Clone)]
pub struct ReconstructionResult {
    /// `share_a ^ share_b` at ShareA's resolution
    pub grid: BitGrid,
    /// ShareB had a different pixel size and was resampled
    pub resampled: bool,
    /// Decoded symbol, or why none was found
    pub outcome: std::result::Result<DecodedQr, QrMiss>,
}

impl ReconstructionResult {
    /// Decoded text, if any
    pub fn payload(&self) -> Option<&str> {
        self.outcome.as_ref().ok().map(|qr| qr.payload.as_str())
    }

    /// True when a QR payload was recovered
    pub fn is_decoded(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Cell-wise XOR of two share grids
///
/// `b` is resampled to `a`'s dimensions when they differ. The trailing size
/// check cannot fail after that resample; it guards the XOR invariant.
pub fn reconstruct(a: &BitGrid, b: &BitGrid) -> Result<BitGrid> {
    if a.dimensions() == b.dimensions() {
        return a.xor(b);
    }
    debug!(
        a_width = a.width(),
        a_height = a.height(),
        b_width = b.width(),
        b_height = b.height(),
        "resampling share B to share A"
    );
    let b = b.resize_nearest(a.width(), a.height());
    a.xor(&b)
}

/// Reconstruct and scan two uploaded share images
///
/// Fails only when an image cannot be decoded or has zero area. A missing or
/// unreadable QR is reported in [`ReconstructionResult::outcome`].
pub fn reconstruct_images(
    share_a: &[u8],
    share_b: &[u8],
    config: &VssConfig,
) -> Result<ReconstructionResult> {
    let img_a = load_image(share_a)?;
    let img_b = load_image(share_b)?;

    let grid_a = normalize_image(&img_a, &NormalizeOptions::native(config.threshold))?;
    let (width, height) = grid_a.dimensions();
    let resampled = img_b.dimensions() != img_a.dimensions();
    let grid_b = normalize_image(
        &img_b,
        &NormalizeOptions::exact(width, height, config.threshold),
    )?;

    let grid = reconstruct(&grid_a, &grid_b)?;
    let outcome = extract(&grid, config.quiet_margin);
    if let Err(miss) = &outcome {
        warn!(%miss, width, height, resampled, "reconstruction yielded no QR payload");
    }

    Ok(ReconstructionResult {
        grid,
        resampled,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VssError;
    use crate::secret::render_secret;
    use crate::shares::{RandomSource, encode_grid, generate_shares};

    fn secret() -> BitGrid {
        render_secret("https://example.com/api?class=101", 5, 4).unwrap()
    }

    #[test]
    fn test_reconstruct_recovers_secret() {
        let secret = secret();
        let pair = generate_shares(&secret, &mut RandomSource::Seeded(3).rng(0).unwrap());
        assert_eq!(reconstruct(&pair.a.grid, &pair.b.grid).unwrap(), secret);
    }

    #[test]
    fn test_reconstruct_is_commutative() {
        let secret = secret();
        let pair = generate_shares(&secret, &mut RandomSource::Seeded(4).rng(0).unwrap());
        assert_eq!(
            reconstruct(&pair.a.grid, &pair.b.grid).unwrap(),
            reconstruct(&pair.b.grid, &pair.a.grid).unwrap()
        );
    }

    #[test]
    fn test_reconstruct_resamples_share_b() {
        let secret = BitGrid::from_fn(10, 6, |x, y| (x ^ y) & 1 == 1);
        let pair = generate_shares(&secret, &mut RandomSource::Seeded(9).rng(0).unwrap());

        // B at double density, A at native size.
        let out = reconstruct(&pair.a.grid, &pair.b.grid.upscale(2)).unwrap();
        assert_eq!(out, secret);

        // A at triple density, B at native size.
        let out = reconstruct(&pair.a.grid.upscale(3), &pair.b.grid).unwrap();
        assert_eq!(out, secret.upscale(3));
    }

    #[test]
    fn test_reconstruct_images_decodes_payload() {
        let secret = secret();
        let pair = generate_shares(&secret, &mut RandomSource::Seeded(21).rng(0).unwrap());
        let a_png = encode_grid(&pair.a.grid, 1).unwrap();
        let b_png = encode_grid(&pair.b.grid, 2).unwrap();

        let result = reconstruct_images(&a_png, &b_png, &VssConfig::default()).unwrap();
        assert!(result.resampled);
        assert_eq!(result.grid, secret);
        assert_eq!(result.payload(), Some("https://example.com/api?class=101"));
    }

    #[test]
    fn test_mismatched_pair_reports_miss() {
        let secret = secret();
        let first = generate_shares(&secret, &mut RandomSource::Seeded(1).rng(0).unwrap());
        let second = generate_shares(&secret, &mut RandomSource::Seeded(1).rng(1).unwrap());
        let a_png = encode_grid(&first.a.grid, 1).unwrap();
        let b_png = encode_grid(&second.b.grid, 1).unwrap();

        let result = reconstruct_images(&a_png, &b_png, &VssConfig::default()).unwrap();
        assert!(!result.is_decoded());
        let err: VssError = result.outcome.unwrap_err().into();
        assert!(matches!(err, VssError::QrNotFound(_)));
    }

    #[test]
    fn test_unreadable_upload_is_error() {
        let png = encode_grid(&secret(), 1).unwrap();
        assert!(matches!(
            reconstruct_images(b"nope", &png, &VssConfig::default()),
            Err(VssError::UnsupportedFormat(_))
        ));
    }
}
