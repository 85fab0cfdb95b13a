//! qr_vss - 2-out-of-2 visual secret sharing over QR codes
//!
//! A teacher-held ShareA (rotated per class session) and a student-held
//! ShareB (fixed) are binarized and XORed to reconstruct a QR code carrying
//! an attendance URL. Either share alone is uniform noise.
//!
//! Bit 1 is always black ([`SHARE_POLARITY`]) at generation and at
//! reconstruction time.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Roster batch generation and archive packaging
pub mod batch;
/// Environment-tunable settings
pub mod config;
/// Error types
pub mod error;
/// QR payload extraction
pub mod extract;
/// Core data structures (BitGrid, Share, payloads)
pub mod models;
/// Bitmap normalizer (decode, reduce, resample, binarize)
pub mod normalize;
/// End-to-end attendance attempt
pub mod pipeline;
/// XOR reconstruction
pub mod reconstruct;
/// Secret QR rendering from text
pub mod secret;
/// Attendance payload field extraction
pub mod session;
/// Share generation and raster encoding
pub mod shares;
/// Utility functions (grayscale, binarization, resampling)
pub mod utils;

pub use batch::{Roster, RosterBatch, generate_batch};
pub use config::VssConfig;
pub use error::{QrMiss, Result, VssError};
pub use extract::{DecodedQr, extract};
pub use models::{
    AttendancePayload, AttendanceRecord, BitGrid, ClassId, IntegrityToken, SHARE_POLARITY, Share,
    SharePair, ShareRole,
};
pub use normalize::{NormalizeOptions, TargetSize, normalize};
pub use pipeline::{AttendanceAttempt, attend};
pub use reconstruct::{ReconstructionResult, reconstruct, reconstruct_images};
pub use secret::render_secret;
pub use session::parse_class_id;
pub use shares::{
    RandomSource, decode_share, derive_session_share, encode_share, generate_shares,
};

/// Stream used by single splits; batch entries use their roster index
const SPLIT_STREAM: u64 = u64::MAX;

/// PNG bytes of a freshly split secret
#[derive(Debug, Clone)]
pub struct SplitImages {
    /// The split itself
    pub pair: SharePair,
    /// ShareA PNG
    pub share_a_png: Vec<u8>,
    /// ShareB PNG
    pub share_b_png: Vec<u8>,
}

/// Split a secret QR image into two share PNGs
///
/// # Arguments
/// * `secret_image` - Raw bytes of the secret QR raster (any supported format)
/// * `source` - Randomness for ShareA
/// * `config` - Threshold for reading the secret and pixel scale for the shares
pub fn split_secret_image(
    secret_image: &[u8],
    source: &RandomSource,
    config: &VssConfig,
) -> Result<SplitImages> {
    let secret = normalize(secret_image, &NormalizeOptions::native(config.threshold))?;
    let mut rng = source.rng(SPLIT_STREAM)?;
    let pair = generate_shares(&secret, &mut rng);
    let share_a_png = encode_share(&pair.a, config.share_scale)?;
    let share_b_png = encode_share(&pair.b, config.share_scale)?;
    Ok(SplitImages {
        pair,
        share_a_png,
        share_b_png,
    })
}

/// Issue a new session's ShareA PNG for a student's existing ShareB file
///
/// The session secret is read at ShareB's resolution, so the returned
/// ShareA lines up cell for cell with the student's ShareB.
pub fn issue_session_share(
    session_secret_image: &[u8],
    share_b_image: &[u8],
    config: &VssConfig,
) -> Result<Vec<u8>> {
    let share_b = Share::new(ShareRole::B, decode_share(share_b_image)?);
    let (width, height) = share_b.grid.dimensions();
    let secret = normalize(
        session_secret_image,
        &NormalizeOptions::exact(width, height, config.threshold),
    )?;
    let share_a = derive_session_share(&secret, &share_b)?;
    encode_share(&share_a, 1)
}
