//! One attendance attempt, end to end
//!
//! Normalize both uploads, XOR, scan for the QR symbol, and derive the
//! attendance payload. Submitting the record is left to the caller.

use tracing::info;

use crate::config::VssConfig;
use crate::error::Result;
use crate::models::AttendancePayload;
use crate::reconstruct::{ReconstructionResult, reconstruct_images};

/// Result of one attempt
#[derive(Debug, Clone)]
pub struct AttendanceAttempt {
    /// Reconstruction and QR outcome
    pub reconstruction: ReconstructionResult,
    /// Present only when the QR payload was recovered
    pub payload: Option<AttendancePayload>,
}

impl AttendanceAttempt {
    /// True when a payload was recovered
    pub fn succeeded(&self) -> bool {
        self.payload.is_some()
    }
}

/// Run one attendance attempt from the two uploaded share files
///
/// `share_b` must be the student's ShareB file exactly as held: its bytes
/// are digested into the payload's integrity token.
pub fn attend(share_a: &[u8], share_b: &[u8], config: &VssConfig) -> Result<AttendanceAttempt> {
    let reconstruction = reconstruct_images(share_a, share_b, config)?;
    let payload = reconstruction
        .payload()
        .map(|text| AttendancePayload::from_decoded(text, share_b));

    if let Some(payload) = &payload {
        info!(class_id = %payload.class_id, "attendance payload recovered");
    }

    Ok(AttendanceAttempt {
        reconstruction,
        payload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassId, IntegrityToken};
    use crate::secret::render_secret;
    use crate::shares::{RandomSource, encode_share, generate_shares};

    #[test]
    fn test_attend_builds_payload() {
        let secret = render_secret("https://example.com/api?class=101", 5, 4).unwrap();
        let pair = generate_shares(&secret, &mut RandomSource::Seeded(77).rng(0).unwrap());
        let a_png = encode_share(&pair.a, 1).unwrap();
        let b_png = encode_share(&pair.b, 1).unwrap();

        let attempt = attend(&a_png, &b_png, &VssConfig::default()).unwrap();
        assert!(attempt.succeeded());

        let payload = attempt.payload.unwrap();
        assert_eq!(payload.raw, "https://example.com/api?class=101");
        assert_eq!(payload.class_id, ClassId::Known("101".to_string()));
        assert_eq!(payload.integrity_token, IntegrityToken::of_bytes(&b_png));
    }

    #[test]
    fn test_attend_with_wrong_share_has_no_payload() {
        let secret = render_secret("https://example.com/api?class=101", 5, 4).unwrap();
        let pair = generate_shares(&secret, &mut RandomSource::Seeded(77).rng(0).unwrap());
        let a_png = encode_share(&pair.a, 1).unwrap();

        let attempt = attend(&a_png, &a_png, &VssConfig::default()).unwrap();
        assert!(!attempt.succeeded());
        assert!(attempt.reconstruction.outcome.is_err());
    }
}
