//! XOR secret splitting
//!
//! ShareA is one uniform random bit per cell and ShareB is `secret ^ ShareA`,
//! so either share alone is uniform noise.

use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::OsRng;
use rand_chacha::ChaCha20Rng;

use crate::error::{Result, VssError};
use crate::models::{BitGrid, Share, SharePair, ShareRole};

/// Where share randomness comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RandomSource {
    /// ChaCha20 keyed from the operating system's entropy source
    #[default]
    Os,
    /// ChaCha20 keyed from a fixed seed, for reproducible runs
    Seeded(u64),
}

impl RandomSource {
    /// A generator for one independent stream.
    ///
    /// `Seeded` sources give every stream index its own ChaCha20 stream, so
    /// batch entries never share a keystream. Single splits take the last
    /// stream (`u64::MAX`), which no roster index reaches. `Os` sources
    /// reseed each call.
    pub fn rng(&self, stream: u64) -> Result<ChaCha20Rng> {
        match self {
            RandomSource::Os => ChaCha20Rng::from_rng(OsRng)
                .map_err(|e| VssError::RandomSourceUnavailable(e.to_string())),
            RandomSource::Seeded(seed) => {
                let mut rng = ChaCha20Rng::seed_from_u64(*seed);
                rng.set_stream(stream);
                Ok(rng)
            }
        }
    }
}

/// A grid of independent uniform bits
pub fn random_grid<R: RngCore + ?Sized>(width: usize, height: usize, rng: &mut R) -> BitGrid {
    let mut data = vec![0u8; (width * height).div_ceil(8)];
    rng.fill_bytes(&mut data);
    BitGrid::from_packed(width, height, data)
}

/// Split a secret into two shares with `a ^ b == secret`
pub fn generate_shares<R: RngCore + ?Sized>(secret: &BitGrid, rng: &mut R) -> SharePair {
    let (width, height) = secret.dimensions();
    let a = random_grid(width, height, rng);
    let b_bytes = secret
        .as_bytes()
        .iter()
        .zip(a.as_bytes())
        .map(|(s, r)| s ^ r)
        .collect();
    let b = BitGrid::from_packed(width, height, b_bytes);

    SharePair {
        a: Share::new(ShareRole::A, a),
        b: Share::new(ShareRole::B, b),
    }
}

/// ShareA for a new session, keyed to a student's fixed ShareB
///
/// `session_secret ^ share_b`, so the student's existing ShareB
/// reconstructs the new session's secret.
pub fn derive_session_share(session_secret: &BitGrid, share_b: &Share) -> Result<Share> {
    let grid = session_secret.xor(&share_b.grid)?;
    Ok(Share::new(ShareRole::A, grid))
}
