/// Mapping between a bit value and a displayed pixel intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Polarity {
    /// Intensity written for bit 1
    pub set_level: u8,
    /// Intensity written for bit 0
    pub clear_level: u8,
}

impl Polarity {
    /// Intensity for a bit
    #[inline]
    pub fn level(&self, bit: bool) -> u8 {
        if bit { self.set_level } else { self.clear_level }
    }

    /// Bit for an intensity; the set side owns the threshold itself
    #[inline]
    pub fn bit(&self, intensity: u8, threshold: u8) -> bool {
        if self.set_level <= self.clear_level {
            intensity <= threshold
        } else {
            intensity > threshold
        }
    }
}

/// Black encodes secret bit 1, white encodes 0.
///
/// Every share encoder, normalizer and QR renderer goes through this
/// constant. Both shares carry the secret bit directly, so XOR needs no
/// further inversion.
pub const SHARE_POLARITY: Polarity = Polarity {
    set_level: 0,
    clear_level: 255,
};

/// Default binarization threshold, mid-range of 8-bit intensity
pub const DEFAULT_THRESHOLD: u8 = 128;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_polarity_black_is_one() {
        assert_eq!(SHARE_POLARITY.level(true), 0);
        assert_eq!(SHARE_POLARITY.level(false), 255);
        assert!(SHARE_POLARITY.bit(0, DEFAULT_THRESHOLD));
        assert!(SHARE_POLARITY.bit(128, DEFAULT_THRESHOLD));
        assert!(!SHARE_POLARITY.bit(129, DEFAULT_THRESHOLD));
        assert!(!SHARE_POLARITY.bit(255, DEFAULT_THRESHOLD));
    }

    #[test]
    fn test_levels_round_trip_through_threshold() {
        for bit in [false, true] {
            let level = SHARE_POLARITY.level(bit);
            assert_eq!(SHARE_POLARITY.bit(level, DEFAULT_THRESHOLD), bit);
        }
    }
}
