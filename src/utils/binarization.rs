use crate::models::{BitGrid, Polarity};

/// Global threshold binarization under a polarity convention
///
/// With the share polarity, `intensity <= threshold` becomes 1 (black).
pub fn threshold_binarize(
    gray: &[u8],
    width: usize,
    height: usize,
    threshold: u8,
    polarity: Polarity,
) -> BitGrid {
    let mut binary = BitGrid::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            if polarity.bit(gray[idx], threshold) {
                binary.set(x, y, true);
            }
        }
    }

    binary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SHARE_POLARITY;

    #[test]
    fn test_threshold_binarize() {
        let gray = vec![100, 150, 128, 255]; // 2x2 image
        let binary = threshold_binarize(&gray, 2, 2, 128, SHARE_POLARITY);

        // Pixels <= 128 should be black (true)
        assert!(binary.get(0, 0)); // 100 <= 128
        assert!(!binary.get(1, 0)); // 150 > 128
        assert!(binary.get(0, 1)); // 128 <= 128
        assert!(!binary.get(1, 1)); // 255 > 128
    }

    #[test]
    fn test_custom_threshold() {
        let gray = vec![200, 254, 255];
        let binary = threshold_binarize(&gray, 3, 1, 254, SHARE_POLARITY);
        assert!(binary.get(0, 0));
        assert!(binary.get(1, 0));
        assert!(!binary.get(2, 0));
    }
}
