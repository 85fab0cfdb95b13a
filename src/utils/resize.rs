//! Nearest-neighbor resampling
//!
//! Only nearest neighbor is allowed anywhere in the share path: any
//! smoothing filter would invent gray levels between the two share levels.

/// Source index for every destination index along one axis.
///
/// Samples at pixel centers: `src = ((2 * dst + 1) * src_len) / (2 * dst_len)`.
/// For integer scale factors this picks exactly one source pixel per block.
pub fn nearest_indices(src_len: usize, dst_len: usize) -> Vec<usize> {
    if src_len == 0 || dst_len == 0 {
        return Vec::new();
    }
    (0..dst_len)
        .map(|d| (((2 * d + 1) * src_len) / (2 * dst_len)).min(src_len - 1))
        .collect()
}

/// Resize a grayscale buffer with nearest-neighbor sampling
pub fn resize_gray_nearest(
    gray: &[u8],
    width: usize,
    height: usize,
    new_width: usize,
    new_height: usize,
) -> Vec<u8> {
    if (width, height) == (new_width, new_height) {
        return gray.to_vec();
    }
    let xs = nearest_indices(width, new_width);
    let ys = nearest_indices(height, new_height);

    let mut out = Vec::with_capacity(new_width * new_height);
    for &sy in &ys {
        let row = &gray[sy * width..(sy + 1) * width];
        out.extend(xs.iter().map(|&sx| row[sx]));
    }
    out
}
