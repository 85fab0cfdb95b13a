use crate::error::{Result, VssError};

/// Compact bit grid for storing binarized images and shares
///
/// Cells are packed eight to a byte in row-major order. Padding bits past
/// `width * height` are always zero, so two grids with the same cells
/// compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitGrid {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BitGrid {
    /// Create a new all-zero grid with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let bytes_needed = (width * height).div_ceil(8);
        Self {
            width,
            height,
            data: vec![0; bytes_needed],
        }
    }

    /// Build a grid by evaluating `f(x, y)` for every cell
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut grid = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if f(x, y) {
                    grid.set(x, y, true);
                }
            }
        }
        grid
    }

    /// Build a grid from packed bytes, clearing any padding bits
    pub(crate) fn from_packed(width: usize, height: usize, mut data: Vec<u8>) -> Self {
        let cells = width * height;
        data.resize(cells.div_ceil(8), 0);
        let tail = cells % 8;
        if tail != 0 {
            if let Some(last) = data.last_mut() {
                *last &= (1u8 << tail) - 1;
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Get grid width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get grid height
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// True when the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Get bit at (x, y)
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y * self.width + x;
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Set bit at (x, y)
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        let byte_index = index / 8;
        let bit_index = index % 8;
        if value {
            self.data[byte_index] |= 1 << bit_index;
        } else {
            self.data[byte_index] &= !(1 << bit_index);
        }
    }

    /// Toggle bit at (x, y)
    pub fn toggle(&mut self, x: usize, y: usize) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        self.data[index / 8] ^= 1 << (index % 8);
    }

    /// Cell-wise XOR with another grid of identical dimensions
    pub fn xor(&self, other: &BitGrid) -> Result<BitGrid> {
        if self.dimensions() != other.dimensions() {
            return Err(VssError::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| a ^ b)
            .collect();
        Ok(BitGrid {
            width: self.width,
            height: self.height,
            data,
        })
    }

    /// Resample to `width x height` with nearest-neighbor center sampling
    pub fn resize_nearest(&self, width: usize, height: usize) -> BitGrid {
        if (width, height) == self.dimensions() {
            return self.clone();
        }
        let xs = crate::utils::resize::nearest_indices(self.width, width);
        let ys = crate::utils::resize::nearest_indices(self.height, height);
        BitGrid::from_fn(width, height, |x, y| self.get(xs[x], ys[y]))
    }

    /// Blow every cell up into a `factor x factor` block
    pub fn upscale(&self, factor: usize) -> BitGrid {
        let factor = factor.max(1);
        BitGrid::from_fn(self.width * factor, self.height * factor, |x, y| {
            self.get(x / factor, y / factor)
        })
    }

    /// Count of set cells
    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Fraction of set cells, 0.0 for an empty grid
    pub fn ones_ratio(&self) -> f64 {
        let total = self.width * self.height;
        if total == 0 {
            0.0
        } else {
            self.count_ones() as f64 / total as f64
        }
    }

    /// Clear all bits to 0
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Get raw data as bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl Default for BitGrid {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
