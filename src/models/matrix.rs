/// Packed binary image, `true` marks a foreground pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    data: Vec<u64>,
}

impl BitMatrix {
    /// Create an all-background matrix with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let words_needed = (width * height).div_ceil(64);
        Self {
            width,
            height,
            data: vec![0; words_needed],
        }
    }

    /// Get matrix width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get matrix height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get bit at (x, y); out-of-bounds reads as background
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y * self.width + x;
        (self.data[index / 64] >> (index % 64)) & 1 == 1
    }

    /// Set bit at (x, y); out-of-bounds writes are ignored
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        let mask = 1u64 << (index % 64);
        if value {
            self.data[index / 64] |= mask;
        } else {
            self.data[index / 64] &= !mask;
        }
    }

    /// Number of foreground pixels
    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|w| w.count_ones() as usize).sum()
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_matrix() {
        let mut matrix = BitMatrix::new(9, 9);
        assert_eq!(matrix.width(), 9);
        assert_eq!(matrix.height(), 9);

        matrix.set(3, 4, true);
        matrix.set(8, 8, true);
        assert!(matrix.get(3, 4));
        assert!(matrix.get(8, 8));
        assert!(!matrix.get(3, 3));
        assert_eq!(matrix.count_ones(), 2);

        matrix.set(3, 4, false);
        assert!(!matrix.get(3, 4));
        assert_eq!(matrix.count_ones(), 1);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut matrix = BitMatrix::new(8, 8);
        matrix.set(10, 10, true); // Should not panic
        assert!(!matrix.get(10, 10));
        assert_eq!(matrix.count_ones(), 0);
    }
}
