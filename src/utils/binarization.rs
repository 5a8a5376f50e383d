use crate::models::{BitMatrix, GrayView};

/// Inverse global threshold binarization.
/// Pixels strictly darker than `threshold` become foreground (true).
pub fn threshold_binarize(gray: &GrayView<'_>, threshold: u8) -> BitMatrix {
    let width = gray.width() as usize;
    let height = gray.height() as usize;
    let mut binary = BitMatrix::new(width, height);

    for y in 0..height {
        let row = gray.row(y as u32);
        for (x, &value) in row.iter().enumerate() {
            if value < threshold {
                binary.set(x, y, true);
            }
        }
    }

    binary
}

/// Threshold for a single scan line: the average of the line mean and the
/// min/max midpoint. Returns `None` when the spread is below `min_contrast`.
pub fn line_threshold(line: &[u8], min_contrast: u8) -> Option<u8> {
    if line.is_empty() {
        return None;
    }
    let (mut min_v, mut max_v) = (u8::MAX, u8::MIN);
    let mut sum: u64 = 0;
    for &v in line {
        min_v = min_v.min(v);
        max_v = max_v.max(v);
        sum += v as u64;
    }
    if max_v - min_v < min_contrast {
        return None;
    }
    let mean = (sum / line.len() as u64) as u16;
    let mid = (min_v as u16 + max_v as u16) / 2;
    Some(((mean + mid) / 2) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_binarize_is_inverse() {
        let gray = vec![99, 100, 200, 50]; // 2x2 image
        let view = GrayView::new(&gray, 2, 2).unwrap();
        let binary = threshold_binarize(&view, 100);

        assert!(binary.get(0, 0)); // 99 < 100
        assert!(!binary.get(1, 0)); // 100 is not darker
        assert!(!binary.get(0, 1));
        assert!(binary.get(1, 1));
    }

    #[test]
    fn test_threshold_binarize_sub_view() {
        let gray = vec![
            255, 255, 255, //
            255, 10, 255, //
            255, 255, 10,
        ];
        let view = GrayView::new(&gray, 3, 3).unwrap();
        let sub = view.sub_view(crate::models::Region::new(1, 1, 2, 2));
        let binary = threshold_binarize(&sub, 100);
        assert_eq!(binary.width(), 2);
        assert!(binary.get(0, 0));
        assert!(binary.get(1, 1));
        assert_eq!(binary.count_ones(), 2);
    }

    #[test]
    fn test_uniform_image_has_no_foreground() {
        let gray = vec![128u8; 64];
        let view = GrayView::new(&gray, 8, 8).unwrap();
        assert_eq!(threshold_binarize(&view, 100).count_ones(), 0);
    }

    #[test]
    fn test_line_threshold() {
        assert_eq!(line_threshold(&[128; 16], 32), None);
        assert_eq!(line_threshold(&[], 32), None);
        // mean 127, midpoint 127
        assert_eq!(line_threshold(&[0, 255, 0, 255], 32), Some(127));
        let t = line_threshold(&[0, 255, 255, 255], 32).unwrap();
        assert!(t > 127 && t < 255);
    }
}
