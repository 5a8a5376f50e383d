use crate::detector::connected_components::find_components;
use crate::models::{GrayView, Region};
use crate::utils::binarization::threshold_binarize;

/// Proposes candidate rectangles worth decoding
pub trait Segmenter {
    /// Bounding rectangles of candidate regions, in a deterministic order
    fn extract_regions(&self, image: &GrayView<'_>) -> Vec<Region>;
}

/// Threshold + connected-region segmenter.
///
/// Dark ink becomes foreground; every foreground blob and every hole
/// enclosed by one is a candidate, so nested blocks on a cover layout
/// are all proposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContourSegmenter {
    /// Pixels strictly below this are foreground
    pub threshold: u8,
}

impl ContourSegmenter {
    /// Segmenter binarizing at `threshold`
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }
}

impl Default for ContourSegmenter {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_THRESHOLD)
    }
}

impl Segmenter for ContourSegmenter {
    fn extract_regions(&self, image: &GrayView<'_>) -> Vec<Region> {
        let binary = threshold_binarize(image, self.threshold);
        let components = find_components(&binary);
        tracing::debug!(
            foreground_pixels = binary.count_ones(),
            regions = components.len(),
            "segmented image"
        );
        components.into_iter().map(|c| c.bounds).collect()
    }
}
