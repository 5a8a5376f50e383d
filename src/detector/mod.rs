//! Candidate region search
//!
//! - Inverse threshold + connected component segmentation
//! - Size filtering of the resulting rectangles

/// Union-find labelling of foreground blobs and enclosed holes
pub mod connected_components;
/// `Segmenter` trait and the threshold/contour implementation
pub mod contour;
/// Minimum/maximum size heuristics
pub mod region_filter;

pub use contour::{ContourSegmenter, Segmenter};
pub use region_filter::{Rejection, RegionFilter, SizeBounds};
