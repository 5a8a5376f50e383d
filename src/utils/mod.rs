//! Utility functions for image processing
//!
//! - Binarization (global inverse threshold, per-line threshold)

/// Global and per-line thresholds
pub mod binarization;
