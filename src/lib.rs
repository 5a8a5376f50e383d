//! cover_ean - EAN-13 / ISBN locator for scanned book covers
//!
//! Finds candidate regions with a global threshold and connected-component
//! pass, decodes each plausible region separately, and reports every
//! barcode with its bounding box in full-image coordinates. When no region
//! yields a barcode the whole image is scanned once as a fallback.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Environment-driven scan settings
pub mod config;
/// Symbol decoders (EAN-13 scanlines, fault containment)
pub mod decoder;
/// Region proposal: connected components and the size filter
pub mod detector;
/// Error type shared by the library and binaries
pub mod error;
/// Core data structures (GrayView, Region, FoundBarcode, ...)
pub mod models;
/// Orchestration of segmentation, filtering, decoding and fallback
pub mod pipeline;
/// Result aggregation and report rendering
pub mod report;
/// Image loading and synthetic barcode rendering
pub mod tools;
/// Binarization helpers
pub mod utils;

pub use config::{DecoderConfig, ScanConfig};
pub use error::{Result, ScanError};
pub use models::{BoundingBox, FoundBarcode, GrayView, Point, Region, Symbology, SymbologySet};
pub use pipeline::CoverScanner;
pub use report::{ScanReport, ScanTelemetry};

use std::path::Path;

/// Scan a raw 8-bit grayscale buffer (row-major, `width * height` bytes)
/// with default settings.
pub fn scan_gray(data: &[u8], width: u32, height: u32) -> Result<Vec<FoundBarcode>> {
    let view = GrayView::new(data, width, height)?;
    let report = CoverScanner::default().scan(&view, "");
    Ok(report.barcodes().to_vec())
}

/// Load an image file, convert it to grayscale and scan it.
///
/// The path as given becomes the report's `file` attribute.
pub fn scan_file<P: AsRef<Path>>(path: P, config: &ScanConfig) -> Result<ScanReport> {
    let path = path.as_ref();
    let gray = tools::load_gray(path)?;
    let view = GrayView::from(&gray);
    tracing::debug!(
        path = %path.display(),
        width = gray.width(),
        height = gray.height(),
        "image loaded"
    );
    Ok(CoverScanner::new(config).scan(&view, &path.display().to_string()))
}
