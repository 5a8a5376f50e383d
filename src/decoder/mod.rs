//! Symbol decoding
//!
//! - `SymbolDecoder`: the capability the pipeline scans regions with
//! - `DecoderAdapter`: contains decoder faults to the region being scanned
//! - `LinearDecoder`: built-in EAN-13 / ISBN scanline decoder

use std::panic::{self, AssertUnwindSafe};

use crate::models::{GrayView, Point, Symbology};

/// EAN-13 run decoding and family classification
pub mod ean13;
/// Row/column scanning and hit merging
pub mod line_scanner;

pub use line_scanner::LinearDecoder;

/// One symbol found by a decoder during a single scan call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSymbol {
    /// Family the payload was classified as
    pub symbology: Symbology,
    /// Decoded text
    pub payload: String,
    /// Locations in the coordinate space of the scanned view
    pub points: Vec<Point>,
}

/// Decodes every symbol visible in a grayscale view
pub trait SymbolDecoder {
    /// Every symbol found in `image`, with points local to the view
    fn scan(&self, image: &GrayView<'_>) -> Vec<DecodedSymbol>;
}

impl<D: SymbolDecoder + ?Sized> SymbolDecoder for &D {
    fn scan(&self, image: &GrayView<'_>) -> Vec<DecodedSymbol> {
        (**self).scan(image)
    }
}

/// Wraps a decoder so that a panic while scanning one view becomes an
/// empty result for that view instead of aborting the whole run.
///
/// The view is only borrowed for the duration of the call; nothing the
/// adapter keeps refers to caller memory afterwards.
#[derive(Debug, Clone, Default)]
pub struct DecoderAdapter<D> {
    inner: D,
}

impl<D: SymbolDecoder> DecoderAdapter<D> {
    /// Wrap `inner`
    pub fn new(inner: D) -> Self {
        Self { inner }
    }
}

impl<D: SymbolDecoder> SymbolDecoder for DecoderAdapter<D> {
    fn scan(&self, image: &GrayView<'_>) -> Vec<DecodedSymbol> {
        match panic::catch_unwind(AssertUnwindSafe(|| self.inner.scan(image))) {
            Ok(symbols) => symbols,
            Err(cause) => {
                let message = cause
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| cause.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                tracing::warn!(
                    width = image.width(),
                    height = image.height(),
                    %message,
                    "decoder failed, treating view as empty"
                );
                Vec::new()
            }
        }
    }
}
