//! Error types for scanning and configuration

use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by loading, configuration and buffer wrapping
#[derive(Debug, Error)]
pub enum ScanError {
    /// Image could not be opened or decoded
    #[error("Invalid file {}: {source}", .path.display())]
    ImageLoad {
        /// Path as given by the caller
        path: PathBuf,
        /// Underlying decoder error
        #[source]
        source: image::ImageError,
    },

    /// Unrecognised family name
    #[error("unknown symbology: {0} (expected ean13, isbn13 or isbn10)")]
    UnknownSymbology(String),

    /// Unrecognised size-bounds variant
    #[error("unknown size bounds: {0} (expected transposed or matched)")]
    UnknownSizeBounds(String),

    /// Buffer shorter than `width * height` bytes
    #[error("buffer of {len} bytes cannot hold a {width}x{height} image")]
    BufferSize {
        /// Bytes supplied
        len: usize,
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },
}

/// Result alias defaulting to [`ScanError`]
pub type Result<T, E = ScanError> = std::result::Result<T, E>;
