use std::path::Path;

use crate::error::{Result, ScanError};

/// Synthetic EAN-13 rendering
pub mod synthetic;

/// Load an image from disk and convert it to 8-bit grayscale.
pub fn load_gray<P: AsRef<Path>>(path: P) -> Result<image::GrayImage> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|source| ScanError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_luma8())
}
