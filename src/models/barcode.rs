use super::{BoundingBox, Symbology};

/// A decoded barcode located in whole-image coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundBarcode {
    /// Family the payload was classified as
    pub symbology: Symbology,
    /// Decoded payload (digits, or digits plus `X` for ISBN-10)
    pub ean: String,
    /// Left edge, inclusive
    pub x1: u32,
    /// Top edge, inclusive
    pub y1: u32,
    /// Right edge, inclusive
    pub x2: u32,
    /// Bottom edge, inclusive
    pub y2: u32,
}

impl FoundBarcode {
    /// Barcode located at `bbox`
    pub fn new(symbology: Symbology, ean: String, bbox: BoundingBox) -> Self {
        Self {
            symbology,
            ean,
            x1: bbox.x1,
            y1: bbox.y1,
            x2: bbox.x2,
            y2: bbox.y2,
        }
    }

    /// Location as a [`BoundingBox`]
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox {
            x1: self.x1,
            y1: self.y1,
            x2: self.x2,
            y2: self.y2,
        }
    }
}
