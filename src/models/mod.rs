/// Decoded barcode with location
pub mod barcode;
/// Borrowed grayscale views
pub mod gray;
/// Packed binary matrix
pub mod matrix;
/// Pixel coordinates
pub mod point;
/// Rectangles and bounding boxes
pub mod region;
/// Barcode families
pub mod symbology;

pub use barcode::FoundBarcode;
pub use gray::GrayView;
pub use matrix::BitMatrix;
pub use point::Point;
pub use region::{BoundingBox, Region};
pub use symbology::{Symbology, SymbologySet};
