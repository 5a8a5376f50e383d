use std::fmt;
use std::str::FromStr;

use crate::error::ScanError;
use crate::models::Region;

/// Which image side bounds each region side from above
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeBounds {
    /// Region width must be below the image *height* and region height
    /// below the image *width*
    #[default]
    Transposed,
    /// Region width below image width, region height below image height
    Matched,
}

impl FromStr for SizeBounds {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "transposed" => Ok(SizeBounds::Transposed),
            "matched" => Ok(SizeBounds::Matched),
            _ => Err(ScanError::UnknownSizeBounds(s.trim().to_string())),
        }
    }
}

/// Reason a candidate region was discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Width not above the minimum size
    TooNarrow,
    /// Height not above the minimum size
    TooShort,
    /// Width not below its upper bound
    TooWide,
    /// Height not below its upper bound
    TooTall,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rejection::TooNarrow => "too narrow",
            Rejection::TooShort => "too short",
            Rejection::TooWide => "too wide",
            Rejection::TooTall => "too tall",
        };
        f.write_str(text)
    }
}

/// Size heuristics separating barcode-sized blocks from speckle and
/// whole-frame outlines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionFilter {
    /// Both sides must be strictly larger than this
    pub min_size: u32,
    /// Upper-bound comparison
    pub bounds: SizeBounds,
}

impl RegionFilter {
    /// Filter with the given minimum side and bounds variant
    pub fn new(min_size: u32, bounds: SizeBounds) -> Self {
        Self { min_size, bounds }
    }

    /// First failed check for `region` in an `image_width` x `image_height` frame
    pub fn rejection(
        &self,
        region: &Region,
        image_width: u32,
        image_height: u32,
    ) -> Option<Rejection> {
        let (max_width, max_height) = match self.bounds {
            SizeBounds::Transposed => (image_height, image_width),
            SizeBounds::Matched => (image_width, image_height),
        };
        if region.width <= self.min_size {
            Some(Rejection::TooNarrow)
        } else if region.height <= self.min_size {
            Some(Rejection::TooShort)
        } else if region.width >= max_width {
            Some(Rejection::TooWide)
        } else if region.height >= max_height {
            Some(Rejection::TooTall)
        } else {
            None
        }
    }

    /// True when `region` passes every check
    pub fn accepts(&self, region: &Region, image_width: u32, image_height: u32) -> bool {
        self.rejection(region, image_width, image_height).is_none()
    }

    /// Accepted regions, original order preserved
    pub fn filter(&self, regions: &[Region], image_width: u32, image_height: u32) -> Vec<Region> {
        regions
            .iter()
            .copied()
            .filter(|r| self.accepts(r, image_width, image_height))
            .collect()
    }
}

impl Default for RegionFilter {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MIN_REGION_SIZE, SizeBounds::Transposed)
    }
}
