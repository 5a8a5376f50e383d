//! Result aggregation and the `<cover_ean>` report format

use std::fmt;

use crate::models::FoundBarcode;

/// Stage counters collected while scanning one image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanTelemetry {
    /// Candidate regions proposed by segmentation
    pub regions_found: usize,
    /// Candidates that passed the size filter
    pub regions_accepted: usize,
    /// Accepted regions that yielded at least one barcode
    pub regions_with_hits: usize,
    /// Whether the whole-image fallback scan ran
    pub fallback_used: bool,
}

/// Ordered, append-only set of barcodes found in one image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    source: String,
    width: u32,
    height: u32,
    barcodes: Vec<FoundBarcode>,
    telemetry: ScanTelemetry,
}

impl ScanReport {
    /// Empty report for a `width` x `height` image
    pub fn new(source: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            source: source.into(),
            width,
            height,
            barcodes: Vec::new(),
            telemetry: ScanTelemetry::default(),
        }
    }

    pub(crate) fn push(&mut self, barcode: FoundBarcode) {
        self.barcodes.push(barcode);
    }

    pub(crate) fn telemetry_mut(&mut self) -> &mut ScanTelemetry {
        &mut self.telemetry
    }

    /// Source identifier, usually the file path
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Image width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of barcodes found
    pub fn len(&self) -> usize {
        self.barcodes.len()
    }

    /// True when nothing was found
    pub fn is_empty(&self) -> bool {
        self.barcodes.is_empty()
    }

    /// Barcodes in discovery order
    pub fn iter(&self) -> std::slice::Iter<'_, FoundBarcode> {
        self.barcodes.iter()
    }

    /// Barcodes in discovery order
    pub fn barcodes(&self) -> &[FoundBarcode] {
        &self.barcodes
    }

    /// Stage counters for this scan
    pub fn telemetry(&self) -> ScanTelemetry {
        self.telemetry
    }
}

impl<'a> IntoIterator for &'a ScanReport {
    type Item = &'a FoundBarcode;
    type IntoIter = std::slice::Iter<'a, FoundBarcode>;

    fn into_iter(self) -> Self::IntoIter {
        self.barcodes.iter()
    }
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "<cover_ean file=\"{}\" width=\"{}\" height=\"{}\" found=\"{}\">",
            Escaped(&self.source),
            self.width,
            self.height,
            self.barcodes.len()
        )?;
        for b in &self.barcodes {
            writeln!(
                f,
                " <result ean=\"{}\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"/>",
                Escaped(&b.ean),
                b.x1,
                b.y1,
                b.x2,
                b.y2
            )?;
        }
        writeln!(f, "</cover_ean>")
    }
}

/// Attribute-value escaping for `&`, `<`, `>` and `"`
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                _ => write!(f, "{c}")?,
            }
        }
        Ok(())
    }
}
