use crate::config::ScanConfig;
use crate::decoder::{DecoderAdapter, LinearDecoder, SymbolDecoder};
use crate::detector::{ContourSegmenter, RegionFilter, Segmenter};
use crate::models::{BoundingBox, FoundBarcode, GrayView, Region};
use crate::report::ScanReport;

/// Region-proposal scanner: decode inside each accepted candidate region,
/// then fall back to the whole frame when no region produced a barcode.
pub struct CoverScanner<S = ContourSegmenter, D = LinearDecoder> {
    segmenter: S,
    filter: RegionFilter,
    decoder: DecoderAdapter<D>,
}

impl CoverScanner {
    /// Scanner built from the built-in segmenter and decoder
    pub fn new(config: &ScanConfig) -> Self {
        Self::with_parts(
            ContourSegmenter::new(config.threshold),
            RegionFilter::new(config.min_region_size, config.size_bounds),
            LinearDecoder::new(config.decoder),
        )
    }
}

impl Default for CoverScanner {
    fn default() -> Self {
        Self::new(&ScanConfig::default())
    }
}

impl<S: Segmenter, D: SymbolDecoder> CoverScanner<S, D> {
    /// Scanner from custom collaborators
    pub fn with_parts(segmenter: S, filter: RegionFilter, decoder: D) -> Self {
        Self {
            segmenter,
            filter,
            decoder: DecoderAdapter::new(decoder),
        }
    }

    /// Scan one grayscale image; `source` names it in the report
    pub fn scan(&self, image: &GrayView<'_>, source: &str) -> ScanReport {
        let (width, height) = (image.width(), image.height());
        let mut report = ScanReport::new(source, width, height);

        let regions = self.segmenter.extract_regions(image);
        let accepted = self.filter.filter(&regions, width, height);
        tracing::debug!(
            found = regions.len(),
            accepted = accepted.len(),
            "candidate regions"
        );

        let mut regions_with_hits = 0;
        for region in &accepted {
            let found = self.scan_region(image, *region, &mut report);
            if found > 0 {
                regions_with_hits += 1;
            }
        }

        let fallback_used = report.is_empty();
        if fallback_used {
            tracing::debug!("no region produced a barcode, scanning the whole image");
            self.scan_region(image, Region::full(width, height), &mut report);
        }

        let telemetry = report.telemetry_mut();
        telemetry.regions_found = regions.len();
        telemetry.regions_accepted = accepted.len();
        telemetry.regions_with_hits = regions_with_hits;
        telemetry.fallback_used = fallback_used;

        tracing::debug!(barcodes = report.len(), fallback_used, "scan complete");
        report
    }

    /// Decode inside `region` and append translated results; returns how
    /// many barcodes were appended
    fn scan_region(&self, image: &GrayView<'_>, region: Region, report: &mut ScanReport) -> usize {
        let view = image.sub_view(region);
        if view.width() == 0 || view.height() == 0 {
            return 0;
        }

        let mut appended = 0;
        for symbol in self.decoder.scan(&view) {
            let Some(local) = BoundingBox::enclosing(&symbol.points, view.width(), view.height())
            else {
                tracing::debug!(payload = %symbol.payload, "skipping symbol without location");
                continue;
            };
            let bbox = local.translate(region.x, region.y);
            tracing::debug!(
                payload = %symbol.payload,
                symbology = %symbol.symbology,
                x = region.x,
                y = region.y,
                "barcode found"
            );
            report.push(FoundBarcode::new(symbol.symbology, symbol.payload, bbox));
            appended += 1;
        }
        appended
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::DecodedSymbol;
    use crate::detector::SizeBounds;
    use crate::models::{Point, Symbology};
    use std::cell::RefCell;

    struct FixedRegions(Vec<Region>);

    impl Segmenter for FixedRegions {
        fn extract_regions(&self, _image: &GrayView<'_>) -> Vec<Region> {
            self.0.clone()
        }
    }

    /// Returns `points` for views of exactly `size`, records every call
    struct SizedDecoder {
        size: (u32, u32),
        points: Vec<Point>,
        calls: RefCell<Vec<(u32, u32)>>,
    }

    impl SizedDecoder {
        fn new(size: (u32, u32), points: Vec<Point>) -> Self {
            Self {
                size,
                points,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl SymbolDecoder for SizedDecoder {
        fn scan(&self, image: &GrayView<'_>) -> Vec<DecodedSymbol> {
            let size = (image.width(), image.height());
            self.calls.borrow_mut().push(size);
            if size != self.size {
                return Vec::new();
            }
            vec![DecodedSymbol {
                symbology: Symbology::Isbn13,
                payload: "9780131103627".into(),
                points: self.points.clone(),
            }]
        }
    }

    struct PanicsOnFirstRegion;

    impl SymbolDecoder for PanicsOnFirstRegion {
        fn scan(&self, image: &GrayView<'_>) -> Vec<DecodedSymbol> {
            if image.width() == 200 {
                panic!("corrupt region");
            }
            vec![DecodedSymbol {
                symbology: Symbology::Ean13,
                payload: "4006381333931".into(),
                points: vec![Point::new(1, 2), Point::new(3, 4)],
            }]
        }
    }

    fn blank(width: u32, height: u32) -> Vec<u8> {
        vec![255u8; (width * height) as usize]
    }

    fn filter() -> RegionFilter {
        RegionFilter::new(128, SizeBounds::Transposed)
    }

    #[test]
    fn test_region_results_are_translated() {
        let data = blank(1000, 1000);
        let view = GrayView::new(&data, 1000, 1000).unwrap();
        let decoder = SizedDecoder::new(
            (300, 150),
            vec![Point::new(10, 5), Point::new(60, 55), Point::new(30, 20)],
        );
        let scanner = CoverScanner::with_parts(
            FixedRegions(vec![Region::new(100, 200, 300, 150)]),
            filter(),
            &decoder,
        );

        let report = scanner.scan(&view, "mem");
        assert_eq!(report.len(), 1);
        let b = &report.barcodes()[0];
        assert_eq!(
            b.bounding_box(),
            BoundingBox {
                x1: 110,
                y1: 205,
                x2: 160,
                y2: 255,
            }
        );
        assert_eq!(b.ean, "9780131103627");
        assert_eq!(report.source(), "mem");
        assert!(!report.telemetry().fallback_used);
        assert_eq!(decoder.calls.borrow().as_slice(), &[(300, 150)]);
    }

    #[test]
    fn test_fallback_scans_whole_image_at_origin() {
        let data = blank(400, 300);
        let view = GrayView::new(&data, 400, 300).unwrap();
        let decoder = SizedDecoder::new((400, 300), vec![Point::new(40, 30), Point::new(90, 80)]);
        // both candidates are below the minimum size
        let scanner = CoverScanner::with_parts(
            FixedRegions(vec![Region::new(0, 0, 20, 20), Region::new(50, 50, 100, 200)]),
            filter(),
            &decoder,
        );

        let report = scanner.scan(&view, "mem");
        assert_eq!(report.len(), 1);
        let b = &report.barcodes()[0];
        assert_eq!((b.x1, b.y1, b.x2, b.y2), (40, 30, 90, 80));
        let telemetry = report.telemetry();
        assert_eq!(telemetry.regions_found, 2);
        assert_eq!(telemetry.regions_accepted, 0);
        assert!(telemetry.fallback_used);
        assert_eq!(decoder.calls.borrow().as_slice(), &[(400, 300)]);
    }

    #[test]
    fn test_symbol_without_points_is_skipped() {
        let data = blank(400, 300);
        let view = GrayView::new(&data, 400, 300).unwrap();
        let decoder = SizedDecoder::new((400, 300), Vec::new());
        let scanner = CoverScanner::with_parts(FixedRegions(Vec::new()), filter(), &decoder);

        let report = scanner.scan(&view, "mem");
        assert!(report.is_empty());
        assert!(report.telemetry().fallback_used);
    }

    #[test]
    fn test_overlapping_regions_are_not_deduplicated() {
        let data = blank(1000, 1000);
        let view = GrayView::new(&data, 1000, 1000).unwrap();
        let decoder = SizedDecoder::new((300, 150), vec![Point::new(0, 0), Point::new(9, 9)]);
        let scanner = CoverScanner::with_parts(
            FixedRegions(vec![Region::new(0, 0, 300, 150), Region::new(5, 5, 300, 150)]),
            filter(),
            &decoder,
        );

        let report = scanner.scan(&view, "mem");
        assert_eq!(report.len(), 2);
        assert_eq!(report.barcodes()[0].ean, report.barcodes()[1].ean);
        assert_eq!(report.barcodes()[1].x1, 5);
        assert_eq!(report.telemetry().regions_with_hits, 2);
    }

    #[test]
    fn test_decoder_panic_only_loses_its_region() {
        let data = blank(1000, 1000);
        let view = GrayView::new(&data, 1000, 1000).unwrap();
        let scanner = CoverScanner::with_parts(
            FixedRegions(vec![Region::new(0, 0, 200, 200), Region::new(500, 500, 300, 300)]),
            filter(),
            PanicsOnFirstRegion,
        );

        let report = scanner.scan(&view, "mem");
        assert_eq!(report.len(), 1);
        let b = &report.barcodes()[0];
        assert_eq!((b.x1, b.y1, b.x2, b.y2), (501, 502, 503, 504));
        assert!(!report.telemetry().fallback_used);
    }
}
