use crate::config::DecoderConfig;
use crate::decoder::ean13::{self, LineHit, Run};
use crate::decoder::{DecodedSymbol, SymbolDecoder};
use crate::models::{GrayView, Point};
use crate::utils::binarization::line_threshold;

/// Run-length encode a line; pixels below `threshold` are dark
pub fn line_runs(line: &[u8], threshold: u8) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for (x, &v) in line.iter().enumerate() {
        let dark = v < threshold;
        match runs.last_mut() {
            Some(run) if run.dark == dark => run.len += 1,
            _ => runs.push(Run {
                dark,
                start: x as u32,
                len: 1,
            }),
        }
    }
    runs
}

/// Every symbol on one line, read in both directions
pub fn decode_line(line: &[u8], min_contrast: u8) -> Vec<LineHit> {
    let Some(threshold) = line_threshold(line, min_contrast) else {
        return Vec::new();
    };
    let mut runs = line_runs(line, threshold);
    if runs.len() < ean13::SYMBOL_RUNS {
        return Vec::new();
    }
    let mut hits = ean13::decode_runs(&runs);
    runs.reverse();
    hits.extend(ean13::decode_runs(&runs));
    hits
}

/// Scanline EAN-13 decoder over rows and, optionally, columns.
///
/// Each line decode contributes the two guard end points on that line;
/// decodes of the same digits are merged into one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinearDecoder {
    /// Scan density, contrast and family settings
    pub config: DecoderConfig,
}

impl LinearDecoder {
    /// Decoder using `config`
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }
}

impl SymbolDecoder for LinearDecoder {
    fn scan(&self, image: &GrayView<'_>) -> Vec<DecodedSymbol> {
        let step = self.config.density.max(1) as usize;
        let mut tally = HitTally::default();

        for y in (0..image.height()).step_by(step) {
            for hit in decode_line(image.row(y), self.config.min_contrast) {
                tally.record(hit.digits, Point::new(hit.start, y), Point::new(hit.end, y));
            }
        }

        if self.config.scan_columns {
            let mut column = Vec::with_capacity(image.height() as usize);
            for x in (0..image.width()).step_by(step) {
                image.column_into(x, &mut column);
                for hit in decode_line(&column, self.config.min_contrast) {
                    tally.record(hit.digits, Point::new(x, hit.start), Point::new(x, hit.end));
                }
            }
        }

        tally.into_symbols(&self.config)
    }
}

struct Pending {
    digits: [u8; 13],
    hits: usize,
    points: Vec<Point>,
}

/// Line hits grouped by digits, in first-hit order
#[derive(Default)]
struct HitTally {
    pending: Vec<Pending>,
}

impl HitTally {
    fn record(&mut self, digits: [u8; 13], start: Point, end: Point) {
        let index = match self.pending.iter().position(|p| p.digits == digits) {
            Some(index) => index,
            None => {
                self.pending.push(Pending {
                    digits,
                    hits: 0,
                    points: Vec::new(),
                });
                self.pending.len() - 1
            }
        };
        let entry = &mut self.pending[index];
        entry.hits += 1;
        entry.points.push(start);
        entry.points.push(end);
    }

    fn into_symbols(self, config: &DecoderConfig) -> Vec<DecodedSymbol> {
        self.pending
            .into_iter()
            .filter(|p| p.hits >= config.min_hits)
            .filter_map(|p| {
                let (symbology, payload) = ean13::classify(&p.digits, config.symbologies)?;
                Some(DecodedSymbol {
                    symbology,
                    payload,
                    points: p.points,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Symbology, SymbologySet};
    use crate::tools::synthetic::{draw_ean13, ean13_line};

    #[test]
    fn test_line_runs() {
        let runs = line_runs(&[200, 200, 10, 10, 10, 200], 100);
        assert_eq!(
            runs,
            vec![
                Run {
                    dark: false,
                    start: 0,
                    len: 2,
                },
                Run {
                    dark: true,
                    start: 2,
                    len: 3,
                },
                Run {
                    dark: false,
                    start: 5,
                    len: 1,
                },
            ]
        );
        assert!(line_runs(&[], 100).is_empty());
    }

    #[test]
    fn test_decode_line_both_directions() {
        let line = ean13_line("9780131103627", 2, 30).unwrap();
        let forward = decode_line(&line, 32);
        assert_eq!(forward.len(), 1);
        assert_eq!(forward[0].start, 30);
        assert_eq!(forward[0].end, 30 + 190 - 1);

        let mut reversed = line.clone();
        reversed.reverse();
        let backward = decode_line(&reversed, 32);
        assert_eq!(backward.len(), 1);
        assert_eq!(backward[0].digits, forward[0].digits);
        assert_eq!(backward[0].start, 30);
        assert_eq!(backward[0].end, 30 + 190 - 1);
    }

    #[test]
    fn test_flat_line_has_no_hits() {
        assert!(decode_line(&[128u8; 400], 32).is_empty());
    }

    #[test]
    fn test_scan_reports_local_points() {
        let mut img = image::GrayImage::from_pixel(260, 80, image::Luma([255]));
        draw_ean13(&mut img, "9780131103627", 20, 10, 2, 50).unwrap();
        let view = GrayView::from(&img);

        let symbols = LinearDecoder::default().scan(&view);
        assert_eq!(symbols.len(), 1);
        let symbol = &symbols[0];
        assert_eq!(symbol.symbology, Symbology::Isbn13);
        assert_eq!(symbol.payload, "9780131103627");
        assert!(symbol.points.iter().all(|p| p.x >= 20 && p.x < 210));
        assert!(symbol.points.iter().all(|p| p.y >= 10 && p.y < 60));
        assert_eq!(symbol.points.iter().map(|p| p.x).min(), Some(20));
        assert_eq!(symbol.points.iter().map(|p| p.x).max(), Some(209));
    }

    #[test]
    fn test_scan_finds_rotated_symbol_in_columns() {
        let mut img = image::GrayImage::from_pixel(260, 80, image::Luma([255]));
        draw_ean13(&mut img, "4006381333931", 20, 10, 2, 50).unwrap();
        let rotated = image::imageops::rotate90(&img);
        let view = GrayView::from(&rotated);

        let symbols = LinearDecoder::default().scan(&view);
        assert_eq!(symbols.len(), 1);
        assert_eq!(symbols[0].symbology, Symbology::Ean13);
        assert_eq!(symbols[0].payload, "4006381333931");

        let rows_only = LinearDecoder::new(DecoderConfig {
            scan_columns: false,
            ..DecoderConfig::default()
        });
        assert!(rows_only.scan(&view).is_empty());
    }

    #[test]
    fn test_min_hits_and_disabled_families() {
        let mut img = image::GrayImage::from_pixel(260, 40, image::Luma([255]));
        draw_ean13(&mut img, "9780131103627", 20, 10, 2, 1).unwrap();
        let view = GrayView::from(&img);

        // a single row of bars yields one line hit
        let strict = LinearDecoder::new(DecoderConfig {
            scan_columns: false,
            ..DecoderConfig::default()
        });
        assert!(strict.scan(&view).is_empty());

        let lenient = LinearDecoder::new(DecoderConfig {
            min_hits: 1,
            scan_columns: false,
            ..DecoderConfig::default()
        });
        assert_eq!(lenient.scan(&view).len(), 1);

        let nothing_enabled = LinearDecoder::new(DecoderConfig {
            min_hits: 1,
            symbologies: SymbologySet::empty(),
            ..DecoderConfig::default()
        });
        assert!(nothing_enabled.scan(&view).is_empty());
    }
}
