//! Scan configuration.
//!
//! A [`ScanConfig`] is built once (defaults, then environment, then CLI
//! flags) and passed by reference to the scanner; nothing reads the
//! environment after construction.

use std::str::FromStr;

use crate::detector::region_filter::SizeBounds;
use crate::models::SymbologySet;

/// Default intensity below which a pixel counts as foreground
pub const DEFAULT_THRESHOLD: u8 = 100;
/// Default minimum candidate region side, exclusive
pub const DEFAULT_MIN_REGION_SIZE: u32 = 128;

/// Settings for the built-in linear decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Families to report; everything else is dropped
    pub symbologies: SymbologySet,
    /// Line decodes required before a symbol is reported
    pub min_hits: usize,
    /// Scan every `density`-th row/column
    pub density: u32,
    /// Lines whose max-min intensity spread is below this are skipped
    pub min_contrast: u8,
    /// Also scan columns, for symbols rotated by 90 degrees
    pub scan_columns: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            symbologies: SymbologySet::all(),
            min_hits: 2,
            density: 1,
            min_contrast: 32,
            scan_columns: true,
        }
    }
}

/// Settings for the whole region-search pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    /// Binarization threshold for region extraction
    pub threshold: u8,
    /// Regions must be strictly larger than this on both sides
    pub min_region_size: u32,
    /// Upper-bound comparison used by the region filter
    pub size_bounds: SizeBounds,
    /// Built-in decoder settings
    pub decoder: DecoderConfig,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            min_region_size: DEFAULT_MIN_REGION_SIZE,
            size_bounds: SizeBounds::Transposed,
            decoder: DecoderConfig::default(),
        }
    }
}

impl ScanConfig {
    /// Defaults overridden by `COVER_EAN_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    ///
    /// Values that fail to parse are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        override_with(&lookup, "COVER_EAN_THRESHOLD", &mut config.threshold);
        override_with(&lookup, "COVER_EAN_MIN_REGION", &mut config.min_region_size);
        override_with(&lookup, "COVER_EAN_SIZE_BOUNDS", &mut config.size_bounds);
        override_with(
            &lookup,
            "COVER_EAN_SYMBOLOGIES",
            &mut config.decoder.symbologies,
        );
        override_with(&lookup, "COVER_EAN_MIN_HITS", &mut config.decoder.min_hits);
        override_with(&lookup, "COVER_EAN_DENSITY", &mut config.decoder.density);
        config.decoder.min_hits = config.decoder.min_hits.max(1);
        config.decoder.density = config.decoder.density.max(1);
        config
    }
}

fn override_with<F, T>(lookup: &F, name: &str, slot: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(raw) = lookup(name) else {
        return;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => *slot = value,
        Err(_) => tracing::warn!(variable = name, value = %raw, "ignoring unparseable setting"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Symbology;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ScanConfig::default();
        assert_eq!(config.threshold, 100);
        assert_eq!(config.min_region_size, 128);
        assert_eq!(config.size_bounds, SizeBounds::Transposed);
        assert_eq!(config.decoder.symbologies, SymbologySet::all());
        assert_eq!(ScanConfig::from_lookup(|_| None), config);
    }

    #[test]
    fn test_lookup_overrides() {
        let config = ScanConfig::from_lookup(lookup_from(&[
            ("COVER_EAN_THRESHOLD", "90"),
            ("COVER_EAN_MIN_REGION", " 64 "),
            ("COVER_EAN_SIZE_BOUNDS", "matched"),
            ("COVER_EAN_SYMBOLOGIES", "ean13"),
            ("COVER_EAN_MIN_HITS", "0"),
            ("COVER_EAN_DENSITY", "4"),
        ]));
        assert_eq!(config.threshold, 90);
        assert_eq!(config.min_region_size, 64);
        assert_eq!(config.size_bounds, SizeBounds::Matched);
        assert!(config.decoder.symbologies.contains(Symbology::Ean13));
        assert!(!config.decoder.symbologies.contains(Symbology::Isbn13));
        assert_eq!(config.decoder.min_hits, 1);
        assert_eq!(config.decoder.density, 4);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = ScanConfig::from_lookup(lookup_from(&[
            ("COVER_EAN_THRESHOLD", "300"),
            ("COVER_EAN_SYMBOLOGIES", "qrcode"),
            ("COVER_EAN_SIZE_BOUNDS", "sideways"),
        ]));
        assert_eq!(config, ScanConfig::default());
    }
}
