use clap::Parser;
use cover_ean::detector::SizeBounds;
use cover_ean::{ScanConfig, Symbology, SymbologySet, scan_file};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "cover_ean",
    version,
    about = "Locate EAN-13 / ISBN barcodes on a scanned book cover"
)]
struct Cli {
    /// Image to scan (any format the image crate reads)
    file: PathBuf,

    /// Binarization threshold for region extraction (0-255)
    #[arg(long)]
    threshold: Option<u8>,

    /// Minimum candidate region side in pixels, exclusive
    #[arg(long = "min-region")]
    min_region: Option<u32>,

    /// Compare region width to image width and height to image height
    #[arg(long = "matched-bounds")]
    matched_bounds: bool,

    /// Families to report (ean13, isbn13, isbn10); repeatable or comma separated
    #[arg(long = "symbology", value_delimiter = ',')]
    symbologies: Vec<Symbology>,

    /// Line decodes required before a barcode is reported
    #[arg(long = "min-hits")]
    min_hits: Option<usize>,

    /// Scan every n-th row and column
    #[arg(long)]
    density: Option<u32>,

    /// Only scan rows
    #[arg(long = "no-columns")]
    no_columns: bool,
}

impl Cli {
    fn apply(&self, config: &mut ScanConfig) {
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(min_region) = self.min_region {
            config.min_region_size = min_region;
        }
        if self.matched_bounds {
            config.size_bounds = SizeBounds::Matched;
        }
        if !self.symbologies.is_empty() {
            config.decoder.symbologies = self.symbologies.iter().copied().collect::<SymbologySet>();
        }
        if let Some(min_hits) = self.min_hits {
            config.decoder.min_hits = min_hits.max(1);
        }
        if let Some(density) = self.density {
            config.decoder.density = density.max(1);
        }
        if self.no_columns {
            config.decoder.scan_columns = false;
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // help and version go to stdout and are not failures
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let mut config = ScanConfig::from_env();
    cli.apply(&mut config);
    tracing::debug!(?config, "effective configuration");

    match scan_file(&cli.file, &config) {
        Ok(report) => {
            print!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
