// Traces the region search for one image: candidates, filter verdicts,
// per-region decodes and the final report.
use clap::Parser;
use cover_ean::decoder::{LinearDecoder, SymbolDecoder};
use cover_ean::detector::{ContourSegmenter, RegionFilter, Segmenter};
use cover_ean::tools::load_gray;
use cover_ean::utils::binarization::threshold_binarize;
use cover_ean::{CoverScanner, GrayView, ScanConfig};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "diagnose_regions", about = "Trace the cover_ean region search")]
struct Cli {
    /// Image to diagnose
    file: PathBuf,

    /// Rejected regions listed individually (the rest are only counted)
    #[arg(long, default_value_t = 20)]
    limit: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = ScanConfig::from_env();

    let gray = match load_gray(&cli.file) {
        Ok(gray) => gray,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let view = GrayView::from(&gray);
    let (width, height) = (view.width(), view.height());

    println!("============================================================");
    println!("DIAGNOSING: {} ({}x{})", cli.file.display(), width, height);
    println!("============================================================\n");

    let binary = threshold_binarize(&view, config.threshold);
    let total = u64::from(width) * u64::from(height);
    println!(
        "Step 1: threshold {} -> {} foreground of {} pixels ({:.2}%)",
        config.threshold,
        binary.count_ones(),
        total,
        if total == 0 {
            0.0
        } else {
            binary.count_ones() as f64 * 100.0 / total as f64
        }
    );

    let regions = ContourSegmenter::new(config.threshold).extract_regions(&view);
    println!("Step 2: {} candidate regions", regions.len());

    let filter = RegionFilter::new(config.min_region_size, config.size_bounds);
    println!(
        "Step 3: size filter (min {} px, {:?} bounds)",
        filter.min_size, filter.bounds
    );
    let mut reasons: BTreeMap<String, usize> = BTreeMap::new();
    let mut accepted = Vec::new();
    let mut listed = 0;
    for (i, region) in regions.iter().enumerate() {
        match filter.rejection(region, width, height) {
            None => {
                println!(
                    "  [{i:4}] ACCEPT {}x{} at ({}, {})",
                    region.width, region.height, region.x, region.y
                );
                accepted.push(*region);
            }
            Some(reason) => {
                *reasons.entry(reason.to_string()).or_default() += 1;
                if listed < cli.limit {
                    println!(
                        "  [{i:4}] reject {}x{} at ({}, {}): {reason}",
                        region.width, region.height, region.x, region.y
                    );
                    listed += 1;
                }
            }
        }
    }
    for (reason, count) in &reasons {
        println!("  - {count} rejected: {reason}");
    }

    println!("\nStep 4: decoding {} accepted regions", accepted.len());
    let decoder = LinearDecoder::new(config.decoder);
    for region in &accepted {
        let symbols = decoder.scan(&view.sub_view(*region));
        println!(
            "  region ({}, {}) {}x{}: {} symbols",
            region.x,
            region.y,
            region.width,
            region.height,
            symbols.len()
        );
        for symbol in &symbols {
            println!(
                "    {} {} ({} points)",
                symbol.symbology,
                symbol.payload,
                symbol.points.len()
            );
        }
    }

    let report = CoverScanner::new(&config).scan(&view, &cli.file.display().to_string());
    let telemetry = report.telemetry();
    println!(
        "\nStep 5: {} regions with hits, fallback {}",
        telemetry.regions_with_hits,
        if telemetry.fallback_used { "used" } else { "not needed" }
    );
    print!("{report}");
    ExitCode::SUCCESS
}
