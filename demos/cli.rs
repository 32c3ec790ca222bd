//! Command-line demo for strip_colors
//!
//! Runs the analysis pipeline over a synthetic strip photograph (the image
//! decoding and ROI drawing collaborators are out of scope for this crate),
//! printing the JSON result to stdout and a human summary to stderr.
//!
//! Run with: cargo run --example cli [-- --config config.json]

use std::{env, path::Path, process};

use strip_colors::{
    analyze, AnalysisConfig, NarrativeGenerator, Region, RegionSet, RgbaBuffer, Result,
    StripAnalysis, Winner,
};

/// Stand-in for the external narrative service, always offline here
struct OfflineNarrative;

impl NarrativeGenerator for OfflineNarrative {
    fn generate(&self, _prompt: &str) -> Result<String> {
        Err(strip_colors::AnalysisError::narrative("demo runs offline"))
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut config = AnalysisConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let Some(path) = args.get(i) else {
                    eprintln!("Error: --config requires a file path");
                    process::exit(1);
                };
                config = match AnalysisConfig::from_json_file(Path::new(path)) {
                    Ok(config) => config,
                    Err(error) => {
                        eprintln!("Error: failed to load config '{}': {}", path, error);
                        process::exit(1);
                    }
                };
            }
            "--help" | "-h" => {
                print_help(&args[0]);
                process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Use --help for usage information");
                process::exit(1);
            }
        }
        i += 1;
    }

    let (photo, regions) = synthetic_strip();

    match analyze(&photo, &regions, &config) {
        Ok(analysis) => print_result(&analysis),
        Err(error) => {
            eprintln!("Analysis failed: {}", error);
            eprintln!("Suggestion: {}", error.user_message());
            process::exit(1);
        }
    }
}

/// Warm-tinted synthetic strip: red reference A, blue reference B, a reddish
/// test patch and an off-white control carrying the tint
fn synthetic_strip() -> (RgbaBuffer, RegionSet) {
    let mut photo = RgbaBuffer::new(64, 16);
    let a = Region::new(0, 0, 16, 16);
    let b = Region::new(16, 0, 16, 16);
    let test = Region::new(32, 0, 16, 16);
    let control = Region::new(48, 0, 16, 16);

    photo.fill_region(a, [190, 45, 40]);
    photo.fill_region(b, [45, 60, 185]);
    photo.fill_region(test, [180, 60, 55]);
    photo.fill_region(control, [240, 220, 200]);

    (photo, RegionSet::new(a, b, test, control))
}

fn print_help(program_name: &str) {
    eprintln!("Usage: {} [OPTIONS]", program_name);
    eprintln!();
    eprintln!("Analyze a synthetic test-strip photograph.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config FILE    Load analysis thresholds from a JSON config file");
    eprintln!("  --help, -h       Show this help message");
}

fn print_result(analysis: &StripAnalysis) {
    // JSON to stdout for programmatic use
    match serde_json::to_string_pretty(analysis) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing result: {}", e);
            process::exit(1);
        }
    }

    // Human summary to stderr
    let c = &analysis.comparison;
    let winner = match c.winner {
        Winner::ReferenceA => "A",
        Winner::ReferenceB => "B",
    };
    eprintln!();
    eprintln!("Strip Analysis Summary:");
    eprintln!("  Winner: reference {} ({:.1}%)", winner, c.winning_pct());
    eprintln!("  DeltaE to A: {:.2}", c.delta_e_a);
    eprintln!("  DeltaE to B: {:.2}", c.delta_e_b);
    eprintln!(
        "  White balance gains: R x{:.3}, G x{:.3}, B x{:.3}",
        analysis.summary.white_balance.scale_r,
        analysis.summary.white_balance.scale_g,
        analysis.summary.white_balance.scale_b
    );
    eprintln!("  Control saturation: {:.3}", c.control_saturation);

    if c.default_saturation_warning() {
        eprintln!("  Warning: the control patch looks tinted; calibration may be unreliable.");
    }

    eprintln!();
    eprintln!("{}", analysis.narrated_report(&OfflineNarrative));
}
