#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the air-quality report.
//!
//! ```text
//! aqi_map report --input snapshot.json [--config aqi_map.toml] [--seed 42] [--window 12]
//! aqi_map classify 182
//! aqi_map suggest PM2.5
//! aqi_map city Delhi
//! ```
//!
//! Every command prints JSON on stdout. Set `RUST_LOG=debug` to see
//! synthesis and normalization details on stderr.

use std::path::PathBuf;

use aqi_map_advisory::suggest_label;
use aqi_map_category_models::{BreakpointSet, BreakpointTable};
use aqi_map_report::{AirQualitySnapshot, ReportConfig, build_report, load_config};
use aqi_map_spatial::{RandomSource, SeededRandom, ThreadRandom, lookup_city};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "aqi_map",
    about = "Health advisories, mitigation actions, and map points from AQI snapshots"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the full report for a snapshot
    Report {
        /// Snapshot JSON file, or `-` for stdin
        #[arg(long, short)]
        input: PathBuf,
        /// TOML configuration file
        #[arg(long, short)]
        config: Option<PathBuf>,
        /// Seed for reproducible map points
        #[arg(long)]
        seed: Option<u64>,
        /// Override the forecast window length
        #[arg(long)]
        window: Option<usize>,
    },
    /// Classify a single AQI value
    Classify {
        aqi: f64,
        /// Breakpoint set (`standard` or `legacy_map`)
        #[arg(long, default_value = "standard", value_parser = parse_breakpoints)]
        breakpoints: BreakpointSet,
    },
    /// List mitigation actions for a pollutant label
    Suggest { label: String },
    /// Look up a seed city by name
    City { name: String },
}

fn parse_breakpoints(s: &str) -> Result<BreakpointSet, String> {
    s.parse()
        .map_err(|e: strum::ParseError| format!("{e}: expected `standard` or `legacy_map`"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            input,
            config,
            seed,
            window,
        } => {
            let mut config = match config {
                Some(path) => load_config(&path)?,
                None => ReportConfig::default(),
            };
            if let Some(window) = window {
                config.forecast_window = window;
            }

            let snapshot = if input.as_os_str() == "-" {
                AirQualitySnapshot::from_reader(std::io::stdin().lock())?
            } else {
                AirQualitySnapshot::load(&input)?
            };

            let mut rng: Box<dyn RandomSource> = match seed {
                Some(seed) => {
                    log::debug!("Using seeded randomness ({seed})");
                    Box::new(SeededRandom::from_seed_u64(seed))
                }
                None => Box::new(ThreadRandom::default()),
            };

            let report = build_report(&snapshot, &config, rng.as_mut());
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Classify { aqi, breakpoints } => {
            let record = BreakpointTable::new(breakpoints).classify(Some(aqi));
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::Suggest { label } => {
            let set = suggest_label(Some(&label));
            if set.is_empty() {
                log::info!("No mitigation actions for {label:?}");
            }
            println!("{}", serde_json::to_string_pretty(&set)?);
        }
        Commands::City { name } => {
            let Some(city) = lookup_city(&name) else {
                eprintln!("Unknown city: {name}");
                std::process::exit(1);
            };
            println!("{}", serde_json::to_string_pretty(city)?);
        }
    }

    Ok(())
}
