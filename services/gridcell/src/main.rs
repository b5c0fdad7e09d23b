//! wrf-gridcell: resolve a location to WRF grid cells.
//!
//! Prints the nearest cell, or every cell within `--radius`, as JSON on
//! stdout. Logs go to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use gridcell::{load_grid, parse_location, run_lookup, LookupRequest};
use wrf_grid::LocatorConfig;

#[derive(Parser, Debug)]
#[command(name = "wrf-gridcell")]
#[command(about = "Find the WRF grid cells closest to a location")]
struct Args {
    /// Grid file with `xlong`/`xlat` arrays (JSON or YAML)
    #[arg(long, env = "WRF_GRID_FILE")]
    grid: PathBuf,

    /// Query location as LON LAT, optionally followed by height above ground
    #[arg(long, num_args = 2..=3, value_names = ["LON", "LAT", "HGT"], allow_negative_numbers = true, required = true)]
    location: Vec<f64>,

    /// Search radius in meters
    #[arg(long)]
    radius: Option<f64>,

    /// Print ring-expansion candidates instead of the cell selection
    #[arg(long)]
    neighbors: bool,

    /// Grid size from which distances are computed in parallel
    #[arg(long, env = "GRID_PARALLEL_THRESHOLD")]
    parallel_threshold: Option<usize>,

    /// Filter radius queries over ring-expansion candidates only
    #[arg(long)]
    seed_with_neighbors: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.log_json)?;

    let mut config = LocatorConfig::from_env();
    if let Some(threshold) = args.parallel_threshold {
        config.parallel_threshold = threshold;
    }
    if args.seed_with_neighbors {
        config.seed_with_neighbors = true;
    }
    info!(
        parallel_threshold = config.parallel_threshold,
        seed_with_neighbors = config.seed_with_neighbors,
        "Starting wrf-gridcell"
    );

    let grid = load_grid(&args.grid)?;
    let request = LookupRequest {
        target: parse_location(&args.location)?,
        radius: args.radius,
        neighbors: args.neighbors,
    };

    let report = run_lookup(&grid, config, &request)?;
    let output = serde_json::to_string_pretty(&report).context("Failed to serialize result")?;
    println!("{}", output);

    Ok(())
}
