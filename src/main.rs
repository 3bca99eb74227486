//! QorSense - sensor health analysis CLI
//!
//! # Usage
//!
//! ```bash
//! # Analyze readings from stdin (JSON array, null = missing sample)
//! echo '[1.0, 1.1, null, 1.2, ...]' | qorsense analyze --sensor-id PT-101
//!
//! # Generate a synthetic profile and analyze it
//! qorsense synthetic --profile drifting --length 500 --seed 7 --analyze
//!
//! # Write the default thresholds to a file for editing
//! qorsense init-config sensor_config.toml
//! ```
//!
//! # Environment Variables
//!
//! - `QORSENSE_CONFIG`: Path to a sensor config TOML (default: ./sensor_config.toml)
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use tracing::info;

use qorsense::synthetic::{self, SignalProfile};
use qorsense::{AnalysisReport, SensorAnalyzer, SensorConfig};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "qorsense")]
#[command(about = "QorSense sensor health analysis")]
#[command(version)]
struct CliArgs {
    /// Sensor config TOML; overrides $QORSENSE_CONFIG and ./sensor_config.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: SubCommand,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Analyze a JSON array of readings read from stdin
    Analyze {
        #[arg(long, default_value = "sensor")]
        sensor_id: String,
        #[arg(long, default_value = "generic")]
        sensor_type: String,
    },

    /// Generate a synthetic signal (optionally analyzing it)
    Synthetic {
        /// Normal, Drifting, Noisy or Oscillation
        #[arg(long)]
        profile: SignalProfile,
        #[arg(long, default_value = "200")]
        length: usize,
        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,
        /// Print the analysis report instead of the raw signal
        #[arg(long)]
        analyze: bool,
    },

    /// Write the built-in default config to a TOML file
    InitConfig {
        #[arg(value_name = "PATH", default_value = "sensor_config.toml")]
        path: PathBuf,
    },
}

// ============================================================================
// Entry Point
// ============================================================================

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    match args.command {
        SubCommand::Analyze {
            sensor_id,
            sensor_type,
        } => {
            let analyzer = SensorAnalyzer::new(resolve_config(args.config.as_ref())?);
            let readings = read_stdin_readings()?;
            info!(sensor_id = %sensor_id, points = readings.len(), "Analyzing readings");

            let analysis = analyzer
                .analyze(&readings)
                .with_context(|| format!("Analysis of sensor '{sensor_id}' failed"))?;
            let report = AnalysisReport::from_analysis(&sensor_id, &sensor_type, &analysis);
            print_json(&report)
        }

        SubCommand::Synthetic {
            profile,
            length,
            seed,
            analyze,
        } => {
            let signal = synthetic::generate(profile, length, seed)
                .context("Failed to generate synthetic signal")?;

            if !analyze {
                return print_json(&signal);
            }

            let analyzer = SensorAnalyzer::new(resolve_config(args.config.as_ref())?);
            let analysis = analyzer
                .analyze(&signal.values)
                .with_context(|| format!("Analysis of synthetic {profile} signal failed"))?;
            let sensor_id = format!("synthetic-{}", profile.name().to_lowercase());
            let report = AnalysisReport::from_analysis(&sensor_id, "synthetic", &analysis);
            print_json(&report)
        }

        SubCommand::InitConfig { path } => {
            if path.exists() {
                anyhow::bail!("Refusing to overwrite existing file {}", path.display());
            }
            SensorConfig::default()
                .save_to_file(&path)
                .with_context(|| format!("Failed to write {}", path.display()))
        }
    }
}

/// An explicit `--config` must load; otherwise fall back through the search order.
fn resolve_config(path: Option<&PathBuf>) -> Result<SensorConfig> {
    match path {
        Some(p) => SensorConfig::load_from_file(p)
            .with_context(|| format!("Failed to load config {}", p.display())),
        None => Ok(SensorConfig::load()),
    }
}

/// Parse a JSON array from stdin; `null` entries become missing samples.
fn read_stdin_readings() -> Result<Vec<f64>> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read stdin")?;

    let raw: Vec<Option<f64>> =
        serde_json::from_str(&input).context("Expected a JSON array of numbers or nulls")?;
    Ok(raw.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}
