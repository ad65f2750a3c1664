//! Command line interface for Liftoff

use clap::Parser;
use std::fmt;

use crate::config::LiftoffConfig;

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Configuration file could not be loaded
    ConfigLoad(String),
    /// An override was outside its usable range
    InvalidValue { flag: &'static str, reason: String },
    /// Configuration could not be rendered as TOML
    ConfigPrint(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::ConfigLoad(msg) => write!(f, "Failed to load configuration: {msg}"),
            CliError::InvalidValue { flag, reason } => write!(f, "Invalid value for --{flag}: {reason}"),
            CliError::ConfigPrint(msg) => write!(f, "Failed to print configuration: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

/// Liftoff - build a rocket from parts and launch it
#[derive(Parser, Debug, Default)]
#[command(version = VERSION, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Distance at which parts snap together (overrides config file)
    #[arg(short = 's', long, value_name = "DISTANCE")]
    pub snap_distance: Option<f32>,

    /// Vertical gravity in meters per second squared (overrides config file)
    #[arg(short = 'g', long, value_name = "VALUE", allow_hyphen_values = true)]
    pub gravity: Option<f32>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

/// Loads configuration from file or defaults, then applies command-line overrides
pub fn load_and_apply_config(args: &Args) -> Result<LiftoffConfig, CliError> {
    let mut config = if let Some(config_path) = &args.config {
        if !std::path::Path::new(config_path).exists() {
            return Err(CliError::ConfigLoad(format!("{config_path} does not exist")));
        }
        println!("Loading configuration from: {config_path}");
        LiftoffConfig::load_or_default(config_path)
    } else {
        LiftoffConfig::load_from_user_config()
    };

    if let Some(snap_distance) = args.snap_distance {
        if !snap_distance.is_finite() || snap_distance <= 0.0 {
            return Err(CliError::InvalidValue {
                flag: "snap-distance",
                reason: format!("{snap_distance} is not a positive distance"),
            });
        }
        println!("Overriding snap distance to: {snap_distance}");
        config.assembly.snap_distance = snap_distance;
    }

    if let Some(gravity) = args.gravity {
        if !gravity.is_finite() {
            return Err(CliError::InvalidValue {
                flag: "gravity",
                reason: format!("{gravity} is not a finite number"),
            });
        }
        println!("Overriding gravity to: {gravity}");
        config.flight.gravity = gravity;
    }

    Ok(config)
}

/// Renders the configuration for `--print-config`
pub fn render_config(config: &LiftoffConfig) -> Result<String, CliError> {
    toml::to_string_pretty(config).map_err(|e| CliError::ConfigPrint(e.to_string()))
}
