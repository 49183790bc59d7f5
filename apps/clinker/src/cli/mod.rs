//! # Clinker CLI Module
//!
//! This module implements the CLI interface for the clinker service.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server
//! - `status` - Show artifact readiness
//! - `predict` - Run one prediction from the command line
//! - `init` - Write a baseline artifact set

mod commands;

use crate::config::Config;
use clap::{Parser, Subcommand};
use clinker_core::{ClinkerError, FieldValue, RawReading};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Clinker - phase prediction from kiln readings
///
/// Estimates alite, belite, aluminate and ferrite content of cement clinker
/// from calciner temperature, fuel rate and production rate.
#[derive(Parser, Debug)]
#[command(name = "clinker")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Base path of the model artifacts (overrides the config file)
    #[arg(short = 'M', long, global = true)]
    pub model_path: Option<PathBuf>,

    /// Seed for the phase jitter (overrides the config file)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show artifact readiness
    Status,

    /// Predict clinker phases for one set of readings
    Predict {
        /// Calciner temperature (°C)
        #[arg(long)]
        calciner_temp: Option<f64>,

        /// Kiln exit temperature (°C)
        #[arg(long)]
        kiln_exit_temp: Option<f64>,

        /// Fuel/coal feed rate (kg/h)
        #[arg(long)]
        fuel_rate: Option<f64>,

        /// Production rate (t/h)
        #[arg(long)]
        production_rate: Option<f64>,
    },

    /// Write a baseline artifact set at the model path
    Init {
        /// Overwrite existing artifacts
        #[arg(short, long)]
        force: bool,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), ClinkerError> {
    let config = Config::load_or_default(cli.config.as_deref())?;
    let model_path = cli.model_path.unwrap_or(config.models.path);
    let seed = cli.seed.or(config.models.noise_seed);
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Server { host, port }) => {
            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            cmd_server(&model_path, seed, &host, port).await
        }
        Some(Commands::Predict {
            calciner_temp,
            kiln_exit_temp,
            fuel_rate,
            production_rate,
        }) => {
            let raw = RawReading {
                calciner_temp_c: calciner_temp.map(FieldValue::Number),
                kiln_exit_temp_c: kiln_exit_temp.map(FieldValue::Number),
                fuel_coal_kg_h: fuel_rate.map(FieldValue::Number),
                production_rate_tph: production_rate.map(FieldValue::Number),
            };
            cmd_predict(&model_path, seed, json_mode, &raw)
        }
        Some(Commands::Init { force }) => cmd_init(&model_path, force),
        Some(Commands::Status) | None => cmd_status(&model_path, json_mode),
    }
}
