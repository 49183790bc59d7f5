//! # Clinker - Phase Prediction Server
//!
//! The main binary for the clinker phase predictor.
//!
//! This application provides:
//! - HTTP server with the dashboard, `/predict` and `/api/status` (axum-based)
//! - CLI interface for status checks and one-off predictions
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │               apps/clinker (THE BINARY)          │
//! │                                                  │
//! │  ┌─────────────┐    ┌─────────────┐    ┌──────┐  │
//! │  │   CLI       │    │   HTTP API  │    │ TOML │  │
//! │  │  (clap)     │    │   (axum)    │    │config│  │
//! │  └──────┬──────┘    └──────┬──────┘    └──┬───┘  │
//! │         └──────────────────┼──────────────┘      │
//! │                            ▼                     │
//! │                    ┌───────────────┐             │
//! │                    │ clinker-core  │             │
//! │                    │ (THE LOGIC)   │             │
//! │                    └───────────────┘             │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Write baseline artifacts, then serve
//! clinker init
//! clinker server --host 0.0.0.0 --port 5000
//!
//! # One-off prediction
//! clinker predict --calciner-temp 880 --json-mode
//! ```

use clap::Parser;
use clinker::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Parse first so --verbose can raise the default filter.
    let cli = cli::Cli::parse();

    // CLINKER_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("CLINKER_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "clinker=debug,clinker_core=debug,tower_http=debug"
    } else {
        "clinker=info,clinker_core=info,tower_http=debug"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
   ___ _ _       _
  / __| (_)_ __ | |_____ _ _
 | (__| | | '  \| / / -_) '_|
  \___|_|_|_||_|_\_\___|_|

  Clinker Phase Predictor v{}

  Calciner temperature in, mineral phases out
"#,
        env!("CARGO_PKG_VERSION")
    );
}
