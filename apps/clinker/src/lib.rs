//! # Clinker
//!
//! Library half of the clinker binary: the HTTP API, the CLI and the
//! configuration file loader. `main.rs` only sets up logging and dispatches.

pub mod api;
pub mod cli;
pub mod config;
