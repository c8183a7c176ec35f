//! # Intake CLI Module
//!
//! This module implements the CLI interface for the intake service.
//!
//! ## Available Commands
//!
//! - `serve` - Start the HTTP server
//! - `list` - Print stored responses (optional time window)
//! - `summary` - Print per-group counts
//! - `export` - Write the CSV export to a file
//! - `init` - Create an empty store

mod commands;

use clap::{Parser, Subcommand};
use intake_core::IntakeError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Intake - Adaptive Survey Intake Service
///
/// Accepts questionnaire submissions, buckets each respondent into a
/// difficulty group, and keeps an append-only response log.
#[derive(Parser, Debug)]
#[command(name = "intake")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the response store (overrides the configured storage path)
    #[arg(short = 'D', long, global = true)]
    pub data: Option<PathBuf>,

    /// Storage backend: "csv" (flat file), "redb" (ACID database), or "memory"
    #[arg(short = 'B', long, global = true)]
    pub backend: Option<String>,

    /// Path to a TOML config file (default: intake.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

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
    Serve {
        /// Host to bind to (overrides the configured host)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides the configured port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print stored responses, newest first
    List {
        /// Inclusive lower bound (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)
        #[arg(short, long)]
        start: Option<String>,

        /// Inclusive upper bound (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)
        #[arg(short, long)]
        end: Option<String>,
    },

    /// Print per-group response counts
    Summary,

    /// Write the CSV export to a file
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Initialize a new empty store
    Init {
        /// Force initialization even if the store exists
        #[arg(short, long)]
        force: bool,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), IntakeError> {
    let config = crate::config::AppConfig::load(cli.config.as_deref())?;

    // CLI flags override the config file, which overrides built-in defaults.
    let data_path = cli
        .data
        .clone()
        .unwrap_or_else(|| config.storage.path.clone());
    let backend = cli
        .backend
        .clone()
        .unwrap_or_else(|| config.storage.backend.clone());
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Serve { host, port }) => {
            cmd_serve(&data_path, &backend, &config, host, port).await
        }
        Some(Commands::List { start, end }) => cmd_list(
            &data_path,
            &backend,
            json_mode,
            start.as_deref(),
            end.as_deref(),
        ),
        Some(Commands::Summary) => cmd_summary(&data_path, &backend, json_mode),
        Some(Commands::Export { output }) => cmd_export(&data_path, &backend, &output),
        Some(Commands::Init { force }) => cmd_init(&data_path, &backend, force),
        None => {
            // No subcommand - show the summary by default
            cmd_summary(&data_path, &backend, json_mode)
        }
    }
}
