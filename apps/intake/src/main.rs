//! # Intake - Adaptive Survey Intake Service
//!
//! The main binary for the Intake survey service.
//!
//! This application provides:
//! - HTTP REST API server (axum-based)
//! - CLI interface for inspecting and exporting stored responses
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                 apps/intake (THE BINARY)                │
//! │                                                         │
//! │   ┌─────────────┐               ┌─────────────┐         │
//! │   │   CLI       │               │  HTTP API   │         │
//! │   │  (clap)     │               │  (axum)     │         │
//! │   └──────┬──────┘               └──────┬──────┘         │
//! │          │                             │                │
//! │          └─────────────┬───────────────┘                │
//! │                        ▼                                │
//! │                ┌───────────────┐                        │
//! │                │  intake-core  │                        │
//! │                │  (THE LOGIC)  │                        │
//! │                └───────────────┘                        │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! intake serve --host 0.0.0.0 --port 8080
//!
//! # CLI operations
//! intake list --start 2026-01-01
//! intake summary --json-mode
//! intake export --output backup.csv
//! ```

mod api;
mod cli;
mod config;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Initialize tracing — INTAKE_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("INTAKE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "intake=debug,tower_http=debug"
    } else {
        "intake=info,tower_http=debug"
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

    // Display startup banner
    if !cli.quiet {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Intake startup banner.
fn print_banner() {
    println!(
        r#"
  ██╗███╗   ██╗████████╗ █████╗ ██╗  ██╗███████╗
  ██║████╗  ██║╚══██╔══╝██╔══██╗██║ ██╔╝██╔════╝
  ██║██╔██╗ ██║   ██║   ███████║█████╔╝ █████╗
  ██║██║╚██╗██║   ██║   ██╔══██║██╔═██╗ ██╔══╝
  ██║██║ ╚████║   ██║   ██║  ██║██║  ██╗███████╗
  ╚═╝╚═╝  ╚═══╝   ╚═╝   ╚═╝  ╚═╝╚═╝  ╚═╝╚══════╝

  Survey Intake Service v{}

  Append-only • Deterministic grouping • CSV-friendly
"#,
        env!("CARGO_PKG_VERSION")
    );
}
