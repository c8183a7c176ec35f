//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api;
use crate::config::AppConfig;
use intake_core::{IntakeError, ResponseStore, StorageBackend, TimeRange, render_csv};
use std::path::{Path, PathBuf};

// =============================================================================
// SERVE COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_serve(
    data_path: &PathBuf,
    backend: &str,
    config: &AppConfig,
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), IntakeError> {
    let store = load_or_create_store(data_path, backend)?;

    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    println!("Intake Survey Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {}", host);
    println!("  Port:     {}", port);
    println!("  Backend:  {}", backend);
    println!("  Store:    {:?}", data_path);
    println!();
    println!("Endpoints:");
    println!("  POST /submit      - Record a submission");
    println!("  GET  /responses   - List responses (start/end filters)");
    println!("  GET  /export.csv  - Download responses as CSV");
    println!("  GET  /summary     - Per-group counts (Basic auth)");
    println!("  GET  /health      - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, store, config).await
}

// =============================================================================
// LIST COMMAND
// =============================================================================

/// Print stored responses, newest first.
pub fn cmd_list(
    data_path: &PathBuf,
    backend: &str,
    json_mode: bool,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<(), IntakeError> {
    let store = load_or_create_store(data_path, backend)?;
    let range = TimeRange::from_bounds(start, end);
    let records = store.list(&range)?;

    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&records).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Survey Responses");
    println!("================");
    println!("Store:   {:?}", data_path);
    println!("Backend: {}", backend);
    if !range.is_unbounded() {
        println!("Window:  {} .. {}", start.unwrap_or("*"), end.unwrap_or("*"));
    }
    println!();

    if records.is_empty() {
        println!("No responses recorded.");
        return Ok(());
    }

    for record in &records {
        println!(
            "{}  {:<20} age {:<3}  [{}]",
            record.timestamp.as_str(),
            record.name,
            record.age,
            record.assigned_group
        );
    }
    println!();
    println!("{} response(s)", records.len());

    Ok(())
}

// =============================================================================
// SUMMARY COMMAND
// =============================================================================

/// Print per-group response counts.
pub fn cmd_summary(data_path: &PathBuf, backend: &str, json_mode: bool) -> Result<(), IntakeError> {
    let store = load_or_create_store(data_path, backend)?;
    let tally = store.tally()?;

    if json_mode {
        let output = serde_json::json!({
            "store": data_path.to_string_lossy(),
            "backend": backend,
            "total": tally.total,
            "by_group": {
                "tutorial": tally.tutorial,
                "standard": tally.standard,
                "advanced": tally.advanced,
                "other": tally.other
            }
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Survey Summary");
    println!("==============");
    println!("Store:   {:?}", data_path);
    println!("Backend: {}", backend);
    println!();
    println!("Total:    {}", tally.total);
    println!("Tutorial: {}", tally.tutorial);
    println!("Standard: {}", tally.standard);
    println!("Advanced: {}", tally.advanced);
    if tally.other > 0 {
        println!("Other:    {}", tally.other);
    }

    Ok(())
}

// =============================================================================
// EXPORT COMMAND
// =============================================================================

/// Write the CSV export to a file.
pub fn cmd_export(data_path: &PathBuf, backend: &str, output: &Path) -> Result<(), IntakeError> {
    let validated_output = validate_output_path(output)?;

    let store = load_or_create_store(data_path, backend)?;
    let records = store.list(&TimeRange::all())?;
    let csv_text = render_csv(&records)?;

    std::fs::write(&validated_output, csv_text.as_bytes())
        .map_err(|e| IntakeError::IoError(format!("Write file: {}", e)))?;

    println!(
        "Exported {} response(s) to {:?}",
        records.len(),
        validated_output
    );

    Ok(())
}

// =============================================================================
// INIT COMMAND
// =============================================================================

/// Initialize a new empty store.
pub fn cmd_init(data_path: &PathBuf, backend: &str, force: bool) -> Result<(), IntakeError> {
    if backend == "memory" {
        return Err(IntakeError::IoError(
            "The memory backend has nothing to initialize".to_string(),
        ));
    }

    if data_path.exists() {
        if !force {
            return Err(IntakeError::IoError(
                "Store already exists. Use --force to overwrite.".to_string(),
            ));
        }
        std::fs::remove_file(data_path)
            .map_err(|e| IntakeError::IoError(format!("Remove existing store: {}", e)))?;
    }

    match backend {
        "redb" => {
            let _store = StorageBackend::open_redb(data_path)?;
            println!("Initialized new redb store at {:?}", data_path);
        }
        _ => {
            // open_csv writes the header row when the file is absent
            let _store = StorageBackend::open_csv(data_path)?;
            println!("Initialized new CSV store at {:?}", data_path);
        }
    }

    Ok(())
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Load or create a response store at a path with the specified backend.
///
/// Unknown backend names fall back to the CSV flat file, the service's
/// native format.
pub fn load_or_create_store(
    data_path: &PathBuf,
    backend: &str,
) -> Result<StorageBackend, IntakeError> {
    match backend {
        "redb" => StorageBackend::open_redb(data_path),
        "memory" => Ok(StorageBackend::in_memory()),
        _ => StorageBackend::open_csv(data_path),
    }
}

/// Validate an output path: the parent directory must exist.
///
/// Canonicalizing the parent resolves ".." and symlinks so the export lands
/// where the operator expects, not where a crafted path points.
fn validate_output_path(path: &Path) -> Result<PathBuf, IntakeError> {
    let parent = path.parent().unwrap_or(Path::new("."));

    let canonical_parent = parent.canonicalize().map_err(|e| {
        IntakeError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(IntakeError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| IntakeError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

// =============================================================================
// TESTS
// =============================================================================
