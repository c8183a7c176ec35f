//! # Intake Library Interface
//!
//! Exposes the API, CLI, and configuration modules so integration tests can
//! build the router and exercise endpoints without spawning a process.
//! The binary entry point lives in `main.rs`.

pub mod api;
pub mod cli;
pub mod config;
