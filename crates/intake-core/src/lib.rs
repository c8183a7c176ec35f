//! # intake-core
//!
//! The deterministic survey engine for Intake - THE LOGIC.
//!
//! This crate implements the whole domain of the intake service: the
//! group-assignment decision table, submission validation, the time-range
//! query layer, the CSV codec, and the storage backends behind one narrow
//! contract.
//!
//! ## Architectural Constraints
//!
//! - Records are append-only: immutable once stored, no update or delete
//!   path exists anywhere in this crate
//! - The assigned group is derived exactly once, at append time, and never
//!   recomputed
//! - Reads re-query the backend; nothing is cached
//! - NO async, NO network dependencies (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod assign;
pub mod export;
pub mod primitives;
pub mod query;
pub mod storage;
pub mod submission;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Group, IntakeError, SurveyResponse, Timestamp};

// =============================================================================
// RE-EXPORTS: Survey Engine
// =============================================================================

pub use assign::assign_group;
pub use export::{parse_csv, render_csv};
pub use query::{GroupTally, TimeRange, filter_newest_first, sort_newest_first};
pub use storage::{CsvStore, MemoryStore, RedbStore, ResponseStore, StorageBackend};
pub use submission::{Recorder, Submission};
