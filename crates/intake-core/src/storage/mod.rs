//! # Storage Module
//!
//! The persistence seam of the response store.
//!
//! Backends implement the narrow [`ResponseStore`] contract: durably
//! append one record, load everything back in insertion order. Listing,
//! tallying, and counting are provided on top of `load_all`, so every
//! read re-queries the backend and there is no cache to invalidate.
//!
//! ## Storage Backends
//!
//! - `Memory`: in-memory records (fast, volatile)
//! - `Csv`: flat file in the original field layout (human-readable)
//! - `Redb`: disk-backed ACID storage

use std::path::Path;

use crate::query::{GroupTally, TimeRange, filter_newest_first};
use crate::types::{IntakeError, SurveyResponse};

pub mod csv_store;
pub mod redb_store;

pub use csv_store::CsvStore;
pub use redb_store::RedbStore;

// =============================================================================
// RESPONSE STORE CONTRACT
// =============================================================================

/// The narrow persistence contract shared by all backends.
///
/// A backend only has to append durably and load back in insertion order;
/// the read operations are defined over `load_all` so their semantics
/// cannot drift between backends.
pub trait ResponseStore {
    /// Durably append one finished record.
    ///
    /// No uniqueness constraint, no deduplication: identical records are
    /// stored as distinct rows. Nothing is written on error.
    fn append(&mut self, record: &SurveyResponse) -> Result<(), IntakeError>;

    /// Load every stored record in insertion order.
    fn load_all(&self) -> Result<Vec<SurveyResponse>, IntakeError>;

    /// Records inside the window, newest first, rows with unparsable
    /// timestamps last.
    fn list(&self, range: &TimeRange) -> Result<Vec<SurveyResponse>, IntakeError> {
        Ok(filter_newest_first(self.load_all()?, range))
    }

    /// Aggregate counts over all stored records.
    fn tally(&self) -> Result<GroupTally, IntakeError> {
        Ok(GroupTally::from_records(&self.load_all()?))
    }

    /// Total number of stored records.
    fn count(&self) -> Result<usize, IntakeError> {
        Ok(self.load_all()?.len())
    }
}

// =============================================================================
// IN-MEMORY STORE
// =============================================================================

/// In-memory record store (fast, volatile).
///
/// The default backend for tests and ephemeral runs. Nothing survives
/// the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<SurveyResponse>,
}

impl MemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResponseStore for MemoryStore {
    fn append(&mut self, record: &SurveyResponse) -> Result<(), IntakeError> {
        self.records.push(record.clone());
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<SurveyResponse>, IntakeError> {
        Ok(self.records.clone())
    }

    fn count(&self) -> Result<usize, IntakeError> {
        Ok(self.records.len())
    }
}

// =============================================================================
// BACKEND SELECTION
// =============================================================================

/// Storage backend for the response store.
///
/// The app layer holds one of these behind its state lock and dispatches
/// every operation through the shared contract, so the backend choice is
/// set once at startup and invisible everywhere else.
#[derive(Debug)]
pub enum StorageBackend {
    /// In-memory records (fast, volatile).
    Memory(MemoryStore),
    /// Flat CSV file in the fixed column layout (human-readable).
    Csv(CsvStore),
    /// Disk-backed store using redb (ACID, persistent).
    Redb(RedbStore),
}

impl Default for StorageBackend {
    fn default() -> Self {
        Self::Memory(MemoryStore::new())
    }
}

// NOTE: StorageBackend does NOT implement Clone.
// RedbStore (database handle) cannot be safely cloned.

impl StorageBackend {
    /// Create an in-memory backend.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a flat-file backend, creating the file with its header row
    /// when absent.
    pub fn open_csv(path: impl AsRef<Path>) -> Result<Self, IntakeError> {
        Ok(Self::Csv(CsvStore::open(path)?))
    }

    /// Open a redb backend, creating the database when absent.
    pub fn open_redb(path: impl AsRef<Path>) -> Result<Self, IntakeError> {
        Ok(Self::Redb(RedbStore::open(path)?))
    }

    /// Whether records survive the process.
    #[must_use]
    pub const fn is_persistent(&self) -> bool {
        !matches!(self, Self::Memory(_))
    }

    /// Short backend label for logs and CLI output.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Csv(_) => "csv",
            Self::Redb(_) => "redb",
        }
    }
}

impl ResponseStore for StorageBackend {
    fn append(&mut self, record: &SurveyResponse) -> Result<(), IntakeError> {
        match self {
            Self::Memory(store) => store.append(record),
            Self::Csv(store) => store.append(record),
            Self::Redb(store) => store.append(record),
        }
    }

    fn load_all(&self) -> Result<Vec<SurveyResponse>, IntakeError> {
        match self {
            Self::Memory(store) => store.load_all(),
            Self::Csv(store) => store.load_all(),
            Self::Redb(store) => store.load_all(),
        }
    }

    fn count(&self) -> Result<usize, IntakeError> {
        match self {
            Self::Memory(store) => store.count(),
            Self::Csv(store) => store.count(),
            Self::Redb(store) => store.count(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
