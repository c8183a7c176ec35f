//! # redb-backed Response Storage
//!
//! A disk-backed record store using the redb embedded database:
//! - ACID transactions: an append commits fully or not at all
//! - Crash safety (copy-on-write B-trees)
//! - MVCC (concurrent readers, single writer)
//! - Zero configuration
//!
//! Records are keyed by a monotonically increasing sequence number, so
//! iteration order is insertion order, the same guarantee the flat CSV
//! file gives for free.

use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use std::path::Path;

use crate::storage::ResponseStore;
use crate::types::{IntakeError, SurveyResponse};

/// Table for responses: sequence(u64) -> serialized SurveyResponse bytes
const RESPONSES: TableDefinition<u64, &[u8]> = TableDefinition::new("responses");

/// Table for metadata: key string -> value u64
const METADATA: TableDefinition<&str, u64> = TableDefinition::new("metadata");

/// A disk-backed record store using redb.
pub struct RedbStore {
    /// The redb database handle.
    db: Database,
    /// Next available sequence number.
    next_seq: u64,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore")
            .field("next_seq", &self.next_seq)
            .finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Open or create a response database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, IntakeError> {
        let db =
            Database::create(path.as_ref()).map_err(|e| IntakeError::IoError(e.to_string()))?;

        // Initialize tables if they don't exist
        {
            let write_txn = db
                .begin_write()
                .map_err(|e| IntakeError::IoError(e.to_string()))?;
            let _ = write_txn
                .open_table(RESPONSES)
                .map_err(|e| IntakeError::IoError(e.to_string()))?;
            let _ = write_txn
                .open_table(METADATA)
                .map_err(|e| IntakeError::IoError(e.to_string()))?;
            write_txn
                .commit()
                .map_err(|e| IntakeError::IoError(e.to_string()))?;
        }

        // Load metadata
        let read_txn = db
            .begin_read()
            .map_err(|e| IntakeError::IoError(e.to_string()))?;

        let next_seq = {
            let table = read_txn
                .open_table(METADATA)
                .map_err(|e| IntakeError::IoError(e.to_string()))?;
            table
                .get("next_seq")
                .map_err(|e| IntakeError::IoError(e.to_string()))?
                .map(|v| v.value())
                .unwrap_or(0)
        };

        Ok(Self { db, next_seq })
    }

    /// Compact the database (optional optimization).
    pub fn compact(&mut self) -> Result<(), IntakeError> {
        self.db
            .compact()
            .map_err(|e| IntakeError::IoError(e.to_string()))?;
        Ok(())
    }
}

impl ResponseStore for RedbStore {
    fn append(&mut self, record: &SurveyResponse) -> Result<(), IntakeError> {
        let bytes = postcard::to_allocvec(record)
            .map_err(|e| IntakeError::SerializationError(e.to_string()))?;

        let seq = self.next_seq;
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| IntakeError::IoError(e.to_string()))?;
        {
            let mut responses = write_txn
                .open_table(RESPONSES)
                .map_err(|e| IntakeError::IoError(e.to_string()))?;
            responses
                .insert(seq, bytes.as_slice())
                .map_err(|e| IntakeError::IoError(e.to_string()))?;

            let mut metadata = write_txn
                .open_table(METADATA)
                .map_err(|e| IntakeError::IoError(e.to_string()))?;
            metadata
                .insert("next_seq", seq.saturating_add(1))
                .map_err(|e| IntakeError::IoError(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| IntakeError::IoError(e.to_string()))?;

        // In-memory counter advances only after the transaction commits.
        self.next_seq = seq.saturating_add(1);
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<SurveyResponse>, IntakeError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| IntakeError::IoError(e.to_string()))?;
        let table = read_txn
            .open_table(RESPONSES)
            .map_err(|e| IntakeError::IoError(e.to_string()))?;

        let mut records = Vec::new();
        for entry in table
            .iter()
            .map_err(|e| IntakeError::IoError(e.to_string()))?
        {
            let (_, value) = entry.map_err(|e| IntakeError::IoError(e.to_string()))?;
            let record = postcard::from_bytes(value.value())
                .map_err(|e| IntakeError::DeserializationError(e.to_string()))?;
            records.push(record);
        }

        Ok(records)
    }

    fn count(&self) -> Result<usize, IntakeError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| IntakeError::IoError(e.to_string()))?;
        let table = read_txn
            .open_table(RESPONSES)
            .map_err(|e| IntakeError::IoError(e.to_string()))?;
        let len = table
            .len()
            .map_err(|e| IntakeError::IoError(e.to_string()))?;
        Ok(len as usize)
    }
}

// =============================================================================
// TESTS
// =============================================================================
