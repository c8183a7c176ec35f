//! # CSV-backed Response Storage
//!
//! The original flat-file layout: one CSV file with the fixed header,
//! one row appended per submission. Human-readable, diff-able, and
//! directly loadable by spreadsheet or analysis tooling.
//!
//! Every read re-parses the whole file; there is no cache to go stale.
//! The file is created with its header on first use and only ever
//! appended to afterwards.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::export::{parse_csv, record_row};
use crate::primitives::CSV_COLUMNS;
use crate::storage::ResponseStore;
use crate::types::{IntakeError, SurveyResponse};

/// A flat-file record store in the fixed CSV layout.
///
/// Holds only the path; the file itself is the state. Concurrent
/// processes appending to the same file interleave whole rows, the same
/// guarantee the layout has always had.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    /// Open a store at the given path, creating the file with its header
    /// row when absent.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, IntakeError> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
        };
        store.ensure_header()?;
        Ok(store)
    }

    /// Create the file with its header row when it does not exist yet.
    ///
    /// Called on open and again before every append, so a file deleted
    /// out from under a running process comes back instead of producing
    /// a headerless orphan.
    fn ensure_header(&self) -> Result<(), IntakeError> {
        if self.path.exists() {
            return Ok(());
        }

        let file = File::create(&self.path).map_err(|e| IntakeError::IoError(e.to_string()))?;
        let mut writer = csv::Writer::from_writer(file);
        writer
            .write_record(CSV_COLUMNS)
            .map_err(|e| IntakeError::SerializationError(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| IntakeError::IoError(e.to_string()))?;
        Ok(())
    }
}

impl ResponseStore for CsvStore {
    fn append(&mut self, record: &SurveyResponse) -> Result<(), IntakeError> {
        self.ensure_header()?;

        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| IntakeError::IoError(e.to_string()))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer
            .write_record(&record_row(record))
            .map_err(|e| IntakeError::SerializationError(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| IntakeError::IoError(e.to_string()))?;

        Ok(())
    }

    fn load_all(&self) -> Result<Vec<SurveyResponse>, IntakeError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let text =
            std::fs::read_to_string(&self.path).map_err(|e| IntakeError::IoError(e.to_string()))?;
        parse_csv(&text)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::TimeRange;
    use crate::types::Timestamp;
    use tempfile::tempdir;

    fn make_record(timestamp: &str, name: &str) -> SurveyResponse {
        SurveyResponse {
            timestamp: Timestamp::new(timestamp),
            name: name.to_string(),
            age: 30,
            q_arm_experience: "demo_only".to_string(),
            q_control: "joystick".to_string(),
            q_comfort: "comfortable".to_string(),
            assigned_group: "standard".to_string(),
        }
    }

    #[test]
    fn open_creates_file_with_header() {
        let temp = tempdir().expect("temp dir");
        let path = temp.path().join("responses.csv");

        CsvStore::open(&path).expect("open");

        let text = std::fs::read_to_string(&path).expect("read");
        assert_eq!(text.trim_end(), CSV_COLUMNS.join(","));
    }

    #[test]
    fn open_leaves_existing_file_alone() {
        let temp = tempdir().expect("temp dir");
        let path = temp.path().join("responses.csv");

        let mut store = CsvStore::open(&path).expect("open");
        store
            .append(&make_record("2026-03-01T09:00:00", "P0"))
            .expect("append");

        // Re-opening must not truncate or re-write the header.
        let store = CsvStore::open(&path).expect("reopen");
        assert_eq!(store.count().expect("count"), 1);
    }

    #[test]
    fn append_and_load_round_trip() {
        let temp = tempdir().expect("temp dir");
        let path = temp.path().join("responses.csv");
        let mut store = CsvStore::open(&path).expect("open");

        let first = make_record("2026-03-01T09:00:00", "P0");
        let second = make_record("2026-03-01T10:00:00", "Smith, Ada");
        store.append(&first).expect("append");
        store.append(&second).expect("append");

        let all = store.load_all().expect("load");
        assert_eq!(all, vec![first, second]);
    }

    #[test]
    fn records_persist_across_reopen() {
        let temp = tempdir().expect("temp dir");
        let path = temp.path().join("responses.csv");

        {
            let mut store = CsvStore::open(&path).expect("open");
            store
                .append(&make_record("2026-03-01T09:00:00", "P0"))
                .expect("append");
            store
                .append(&make_record("2026-03-01T10:00:00", "P1"))
                .expect("append");
        }

        let store = CsvStore::open(&path).expect("reopen");
        let listed = store.list(&TimeRange::all()).expect("list");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "P1");
    }

    #[test]
    fn tolerates_hand_edited_rows() {
        let temp = tempdir().expect("temp dir");
        let path = temp.path().join("responses.csv");
        let mut store = CsvStore::open(&path).expect("open");
        store
            .append(&make_record("2026-03-01T09:00:00", "P0"))
            .expect("append");

        // A short row someone pasted in by hand.
        use std::io::Write;
        let mut file = OpenOptions::new().append(true).open(&path).expect("open");
        writeln!(file, "not-a-timestamp,P1,31").expect("write");

        let all = store.load_all().expect("load");
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].name, "P1");
        assert!(all[1].timestamp.parse().is_none());

        // The dirty row sorts last in a listing.
        let listed = store.list(&TimeRange::all()).expect("list");
        assert_eq!(listed[1].name, "P1");
    }

    #[test]
    fn deleted_file_comes_back_on_append() {
        let temp = tempdir().expect("temp dir");
        let path = temp.path().join("responses.csv");
        let mut store = CsvStore::open(&path).expect("open");

        std::fs::remove_file(&path).expect("remove");
        assert_eq!(store.count().expect("count"), 0);

        store
            .append(&make_record("2026-03-01T09:00:00", "P0"))
            .expect("append");

        let text = std::fs::read_to_string(&path).expect("read");
        assert!(text.starts_with("timestamp,"));
        assert_eq!(store.count().expect("count"), 1);
    }
}
