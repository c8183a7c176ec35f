//! # CSV Codec
//!
//! Render and parse the tabular surface of the response store.
//!
//! The column order is fixed (see [`CSV_COLUMNS`]) and shared by the
//! export endpoint, the CLI export command, and the flat-file backend.
//! Reads are positional: the first row is skipped as the header and each
//! cell is taken by index, with missing cells reading as empty.

use crate::primitives::CSV_COLUMNS;
use crate::types::{IntakeError, SurveyResponse, Timestamp};

/// Render records as CSV text: the fixed header row followed by one row
/// per record, in the order given.
///
/// Field text passes through the csv writer's minimal quoting, so commas,
/// quotes, and newlines inside fields survive a round-trip.
pub fn render_csv(records: &[SurveyResponse]) -> Result<String, IntakeError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(CSV_COLUMNS)
        .map_err(|e| IntakeError::SerializationError(e.to_string()))?;

    for record in records {
        writer
            .write_record(&record_row(record))
            .map_err(|e| IntakeError::SerializationError(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| IntakeError::SerializationError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| IntakeError::SerializationError(e.to_string()))
}

/// Parse CSV text back into records.
///
/// Lenient by design: short rows are padded with empty cells and an age
/// cell that does not parse reads as zero. Only hand-edited files contain
/// either; the store itself never writes them.
pub fn parse_csv(text: &str) -> Result<Vec<SurveyResponse>, IntakeError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| IntakeError::DeserializationError(e.to_string()))?;
        records.push(record_from_row(&row));
    }

    Ok(records)
}

/// One CSV row for a record, cells in [`CSV_COLUMNS`] order.
/// Shared with the flat-file backend so both write the exact same rows.
pub(crate) fn record_row(record: &SurveyResponse) -> [String; 7] {
    [
        record.timestamp.as_str().to_string(),
        record.name.clone(),
        record.age.to_string(),
        record.q_arm_experience.clone(),
        record.q_control.clone(),
        record.q_comfort.clone(),
        record.assigned_group.clone(),
    ]
}

/// Rebuild a record from one CSV row, cells taken by position.
fn record_from_row(row: &csv::StringRecord) -> SurveyResponse {
    let cell = |i: usize| row.get(i).unwrap_or("").to_string();

    SurveyResponse {
        timestamp: Timestamp::new(cell(0)),
        name: cell(1),
        age: row.get(2).unwrap_or("").trim().parse().unwrap_or(0),
        q_arm_experience: cell(3),
        q_control: cell(4),
        q_comfort: cell(5),
        assigned_group: cell(6),
    }
}

// =============================================================================
// TESTS
// =============================================================================
