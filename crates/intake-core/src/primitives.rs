//! # Domain Constants
//!
//! Hardcoded formats and limits for the Intake CORE.
//!
//! The survey pipeline starts with zero data but fixed shape: the stored
//! timestamp format, the CSV column order, and the input limits are compiled
//! into the binary and immutable at runtime.

/// Stored timestamp format: UTC wall-clock, seconds precision, no offset.
///
/// Every record stamps its submission time in this form, and the query
/// layer parses it back with the same pattern. Text that does not match
/// is carried along unparsed and sorts after all parsable rows.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Bare-date form accepted in filter bounds.
///
/// A bare start date means midnight; a bare end date widens to 23:59:59
/// so the bound includes its whole day.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fixed column order of the tabular surface.
///
/// Export, re-import, and the flat-file backend all use exactly this
/// order. Reordering is a breaking change for downstream analysis scripts.
pub const CSV_COLUMNS: [&str; 7] = [
    "timestamp",
    "name",
    "age",
    "q_arm_experience",
    "q_control",
    "q_comfort",
    "assigned_group",
];

/// Default flat-file store location, relative to the working directory.
pub const DEFAULT_CSV_PATH: &str = "survey_responses.csv";

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length for the name field, in bytes.
///
/// Names longer than this will be rejected by the Recorder.
/// This prevents memory exhaustion from malicious or malformed input.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum length for each question answer, in bytes.
///
/// Answers longer than this will be rejected by the Recorder.
/// Recognized categorical answers are far shorter; the cap only exists
/// to bound free-text abuse.
pub const MAX_ANSWER_LENGTH: usize = 500;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_order_is_fixed() {
        // Downstream analysis scripts index columns by position.
        assert_eq!(CSV_COLUMNS[0], "timestamp");
        assert_eq!(CSV_COLUMNS[6], "assigned_group");
        assert_eq!(CSV_COLUMNS.len(), 7);
    }

    #[test]
    fn timestamp_format_has_no_offset() {
        assert!(!TIMESTAMP_FORMAT.contains("%z"));
        assert!(!TIMESTAMP_FORMAT.contains("%Z"));
    }
}
