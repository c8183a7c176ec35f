//! # Core Type Definitions
//!
//! This module contains all core types for the Intake survey engine:
//! - The stored record (`SurveyResponse`)
//! - The assignment outcome (`Group`)
//! - The stored time form (`Timestamp`)
//! - Error types (`IntakeError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Carry their stored text form losslessly (no normalization on read)
//! - Implement `Ord` where deterministic ordering matters
//! - Never panic; fallible conversions return `Option` or `Result`

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::primitives::TIMESTAMP_FORMAT;

// =============================================================================
// GROUP
// =============================================================================

/// The adaptive-difficulty bucket assigned to a respondent.
///
/// Derived once at submission time from the experience and comfort answers;
/// never recomputed or edited afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    /// Guided walkthrough track for newcomers or uneasy respondents.
    Tutorial,
    /// The default study track.
    Standard,
    /// Unassisted track for experienced, confident respondents.
    Advanced,
}

impl Group {
    /// The stored label for this group.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tutorial => "tutorial",
            Self::Standard => "standard",
            Self::Advanced => "advanced",
        }
    }

    /// Parse a stored label back into the known set.
    ///
    /// Unknown labels return `None` rather than an error: files written by
    /// older builds or edited by hand may carry values this build never
    /// assigns, and they must still load.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "tutorial" => Some(Self::Tutorial),
            "standard" => Some(Self::Standard),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// TIMESTAMP
// =============================================================================

/// Stored submission time: `YYYY-MM-DDTHH:MM:SS`, UTC, seconds precision.
///
/// Kept as text so rows with legacy or hand-edited timestamps stay
/// representable end to end; parsing happens at sort and filter time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub String);

impl Timestamp {
    /// Create a timestamp from its stored text form.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// The current UTC time in the stored format.
    #[must_use]
    pub fn now() -> Self {
        Self(chrono::Utc::now().format(TIMESTAMP_FORMAT).to_string())
    }

    /// Get the timestamp as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the stored text against the canonical format.
    ///
    /// Returns `None` for text in any other shape; such rows sort after
    /// all parsable ones and never match a bounded filter.
    #[must_use]
    pub fn parse(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.0, TIMESTAMP_FORMAT).ok()
    }
}

// =============================================================================
// SURVEY RESPONSE
// =============================================================================

/// One stored questionnaire submission plus its derived group.
///
/// Records are immutable post-creation: no update or delete operation
/// exists anywhere in the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyResponse {
    /// UTC submission time, stamped by the Recorder.
    pub timestamp: Timestamp,
    /// Respondent name, non-empty after trimming.
    pub name: String,
    /// Respondent age in years, parsed from digit-only text.
    pub age: u32,
    /// Prior robot-arm experience (`never`, `demo_only`, `often`, or free text).
    pub q_arm_experience: String,
    /// Preferred control scheme. Recorded verbatim, never branched on.
    pub q_control: String,
    /// Comfort around robots (`very_uncomfortable` through `very_comfortable`).
    pub q_comfort: String,
    /// Group label derived at submission time. Stored as text so unknown
    /// historical labels survive round-trips unchanged.
    pub assigned_group: String,
}

impl SurveyResponse {
    /// The stored group label parsed back into the known set, if it is one.
    #[must_use]
    pub fn group(&self) -> Option<Group> {
        Group::from_label(&self.assigned_group)
    }

    /// Parsed submission time, `None` when the stored text is not in the
    /// canonical format.
    #[must_use]
    pub fn submitted_at(&self) -> Option<NaiveDateTime> {
        self.timestamp.parse()
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Intake system.
///
/// - No silent failures
/// - Use `Result<T, IntakeError>` for fallible operations
/// - The CORE should never panic; all errors must be recoverable
#[derive(Debug, Error)]
pub enum IntakeError {
    /// A submission failed validation; nothing was written.
    #[error("Invalid submission: {0}")]
    InvalidSubmission(&'static str),

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A deserialization error occurred.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================
