//! # Submission Intake
//!
//! Validation and recording protocol for raw questionnaire payloads.
//!
//! - Validate submissions before any store mutation
//! - Reject malformed input
//! - Stamp time and derive the group exactly once, at append time
//! - No deduplication: identical submissions are distinct records

use serde::{Deserialize, Serialize};

use crate::assign::assign_group;
use crate::primitives::{MAX_ANSWER_LENGTH, MAX_NAME_LENGTH};
use crate::storage::ResponseStore;
use crate::types::{IntakeError, SurveyResponse, Timestamp};

/// A raw submission as it arrives from a form or API client.
///
/// All fields are text, and fields absent from a payload deserialize as
/// empty strings. Name trimming, the age digit gate, and the age parse
/// happen in [`Recorder::validate`]; age and question answers pass through
/// verbatim, including their whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Submission {
    pub name: String,
    pub age: String,
    pub q_arm_experience: String,
    pub q_control: String,
    pub q_comfort: String,
}

impl Submission {
    /// Build a submission from its parts.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        age: impl Into<String>,
        q_arm_experience: impl Into<String>,
        q_control: impl Into<String>,
        q_comfort: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            age: age.into(),
            q_arm_experience: q_arm_experience.into(),
            q_control: q_control.into(),
            q_comfort: q_comfort.into(),
        }
    }
}

/// The Recorder handles submission validation and store appends.
///
/// It is the only write path into a store:
/// - Accepts raw payloads from the API or CLI
/// - Trims the name and gates the age field
/// - Derives the group via the assignment engine and appends atomically
pub struct Recorder;

impl Recorder {
    /// Validate a raw submission without touching any store.
    ///
    /// A submission is valid if:
    /// - The name is non-empty after trimming and within length limits
    /// - The age is digit-only text that parses as `u32`
    /// - Each question answer is within length limits
    ///
    /// Returns the trimmed name and parsed age on success.
    pub fn validate(submission: &Submission) -> Result<(String, u32), IntakeError> {
        let name = submission.name.trim();

        // Name must be non-empty
        if name.is_empty() {
            return Err(IntakeError::InvalidSubmission("name must not be empty"));
        }

        // Name length check
        if name.len() > MAX_NAME_LENGTH {
            return Err(IntakeError::InvalidSubmission("name is too long"));
        }

        let age = parse_age(&submission.age)?;

        // Answer length checks
        for answer in [
            &submission.q_arm_experience,
            &submission.q_control,
            &submission.q_comfort,
        ] {
            if answer.len() > MAX_ANSWER_LENGTH {
                return Err(IntakeError::InvalidSubmission("answer is too long"));
            }
        }

        Ok((name.to_string(), age))
    }

    /// Validate a submission, stamp the current UTC time, derive the group,
    /// and append the finished record.
    ///
    /// Works with any store backend. Nothing is written when validation
    /// fails; on success the returned record is exactly what was stored.
    pub fn record<S: ResponseStore>(
        store: &mut S,
        submission: &Submission,
    ) -> Result<SurveyResponse, IntakeError> {
        let (name, age) = Self::validate(submission)?;

        let group = assign_group(&submission.q_arm_experience, &submission.q_comfort);

        let response = SurveyResponse {
            timestamp: Timestamp::now(),
            name,
            age,
            q_arm_experience: submission.q_arm_experience.clone(),
            q_control: submission.q_control.clone(),
            q_comfort: submission.q_comfort.clone(),
            assigned_group: group.as_str().to_string(),
        };

        store.append(&response)?;

        Ok(response)
    }
}

/// Parse the age field: digit-only text, no sign, no decimal point, no
/// surrounding whitespace.
///
/// `u32::from_str` alone would admit a leading `+`, which the digit gate
/// rejects first. The gate runs on the raw text, so whitespace-padded
/// values like `" 30 "` are rejected, not silently cleaned up.
fn parse_age(raw: &str) -> Result<u32, IntakeError> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(IntakeError::InvalidSubmission("age must be digits only"));
    }

    raw.parse::<u32>()
        .map_err(|_| IntakeError::InvalidSubmission("age is out of range"))
}

// =============================================================================
// TESTS
// =============================================================================
