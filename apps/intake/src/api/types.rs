//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API. The submission
//! payload itself is [`intake_core::Submission`]; everything the service
//! sends back is shaped here.

use intake_core::GroupTally;
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// SUBMIT RESPONSE
// =============================================================================

/// Result of `POST /submit`.
///
/// Success carries the derived group so the frontend can route the
/// respondent immediately; failure carries the rejection reason. The unused
/// half is omitted from the JSON entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub assigned_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub error: Option<String>,
}

impl SubmitResponse {
    pub fn success(group: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            assigned_group: Some(group.into()),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            assigned_group: None,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// LIST QUERY
// =============================================================================

/// Query parameters for `GET /responses`.
///
/// Both bounds are inclusive and optional. Values that do not parse as
/// `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD` are treated as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

// =============================================================================
// SUMMARY RESPONSE
// =============================================================================

/// Aggregate view returned by `GET /summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub total: u64,
    pub by_group: ByGroup,
}

/// Per-group counts inside [`SummaryResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ByGroup {
    pub tutorial: u64,
    pub standard: u64,
    pub advanced: u64,
    pub other: u64,
}

impl From<GroupTally> for SummaryResponse {
    fn from(tally: GroupTally) -> Self {
        Self {
            total: tally.total,
            by_group: ByGroup {
                tutorial: tally.tutorial,
                standard: tally.standard,
                advanced: tally.advanced,
                other: tally.other,
            },
        }
    }
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

/// Error body for read endpoints (listing, export, summary).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            error: msg.into(),
        }
    }
}
