//! Unit tests for API types serialization/deserialization.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use intake::api::{ErrorResponse, HealthResponse, ListQuery, SubmitResponse, SummaryResponse};
use intake_core::GroupTally;

// =============================================================================
// HEALTH RESPONSE TESTS
// =============================================================================

#[test]
fn test_health_response_default() {
    let health = HealthResponse::default();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}

#[test]
fn test_health_response_serialization() {
    let health = HealthResponse {
        status: "ok".to_string(),
        version: "0.3.1".to_string(),
    };

    let json = serde_json::to_string(&health).unwrap();
    assert!(json.contains("\"status\":\"ok\""));
    assert!(json.contains("\"version\":\"0.3.1\""));
}

#[test]
fn test_health_response_deserialization() {
    let json = r#"{"status":"healthy","version":"1.0.0"}"#;
    let health: HealthResponse = serde_json::from_str(json).unwrap();

    assert_eq!(health.status, "healthy");
    assert_eq!(health.version, "1.0.0");
}

// =============================================================================
// SUBMIT RESPONSE TESTS
// =============================================================================

#[test]
fn test_submit_response_success() {
    let response = SubmitResponse::success("tutorial");

    assert_eq!(response.status, "ok");
    assert_eq!(response.assigned_group, Some("tutorial".to_string()));
    assert!(response.error.is_none());
}

#[test]
fn test_submit_response_error() {
    let response = SubmitResponse::error("Invalid age");

    assert_eq!(response.status, "error");
    assert!(response.assigned_group.is_none());
    assert_eq!(response.error, Some("Invalid age".to_string()));
}

#[test]
fn test_submit_response_success_omits_error_field() {
    let response = SubmitResponse::success("advanced");
    let json = serde_json::to_string(&response).unwrap();

    assert!(json.contains("\"status\":\"ok\""));
    assert!(json.contains("\"assigned_group\":\"advanced\""));
    assert!(!json.contains("error"));
}

#[test]
fn test_submit_response_error_omits_group_field() {
    let response = SubmitResponse::error("Name is required");
    let json = serde_json::to_string(&response).unwrap();

    assert!(json.contains("\"status\":\"error\""));
    assert!(json.contains("\"error\":\"Name is required\""));
    assert!(!json.contains("assigned_group"));
}

#[test]
fn test_submit_response_deserializes_without_optional_fields() {
    let json = r#"{"status":"ok"}"#;
    let response: SubmitResponse = serde_json::from_str(json).unwrap();

    assert_eq!(response.status, "ok");
    assert!(response.assigned_group.is_none());
    assert!(response.error.is_none());
}

// =============================================================================
// LIST QUERY TESTS
// =============================================================================

#[test]
fn test_list_query_default_is_unbounded() {
    let query = ListQuery::default();
    assert!(query.start.is_none());
    assert!(query.end.is_none());
}

#[test]
fn test_list_query_deserialization() {
    let json = r#"{"start":"2024-03-01T00:00:00","end":"2024-03-02T00:00:00"}"#;
    let query: ListQuery = serde_json::from_str(json).unwrap();

    assert_eq!(query.start, Some("2024-03-01T00:00:00".to_string()));
    assert_eq!(query.end, Some("2024-03-02T00:00:00".to_string()));
}

#[test]
fn test_list_query_single_bound() {
    let json = r#"{"start":"2024-03-01T00:00:00"}"#;
    let query: ListQuery = serde_json::from_str(json).unwrap();

    assert!(query.start.is_some());
    assert!(query.end.is_none());
}

// =============================================================================
// SUMMARY RESPONSE TESTS
// =============================================================================

#[test]
fn test_summary_response_from_tally() {
    let tally = GroupTally {
        total: 7,
        tutorial: 3,
        standard: 2,
        advanced: 1,
        other: 1,
    };

    let summary = SummaryResponse::from(tally);

    assert_eq!(summary.total, 7);
    assert_eq!(summary.by_group.tutorial, 3);
    assert_eq!(summary.by_group.standard, 2);
    assert_eq!(summary.by_group.advanced, 1);
    assert_eq!(summary.by_group.other, 1);
}

#[test]
fn test_summary_response_serialization() {
    let tally = GroupTally {
        total: 2,
        tutorial: 1,
        standard: 1,
        advanced: 0,
        other: 0,
    };

    let json = serde_json::to_string(&SummaryResponse::from(tally)).unwrap();
    assert!(json.contains("\"total\":2"));
    assert!(json.contains("\"by_group\":{"));
    assert!(json.contains("\"tutorial\":1"));
    assert!(json.contains("\"advanced\":0"));
}

#[test]
fn test_summary_response_deserialization() {
    let json =
        r#"{"total":5,"by_group":{"tutorial":2,"standard":2,"advanced":1,"other":0}}"#;
    let summary: SummaryResponse = serde_json::from_str(json).unwrap();

    assert_eq!(summary.total, 5);
    assert_eq!(summary.by_group.tutorial, 2);
    assert_eq!(summary.by_group.standard, 2);
    assert_eq!(summary.by_group.advanced, 1);
    assert_eq!(summary.by_group.other, 0);
}

// =============================================================================
// ERROR RESPONSE TESTS
// =============================================================================

#[test]
fn test_error_response_new() {
    let response = ErrorResponse::new("Store failed: disk full");

    assert_eq!(response.status, "error");
    assert_eq!(response.error, "Store failed: disk full");
}

#[test]
fn test_error_response_serialization() {
    let response = ErrorResponse::new("boom");
    let json = serde_json::to_string(&response).unwrap();

    assert!(json.contains("\"status\":\"error\""));
    assert!(json.contains("\"error\":\"boom\""));
}
