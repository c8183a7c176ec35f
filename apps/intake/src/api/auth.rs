//! # Authentication Module
//!
//! HTTP Basic authentication for the researcher-facing summary endpoint.
//!
//! ## Configuration
//!
//! Credentials are resolved once at startup (config file `[admin]` section
//! or `INTAKE_ADMIN_USER` / `INTAKE_ADMIN_PASS`) and injected into this
//! middleware as router state. Nothing here reads the environment
//! per-request, and the router only installs the layer when credentials
//! exist.
//!
//! ## Usage
//!
//! Send credentials in the Authorization header:
//! ```text
//! Authorization: Basic base64(username:password)
//! ```

use crate::config::AdminCredentials;
use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::Engine;
use subtle::ConstantTimeEq;

// =============================================================================
// BASIC AUTHENTICATION
// =============================================================================

/// Basic auth middleware for the summary route.
///
/// Returns 401 with a `WWW-Authenticate: Basic` challenge when the header
/// is missing, malformed, or carries wrong credentials. Both the username
/// and the password are compared in constant time.
pub async fn basic_auth_middleware(
    State(credentials): State<AdminCredentials>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let Some(header_value) = auth_header else {
        tracing::warn!(
            event = "auth_failure",
            reason = "missing_authorization_header",
            "Missing Authorization header"
        );
        return Err(challenge());
    };

    match decode_basic(header_value) {
        Some((username, password))
            if constant_time_eq(&username, &credentials.username)
                && constant_time_eq(&password, &credentials.password) =>
        {
            Ok(next.run(request).await)
        }
        Some(_) => {
            tracing::warn!(
                event = "auth_failure",
                reason = "invalid_credentials",
                "Authentication failed: invalid credentials"
            );
            Err(challenge())
        }
        None => {
            tracing::warn!(
                event = "auth_failure",
                reason = "malformed_authorization_header",
                "Authentication failed: malformed Authorization header"
            );
            Err(challenge())
        }
    }
}

/// 401 response carrying the Basic challenge.
fn challenge() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Basic realm=\"intake\"")],
        "Unauthorized",
    )
        .into_response()
}

/// Decode a `Basic <base64>` Authorization header into (username, password).
///
/// Returns `None` for non-Basic schemes, invalid base64, non-UTF-8
/// payloads, and payloads without a `:` separator.
fn decode_basic(header_value: &str) -> Option<(String, String)> {
    let encoded = header_value.strip_prefix("Basic ")?;
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .ok()?;
    let text = String::from_utf8(decoded).ok()?;
    let (username, password) = text.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// Constant-time string comparison.
///
/// Pads both sides to the same length so `ct_eq` always runs over the same
/// number of bytes, preventing length-leaking side channels.
fn constant_time_eq(provided: &str, expected: &str) -> bool {
    let provided_bytes = provided.as_bytes();
    let expected_bytes = expected.as_bytes();

    let max_len = provided_bytes.len().max(expected_bytes.len());
    let mut padded_provided = vec![0u8; max_len];
    let mut padded_expected = vec![0u8; max_len];
    padded_provided[..provided_bytes.len()].copy_from_slice(provided_bytes);
    padded_expected[..expected_bytes.len()].copy_from_slice(expected_bytes);

    let bytes_match: bool = padded_provided.ct_eq(&padded_expected).into();
    bytes_match && provided_bytes.len() == expected_bytes.len()
}

// =============================================================================
// TESTS
// =============================================================================
