//! # Intake HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `POST /submit` - Record a survey submission
//! - `GET /responses` - List stored responses, newest first (optional time window)
//! - `GET /export.csv` - Download all responses as a CSV attachment
//! - `GET /summary` - Per-group tally (Basic-auth gated when configured)
//! - `GET /health` - Health check
//!
//! ## Security Configuration
//!
//! Resolved once at startup into [`AppConfig`](crate::config::AppConfig):
//! - `[http] cors_origins` / `INTAKE_CORS_ORIGINS`: comma-separated allow
//!   list, or "*" for all (default: localhost only)
//! - `[http] rate_limit` / `INTAKE_RATE_LIMIT`: requests per second
//!   (default: 100, 0 to disable)
//! - `[admin]` / `INTAKE_ADMIN_USER` + `INTAKE_ADMIN_PASS`: enables Basic
//!   auth on `/summary`

mod auth;
mod handlers;
mod middleware;
mod types;

// Re-exports for external use
pub use middleware::create_rate_limiter;
// Re-export handlers and types for integration tests (via `intake::api::*`)
#[allow(unused_imports)]
pub use handlers::{
    export_handler, health_handler, list_handler, submit_handler, summary_handler,
};
#[allow(unused_imports)]
pub use types::{
    ByGroup, ErrorResponse, HealthResponse, ListQuery, SubmitResponse, SummaryResponse,
};

use crate::config::AppConfig;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use intake_core::{IntakeError, StorageBackend};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state containing the response store.
#[derive(Clone)]
pub struct AppState {
    /// The storage backend holding survey responses. Submissions take the
    /// write lock; listings, exports, and tallies take the read lock.
    pub store: Arc<RwLock<StorageBackend>>,
}

impl AppState {
    /// Create new app state around a storage backend.
    #[must_use]
    pub fn new(store: StorageBackend) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build CORS layer from resolved configuration.
///
/// `[http] cors_origins` (or `INTAKE_CORS_ORIGINS`):
/// - If "*": allows all origins (development mode - use with caution!)
/// - If not set: defaults to localhost only (restrictive default)
/// - Otherwise: parses comma-separated list of allowed origins
fn build_cors_layer(config: &AppConfig) -> CorsLayer {
    match config.http.cors_origins.as_deref() {
        Some("*") => {
            // Explicit wildcard - warn about security implications
            tracing::warn!(
                "CORS: Allowing ALL origins (cors_origins = \"*\"). This is insecure for production!"
            );
            CorsLayer::permissive()
        }
        Some(origins) => {
            // Parse comma-separated origins
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in cors_origins, defaulting to localhost only"
                );
                build_localhost_cors()
            } else {
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            }
        }
        None => {
            // No configuration - default to localhost only (restrictive)
            tracing::info!("CORS: no cors_origins configured, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let localhost_origins = vec![
        "http://localhost:3000".parse::<HeaderValue>().ok(),
        "http://localhost:8080".parse::<HeaderValue>().ok(),
        "http://127.0.0.1:3000".parse::<HeaderValue>().ok(),
        "http://127.0.0.1:8080".parse::<HeaderValue>().ok(),
    ];
    let origins: Vec<HeaderValue> = localhost_origins.into_iter().flatten().collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit - caps request size
/// 4. Rate Limiting - protects against floods (if enabled)
/// 5. Basic auth - guards the summary route only (if configured)
pub fn create_router(state: AppState, config: &AppConfig) -> Router {
    let cors = build_cors_layer(config);

    // Check if rate limiting is enabled
    let rate_limit = config.http.rate_limit;
    let rate_limiter = if rate_limit > 0 {
        tracing::info!("Rate limiting enabled: {} requests/second", rate_limit);
        Some(create_rate_limiter(rate_limit))
    } else {
        tracing::info!("Rate limiting disabled");
        None
    };

    // The summary route is the only gated surface. Without configured
    // credentials it stays open, loudly.
    let summary = match config.admin_credentials() {
        Some(credentials) => {
            tracing::info!(
                "Basic auth enabled for /summary (user: {})",
                credentials.username
            );
            Router::new()
                .route("/summary", get(handlers::summary_handler))
                .route_layer(axum_middleware::from_fn_with_state(
                    credentials,
                    auth::basic_auth_middleware,
                ))
        }
        None => {
            tracing::warn!(
                "⚠️  Admin credentials NOT configured - /summary is publicly accessible! \
                 Set [admin] in intake.toml or INTAKE_ADMIN_USER / INTAKE_ADMIN_PASS \
                 to enable Basic auth."
            );
            Router::new().route("/summary", get(handlers::summary_handler))
        }
    };

    // Build base router with routes
    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/submit", post(handlers::submit_handler))
        .route("/responses", get(handlers::list_handler))
        .route("/export.csv", get(handlers::export_handler))
        .merge(summary);

    // Apply rate limiting middleware
    if let Some(limiter) = rate_limiter {
        router = router.layer(axum_middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit_middleware,
        ));
    }

    // Apply CORS, body limit, and tracing (outermost layers)
    router
        .layer(axum::extract::DefaultBodyLimit::max(config.http.max_body_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server.
pub async fn run_server(
    addr: &str,
    store: StorageBackend,
    config: &AppConfig,
) -> Result<(), IntakeError> {
    let state = AppState::new(store);
    let router = create_router(state, config);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| IntakeError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("Intake HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| IntakeError::IoError(format!("Server error: {}", e)))
}
