//! # Application Configuration
//!
//! Configuration is resolved exactly once, at process start, and then handed
//! to whoever needs it: the router gets CORS origins, the rate limit, and the
//! admin credentials; the CLI gets the storage defaults. Nothing in the
//! request path reads the environment.
//!
//! ## Resolution order
//!
//! 1. Built-in defaults (localhost, CSV store, 100 req/s, no admin account).
//! 2. TOML file: the `--config` flag, else `intake.toml` if present.
//! 3. Environment overrides: `INTAKE_ADMIN_USER`, `INTAKE_ADMIN_PASS`,
//!    `INTAKE_RATE_LIMIT`, `INTAKE_CORS_ORIGINS`.
//! 4. CLI flags (`--data`, `--backend`, `--host`, `--port`) override the
//!    matching file values; that layering happens in the CLI module.
//!
//! ## Example
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [storage]
//! backend = "redb"
//! path = "responses.redb"
//!
//! [admin]
//! username = "researcher"
//! password = "not-this-one"
//!
//! [http]
//! rate_limit = 50
//! cors_origins = "https://study.example.org"
//! ```

use intake_core::IntakeError;
use intake_core::primitives::DEFAULT_CSV_PATH;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Config file consulted when `--config` is not given.
const DEFAULT_CONFIG_FILE: &str = "intake.toml";

// =============================================================================
// CONFIG STRUCTURE
// =============================================================================

/// Fully resolved application configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub admin: AdminConfig,
    pub http: HttpConfig,
}

/// HTTP server bind address.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Where responses are stored when no CLI flag says otherwise.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend name: "csv", "redb", or "memory".
    pub backend: String,
    pub path: PathBuf,
}

/// Credentials guarding the summary endpoint. Both halves must be set and
/// non-empty for the gate to arm.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Knobs for the HTTP middleware stack.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Requests per second; 0 disables rate limiting.
    pub rate_limit: u32,
    /// Comma-separated origin allow list, or "*" for all.
    /// Unset means localhost only.
    pub cors_origins: Option<String>,
    /// Request body cap in bytes.
    pub max_body_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            admin: AdminConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: "csv".to_string(),
            path: PathBuf::from(DEFAULT_CSV_PATH),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            rate_limit: 100,
            cors_origins: None,
            max_body_bytes: 2 * 1024 * 1024,
        }
    }
}

// =============================================================================
// ADMIN CREDENTIALS
// =============================================================================

/// Resolved admin credentials, injected into the auth middleware as router
/// state. The middleware never re-reads config or environment per-request.
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// LOADING
// =============================================================================

impl AppConfig {
    /// Load configuration from an optional TOML file, then apply environment
    /// overrides.
    ///
    /// An explicitly named file that cannot be read is an error; the implicit
    /// `intake.toml` fallback is skipped silently when absent.
    pub fn load(path: Option<&Path>) -> Result<Self, IntakeError> {
        let mut config = match path {
            Some(explicit) => Self::from_file(explicit)?,
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    Self::from_file(fallback)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, IntakeError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            IntakeError::IoError(format!("Read config '{}': {}", path.display(), e))
        })?;
        toml::from_str(&text).map_err(|e| {
            IntakeError::SerializationError(format!("Parse config '{}': {}", path.display(), e))
        })
    }

    /// Apply `INTAKE_*` environment overrides on top of file values.
    fn apply_env_overrides(&mut self) {
        if let Some(user) = non_empty_env("INTAKE_ADMIN_USER") {
            self.admin.username = Some(user);
        }
        if let Some(pass) = non_empty_env("INTAKE_ADMIN_PASS") {
            self.admin.password = Some(pass);
        }
        if let Some(limit) = non_empty_env("INTAKE_RATE_LIMIT").and_then(|s| s.parse().ok()) {
            self.http.rate_limit = limit;
        }
        if let Some(origins) = non_empty_env("INTAKE_CORS_ORIGINS") {
            self.http.cors_origins = Some(origins);
        }
    }

    /// Admin credentials, if both halves are configured and non-empty.
    #[must_use]
    pub fn admin_credentials(&self) -> Option<AdminCredentials> {
        match (&self.admin.username, &self.admin.password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some(AdminCredentials {
                    username: username.clone(),
                    password: password.clone(),
                })
            }
            _ => None,
        }
    }
}

/// Read an environment variable, treating empty values as unset.
fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_local_and_open() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.backend, "csv");
        assert_eq!(config.storage.path, PathBuf::from("survey_responses.csv"));
        assert_eq!(config.http.rate_limit, 100);
        assert!(config.http.cors_origins.is_none());
        assert!(config.admin_credentials().is_none());
    }

    #[test]
    fn full_file_parses() {
        let text = r#"
            [server]
            host = "0.0.0.0"
            port = 9090

            [storage]
            backend = "redb"
            path = "responses.redb"

            [admin]
            username = "researcher"
            password = "hunter2"

            [http]
            rate_limit = 25
            cors_origins = "*"
            max_body_bytes = 4096
        "#;
        let config: AppConfig = toml::from_str(text).expect("parse");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.storage.backend, "redb");
        assert_eq!(config.http.rate_limit, 25);
        assert_eq!(config.http.cors_origins.as_deref(), Some("*"));
        assert_eq!(config.http.max_body_bytes, 4096);

        let credentials = config.admin_credentials().expect("credentials");
        assert_eq!(credentials.username, "researcher");
        assert_eq!(credentials.password, "hunter2");
    }

    #[test]
    fn partial_file_keeps_defaults_elsewhere() {
        let text = r#"
            [server]
            port = 3000
        "#;
        let config: AppConfig = toml::from_str(text).expect("parse");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.storage.backend, "csv");
        assert_eq!(config.http.rate_limit, 100);
    }

    #[test]
    fn half_configured_admin_is_no_admin() {
        let text = r#"
            [admin]
            username = "researcher"
        "#;
        let config: AppConfig = toml::from_str(text).expect("parse");
        assert!(config.admin_credentials().is_none());
    }

    #[test]
    fn empty_admin_values_are_no_admin() {
        let text = r#"
            [admin]
            username = ""
            password = ""
        "#;
        let config: AppConfig = toml::from_str(text).expect("parse");
        assert!(config.admin_credentials().is_none());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope.toml");
        let result = AppConfig::from_file(&missing);
        assert!(matches!(result, Err(IntakeError::IoError(_))));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "server = \"not a table\"").expect("write");
        let result = AppConfig::from_file(&path);
        assert!(matches!(result, Err(IntakeError::SerializationError(_))));
    }

    #[test]
    fn debug_redacts_password() {
        let credentials = AdminCredentials {
            username: "researcher".to_string(),
            password: "hunter2".to_string(),
        };
        let rendered = format!("{:?}", credentials);
        assert!(rendered.contains("researcher"));
        assert!(!rendered.contains("hunter2"));
    }
}
