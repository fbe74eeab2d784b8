//! Configuration module for Quill.

use serde::Deserialize;
use std::path::Path;

use crate::{QuillError, Result};

/// Web server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Protected route patterns, in match order.
    ///
    /// A trailing `/*` marks a prefix pattern that covers the base path and
    /// every sub-path; anything else is an exact match.
    #[serde(default = "default_protected_routes")]
    pub protected_routes: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_protected_routes() -> Vec<String> {
    vec![
        "/profile/*".to_string(),
        "/post/create".to_string(),
        "/post/edit/*".to_string(),
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
            protected_routes: default_protected_routes(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file (or connection URL for Postgres).
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/quill.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Session lifetime in days.
    #[serde(default = "default_session_expiry_days")]
    pub session_expiry_days: u64,
    /// Lifetime of the in-process session validity cache, in seconds.
    #[serde(default = "default_session_cache_secs")]
    pub session_cache_secs: u64,
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

fn default_session_expiry_days() -> u64 {
    crate::auth::DEFAULT_SESSION_EXPIRY_DAYS
}

fn default_session_cache_secs() -> u64 {
    crate::auth::DEFAULT_SESSION_CACHE_SECS
}

fn default_cookie_name() -> String {
    "quill_session".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_expiry_days: default_session_expiry_days(),
            session_cache_secs: default_session_cache_secs(),
            cookie_name: default_cookie_name(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/quill.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Web server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(QuillError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| QuillError::Validation(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `QUILL_DATABASE_PATH`: Override the database path
    pub fn apply_env_overrides(&mut self) {
        if let Ok(db_path) = std::env::var("QUILL_DATABASE_PATH") {
            if !db_path.is_empty() {
                self.database.path = db_path;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - The session lifetime is zero
    /// - A protected route pattern does not start with `/`
    pub fn validate(&self) -> Result<()> {
        if self.auth.session_expiry_days == 0 {
            return Err(QuillError::Validation(
                "auth.session_expiry_days must be at least 1".to_string(),
            ));
        }
        for pattern in &self.server.protected_routes {
            if !pattern.starts_with('/') {
                return Err(QuillError::Validation(format!(
                    "protected route pattern must start with '/': {pattern}"
                )));
            }
        }
        Ok(())
    }
}
