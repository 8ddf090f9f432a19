//! Client configuration

use std::path::PathBuf;

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;
use crate::storage::{FileStore, StorageResult};

/// Client configuration for the auth service and local session storage
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Auth service base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Directory backing the durable key-value store
    pub storage_dir: PathBuf,

    /// Default log level when `RUST_LOG` is unset
    pub log_level: String,

    /// Optional directory for daily-rolling log files
    pub log_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            storage_dir: PathBuf::from(".grc"),
            log_level: "info".to_string(),
            log_dir: None,
        }
    }

    /// Build from `GRC_*` environment variables, falling back to defaults
    ///
    /// | Variable           | Default                  |
    /// |--------------------|--------------------------|
    /// | `GRC_API_URL`      | `http://localhost:8080`  |
    /// | `GRC_TIMEOUT_SECS` | `30`                     |
    /// | `GRC_STORAGE_DIR`  | `.grc`                   |
    /// | `GRC_LOG_LEVEL`    | `info`                   |
    /// | `GRC_LOG_DIR`      | unset (stdout only)      |
    pub fn from_env() -> Self {
        let mut config = Self::new(
            std::env::var("GRC_API_URL").unwrap_or_else(|_| "http://localhost:8080".to_string()),
        );

        if let Some(timeout) = std::env::var("GRC_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.timeout = timeout;
        }
        if let Ok(dir) = std::env::var("GRC_STORAGE_DIR") {
            config.storage_dir = PathBuf::from(dir);
        }
        if let Ok(level) = std::env::var("GRC_LOG_LEVEL") {
            config.log_level = level;
        }
        config.log_dir = std::env::var("GRC_LOG_DIR").ok().map(PathBuf::from);
        config
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the storage directory
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = dir.into();
        self
    }

    /// Set the log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<HttpClient> {
        self.validate()?;
        HttpClient::new(self)
    }

    /// Reject settings the HTTP client cannot work with
    pub fn validate(&self) -> ClientResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "base_url must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if self.timeout == 0 {
            return Err(ClientError::Config("timeout must be at least one second".into()));
        }
        Ok(())
    }

    /// Open the file-backed store under `storage_dir`
    pub fn open_store(&self) -> StorageResult<FileStore> {
        FileStore::open(&self.storage_dir)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::new("https://grc.example")
            .with_timeout(5)
            .with_storage_dir("/tmp/grc-test")
            .with_log_level("debug");
        assert_eq!(config.base_url, "https://grc.example");
        assert_eq!(config.timeout, 5);
        assert_eq!(config.storage_dir, PathBuf::from("/tmp/grc-test"));
        assert_eq!(config.log_level, "debug");
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_invalid_settings_are_config_errors() {
        let err = ClientConfig::new("auth.local").build_http_client().unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
        assert_eq!(err.code(), shared::ErrorCode::ConfigError);

        assert!(matches!(
            ClientConfig::new("http://auth.local").with_timeout(0).validate(),
            Err(ClientError::Config(_))
        ));
        assert!(ClientConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_points_at_localhost() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, 30);
    }
}
