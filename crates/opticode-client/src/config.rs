//! Client configuration
//!
//! Loaded from TOML, overridable through builder methods.

use crate::error::ConfigError;
use crate::types::DEFAULT_MODEL;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Fixed path of the analysis endpoint
pub const ANALYZE_PATH: &str = "/analyze";

/// Backend base URL used when none is configured
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000";

/// OptiCode client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend base URL
    pub endpoint: String,
    /// Model used when the host has no selection
    pub default_model: String,
    /// Request timeout in seconds (`None` waits indefinitely)
    pub request_timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With backend base URL
    #[inline]
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// With default model
    #[inline]
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// With request timeout
    #[inline]
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    /// Parse from TOML text
    ///
    /// # Errors
    /// - `ConfigError::Parse` on malformed TOML
    /// - `ConfigError::InvalidEndpoint` if the endpoint is not http(s)
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// - `ConfigError::Io` if the file cannot be read
    /// - any error from [`ClientConfig::from_toml_str`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Check the endpoint scheme
    ///
    /// # Errors
    /// - `ConfigError::InvalidEndpoint` if the endpoint is not http(s)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://") {
            Ok(())
        } else {
            Err(ConfigError::InvalidEndpoint(self.endpoint.clone()))
        }
    }

    /// Full URL of the analysis endpoint
    #[must_use]
    pub fn analyze_url(&self) -> String {
        format!("{}{}", self.endpoint.trim_end_matches('/'), ANALYZE_PATH)
    }

    /// Request timeout, if any
    #[inline]
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            request_timeout_secs: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = ClientConfig::new();
        assert_eq!(config.analyze_url(), "http://127.0.0.1:3000/analyze");
        assert_eq!(config.default_model, "gemini");
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn analyze_url_tolerates_trailing_slash() {
        let config = ClientConfig::new().with_endpoint("http://backend:8080/");
        assert_eq!(config.analyze_url(), "http://backend:8080/analyze");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = ClientConfig::from_toml_str("default_model = \"groq\"\n").unwrap();
        assert_eq!(config.default_model, "groq");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn full_toml() {
        let config = ClientConfig::from_toml_str(
            r#"
endpoint = "https://opticode.example"
default_model = "groq"
request_timeout_secs = 30
"#,
        )
        .unwrap();
        assert_eq!(config.analyze_url(), "https://opticode.example/analyze");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let result = ClientConfig::from_toml_str("endpoint = \"ftp://nope\"\n");
        assert!(matches!(result, Err(ConfigError::InvalidEndpoint(_))));
    }

    #[test]
    fn rejects_malformed_toml() {
        let result = ClientConfig::from_toml_str("endpoint = ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "endpoint = \"http://10.0.0.2:3000\"").unwrap();

        let config = ClientConfig::load(file.path()).unwrap();
        assert_eq!(config.endpoint, "http://10.0.0.2:3000");
    }

    #[test]
    fn load_missing_file() {
        let result = ClientConfig::load("/definitely/not/here.toml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
