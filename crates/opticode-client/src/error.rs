//! Error types for the OptiCode client
//!
//! Provides error handling for:
//! - Form validation (empty code)
//! - Operational failures of a submission (transport, status, decode, render)
//! - Configuration loading

use std::path::PathBuf;

/// Form validation failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Code input is empty or whitespace only
    #[error("code input is empty")]
    EmptyCode,
}

/// Markdown or region rendering failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// Markdown collaborator rejected the input
    #[error("markdown rendering failed: {0}")]
    Markdown(String),
}

/// Operational failure of a single submission
///
/// Every variant collapses to the same user-facing message; the variant is
/// only used for logging.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// Network transport failed before a response arrived
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("endpoint returned status {0}")]
    Status(u16),

    /// Response body was not the expected JSON shape
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Rendering the response failed
    #[error("render error: {0}")]
    Render(#[from] RenderError),
}

impl AnalysisError {
    /// Short classification used as a log field
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Status(_) => "status",
            Self::Decode(_) => "decode",
            Self::Render(_) => "render",
        }
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for `ClientConfig`
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Endpoint is not an http(s) URL
    #[error("invalid endpoint '{0}': expected an http:// or https:// URL")]
    InvalidEndpoint(String),
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_error_kinds() {
        assert_eq!(AnalysisError::Status(500).kind(), "status");
        assert_eq!(
            AnalysisError::Render(RenderError::Markdown("boom".into())).kind(),
            "render"
        );

        let decode = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(AnalysisError::from(decode).kind(), "decode");
    }

    #[test]
    fn status_error_display() {
        let err = AnalysisError::Status(503);
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::InvalidEndpoint("ftp://x".to_string());
        assert!(err.to_string().contains("ftp://x"));

        let io = ConfigError::io_error(
            "missing.toml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(io.to_string().contains("missing.toml"));
    }
}
