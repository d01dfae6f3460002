//! Analysis endpoint transport
//!
//! The controller talks to the backend through [`AnalysisTransport`];
//! [`HttpTransport`] is the reqwest implementation of `POST /analyze`.

use crate::config::ClientConfig;
use crate::error::AnalysisError;
use crate::types::{AnalysisRequest, AnalysisResponse};
use async_trait::async_trait;
use reqwest::Client;

/// One request/response round trip to the analysis endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    /// Submit code for analysis
    ///
    /// # Errors
    /// - `AnalysisError::Transport` on network failure
    /// - `AnalysisError::Status` on a non-success status
    /// - `AnalysisError::Decode` if the body is not an `AnalysisResponse`
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, AnalysisError>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    /// Create transport from configuration
    ///
    /// # Errors
    /// - `AnalysisError::Transport` if the HTTP client cannot be built
    pub fn new(config: &ClientConfig) -> Result<Self, AnalysisError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            url: config.analyze_url(),
        })
    }

    /// Full endpoint URL
    #[inline]
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl AnalysisTransport for HttpTransport {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, AnalysisError> {
        tracing::debug!(
            url = %self.url,
            model = request.model(),
            bytes = request.code().len(),
            "posting analysis request"
        );

        let response = self.client.post(&self.url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_from_config() {
        let config = ClientConfig::new().with_endpoint("http://localhost:9999/");
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.url(), "http://localhost:9999/analyze");
    }

    #[test]
    fn with_timeout_builds() {
        let config = ClientConfig::new().with_timeout_secs(5);
        assert!(HttpTransport::new(&config).is_ok());
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_transport_error() {
        // Port 9 (discard) on loopback is closed in test environments.
        let config = ClientConfig::new()
            .with_endpoint("http://127.0.0.1:9")
            .with_timeout_secs(5);
        let transport = HttpTransport::new(&config).unwrap();
        let request = crate::types::FormInput::new("x", "gemini")
            .into_request()
            .unwrap();

        let result = transport.analyze(&request).await;
        assert!(matches!(result, Err(AnalysisError::Transport(_))));
    }
}
