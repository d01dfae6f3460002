//! Analysis submission controller
//!
//! Drives one submission through its states:
//!
//! ```text
//! Idle → Validating → Aborted
//!                   → Loading → Success
//!                             → Error
//! ```
//!
//! Validation failures go to the [`Notifier`] and leave the region untouched.
//! Every operational failure is caught here, logged with its kind, and shown
//! as the same generic error panel. Overlapping submissions are not
//! coordinated: whichever finishes last owns the region.

use crate::config::ClientConfig;
use crate::error::{AnalysisError, ValidationError};
use crate::markdown::{CommonMarkRenderer, MarkdownRenderer};
use crate::notify::Notifier;
use crate::region::OutputRegion;
use crate::render::{render, render_error, RenderState, EMPTY_CODE_WARNING};
use crate::transport::{AnalysisTransport, HttpTransport};
use crate::types::{AnalysisRequest, FormInput, SubmissionId, Verdict};
use std::sync::Arc;
use tracing::Instrument;

/// Terminal state of one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Code was empty; nothing sent, region unchanged
    Aborted,
    /// Response rendered with this verdict
    Rendered(Verdict),
    /// Generic error panel rendered
    Failed,
}

impl SubmitOutcome {
    /// Check if a response was rendered
    #[inline]
    #[must_use]
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }
}

/// Per-view controller owning the output region
#[derive(Debug)]
pub struct AnalysisController<T, M, N> {
    transport: T,
    markdown: M,
    notifier: N,
    region: Arc<OutputRegion>,
}

impl<N: Notifier> AnalysisController<HttpTransport, CommonMarkRenderer, N> {
    /// Controller talking HTTP to the configured endpoint
    ///
    /// # Errors
    /// - `AnalysisError::Transport` if the HTTP client cannot be built
    pub fn from_config(config: &ClientConfig, notifier: N) -> Result<Self, AnalysisError> {
        Ok(Self::new(
            HttpTransport::new(config)?,
            CommonMarkRenderer::new(),
            notifier,
        ))
    }
}

impl<T, M, N> AnalysisController<T, M, N>
where
    T: AnalysisTransport,
    M: MarkdownRenderer,
    N: Notifier,
{
    /// Create controller with a fresh region
    #[inline]
    #[must_use]
    pub fn new(transport: T, markdown: M, notifier: N) -> Self {
        Self {
            transport,
            markdown,
            notifier,
            region: Arc::new(OutputRegion::new()),
        }
    }

    /// Use an existing region (e.g. one the host also reads)
    #[inline]
    #[must_use]
    pub fn with_region(mut self, region: Arc<OutputRegion>) -> Self {
        self.region = region;
        self
    }

    /// The region this controller writes
    #[inline]
    #[must_use]
    pub fn region(&self) -> &Arc<OutputRegion> {
        &self.region
    }

    /// Submit the current form state
    ///
    /// Never fails; the outcome reports which terminal state was reached.
    pub async fn submit(&self, input: FormInput) -> SubmitOutcome {
        let id = SubmissionId::new();
        let span = tracing::info_span!("submit", submission = %id, model = %input.model);
        self.run(input).instrument(span).await
    }

    async fn run(&self, input: FormInput) -> SubmitOutcome {
        let request = match input.into_request() {
            Ok(request) => request,
            Err(ValidationError::EmptyCode) => {
                tracing::info!("empty code, submission aborted");
                self.notifier.notify_blocking(EMPTY_CODE_WARNING);
                return SubmitOutcome::Aborted;
            }
        };

        self.show_loading(&request);

        match self.fetch_and_render(&request).await {
            Ok(verdict) => {
                tracing::info!(secure = verdict.is_secure(), "analysis rendered");
                SubmitOutcome::Rendered(verdict)
            }
            Err(e) => {
                tracing::warn!(kind = e.kind(), error = %e, "analysis failed");
                self.region.replace(RenderState::Error, render_error());
                SubmitOutcome::Failed
            }
        }
    }

    fn show_loading(&self, request: &AnalysisRequest) {
        let state = RenderState::loading(request.model());
        // Loading never reaches the markdown collaborator.
        let html = render(&state, &self.markdown).unwrap_or_default();
        self.region.replace(state, html);
    }

    async fn fetch_and_render(&self, request: &AnalysisRequest) -> Result<Verdict, AnalysisError> {
        let response = self.transport.analyze(request).await?;
        let verdict = response.verdict();

        let state = RenderState::Success {
            score: response.security_score,
            analysis: response.analysis,
        };
        let html = render(&state, &self.markdown)?;
        self.region.replace(state, html);
        Ok(verdict)
    }
}
