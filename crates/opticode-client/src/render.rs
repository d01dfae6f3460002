//! Render state and the pure region renderer
//!
//! The controller computes a [`RenderState`]; [`render`] turns it into the
//! complete HTML of the output region. Nothing here touches the region itself.

use crate::error::RenderError;
use crate::markdown::MarkdownRenderer;
use crate::types::{banner_text, Verdict};

/// Shown for every operational failure
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Error: could not complete the analysis. Make sure the backend server is running.";

/// Shown (blocking) when the code input is empty
pub const EMPTY_CODE_WARNING: &str = "Please paste some code to analyze.";

/// What the output region currently shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RenderState {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// Request in flight
    Loading {
        /// Model identifier as selected
        model: String,
    },
    /// Response received and parsed
    Success {
        /// Raw score tag
        score: String,
        /// Markdown commentary
        analysis: String,
    },
    /// Any operational failure
    Error,
}

impl RenderState {
    /// Loading state for a model
    #[inline]
    #[must_use]
    pub fn loading(model: impl Into<String>) -> Self {
        Self::Loading {
            model: model.into(),
        }
    }

    /// Check if this is a terminal state of a submission
    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success { .. } | Self::Error)
    }
}

/// Render a state into the full region HTML
///
/// # Errors
/// - `RenderError` if the markdown collaborator fails (success state only)
pub fn render(state: &RenderState, markdown: &dyn MarkdownRenderer) -> Result<String, RenderError> {
    match state {
        RenderState::Idle => Ok(String::new()),
        RenderState::Loading { model } => Ok(render_loading(model)),
        RenderState::Success { score, analysis } => {
            let body = markdown.render(analysis)?;
            Ok(render_success(score, &body))
        }
        RenderState::Error => Ok(render_error()),
    }
}

/// Loading panel; text carries the uppercased model
#[must_use]
pub fn render_loading(model: &str) -> String {
    format!(
        "<div class=\"loading animate-pulse text-slate-400\">Analyzing with {}...</div>",
        escape_html(&model.to_uppercase())
    )
}

/// Fixed failure panel
#[must_use]
pub fn render_error() -> String {
    format!(
        "<div class=\"error text-red-400\">{}</div>",
        escape_html(GENERIC_FAILURE_MESSAGE)
    )
}

fn render_success(score: &str, analysis_html: &str) -> String {
    let style = Verdict::from_score(score).style();
    format!(
        concat!(
            "<div class=\"report\">",
            "<div class=\"verdict border rounded p-2 font-bold {}\">{}</div>",
            "<div class=\"analysis prose\">{}</div>",
            "</div>"
        ),
        style.classes(),
        escape_html(&banner_text(score)),
        analysis_html
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
