//! Core types for the OptiCode client
//!
//! Defines:
//! - The form input record built by the host
//! - The wire request and response of the analysis endpoint
//! - The security verdict and its style pairing

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Model identifiers the analysis backend routes on
pub const KNOWN_MODELS: &[&str] = &["gemini", "groq"];

/// Model used when the host does not pick one
pub const DEFAULT_MODEL: &str = "gemini";

/// The only score tag treated as secure
pub const SECURE_TAG: &str = "secure";

/// Unique submission identifier, used to correlate log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmissionId(pub Ulid);

impl SubmissionId {
    /// Generate new submission ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Current form state, captured by the host at submit time
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormInput {
    /// Pasted source code
    pub code: String,
    /// Selected model identifier
    pub model: String,
}

impl FormInput {
    /// Create form input
    #[inline]
    #[must_use]
    pub fn new(code: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            model: model.into(),
        }
    }

    /// Turn the form into a request
    ///
    /// # Errors
    /// - `ValidationError::EmptyCode` if the trimmed code is empty
    pub fn into_request(self) -> Result<AnalysisRequest, ValidationError> {
        if self.code.trim().is_empty() {
            return Err(ValidationError::EmptyCode);
        }
        Ok(AnalysisRequest {
            code: self.code,
            model: self.model,
        })
    }
}

/// Body of `POST /analyze`
///
/// Only constructible from a validated [`FormInput`]; `code` is sent untrimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    code: String,
    model: String,
}

impl AnalysisRequest {
    /// Submitted code
    #[inline]
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Selected model identifier
    #[inline]
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Body returned by the analysis endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnalysisResponse {
    /// Security tag (`secure`, `insecure`, `unknown`, `error`, ...)
    pub security_score: String,
    /// Markdown commentary
    pub analysis: String,
}

impl AnalysisResponse {
    /// Verdict derived from the score tag
    #[inline]
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        Verdict::from_score(&self.security_score)
    }
}

/// Secure / not-secure classification of a score tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Score is exactly `secure`
    Secure,
    /// Any other score, including case variants and the empty string
    NotSecure,
}

impl Verdict {
    /// Classify a raw score tag (case-sensitive exact match)
    #[inline]
    #[must_use]
    pub fn from_score(score: &str) -> Self {
        if score == SECURE_TAG {
            Self::Secure
        } else {
            Self::NotSecure
        }
    }

    /// Check if secure
    #[inline]
    #[must_use]
    pub fn is_secure(self) -> bool {
        matches!(self, Self::Secure)
    }

    /// Style pairing for the banner
    #[inline]
    #[must_use]
    pub fn style(self) -> StylePairing {
        match self {
            Self::Secure => StylePairing::SECURE,
            Self::NotSecure => StylePairing::NOT_SECURE,
        }
    }
}

/// Color pairing applied to the verdict banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StylePairing {
    /// Text color class
    pub text: &'static str,
    /// Background and border classes
    pub surface: &'static str,
}

impl StylePairing {
    /// Emerald-toned pairing
    pub const SECURE: Self = Self {
        text: "text-emerald-400",
        surface: "bg-emerald-900/30 border-emerald-500",
    };

    /// Red-toned pairing
    pub const NOT_SECURE: Self = Self {
        text: "text-red-400",
        surface: "bg-red-900/30 border-red-500",
    };

    /// Space-joined class list
    #[must_use]
    pub fn classes(&self) -> String {
        format!("{} {}", self.surface, self.text)
    }
}

/// Banner text for a raw score: the score uppercased
#[inline]
#[must_use]
pub fn banner_text(score: &str) -> String {
    score.to_uppercase()
}
