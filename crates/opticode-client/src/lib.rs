//! OptiCode Client
//!
//! Submits pasted code to the OptiCode analysis backend and renders the
//! returned security verdict and markdown report into an output region.
//!
//! # Architecture
//!
//! ```text
//! FormInput → AnalysisController ─ validate ─→ Notifier (blocking warning)
//!                    │
//!                    ├─ RenderState::Loading ─→ render() ─→ OutputRegion
//!                    │
//!                    └─ AnalysisTransport (POST /analyze)
//!                              │
//!                     RenderState::{Success, Error} ─→ render() ─→ OutputRegion
//!                                                        ↑
//!                                               MarkdownRenderer
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use opticode_client::prelude::*;
//!
//! # async fn example(notifier: impl Notifier) -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::new().with_endpoint("http://127.0.0.1:3000");
//! let controller = AnalysisController::from_config(&config, notifier)?;
//!
//! let outcome = controller.submit(FormInput::new("eval(x)", "gemini")).await;
//! println!("{:?}: {}", outcome, controller.region().html());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod controller;
pub mod error;
pub mod markdown;
pub mod notify;
pub mod region;
pub mod render;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use config::{ClientConfig, ANALYZE_PATH, DEFAULT_ENDPOINT};
pub use controller::{AnalysisController, SubmitOutcome};
pub use error::{AnalysisError, ConfigError, RenderError, ValidationError};
pub use markdown::{CommonMarkRenderer, MarkdownRenderer};
pub use notify::Notifier;
pub use region::OutputRegion;
pub use render::{render, RenderState, EMPTY_CODE_WARNING, GENERIC_FAILURE_MESSAGE};
pub use transport::{AnalysisTransport, HttpTransport};
pub use types::{
    AnalysisRequest, AnalysisResponse, FormInput, StylePairing, SubmissionId, Verdict,
    DEFAULT_MODEL, KNOWN_MODELS,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving the controller
    pub use crate::{
        AnalysisController, ClientConfig, FormInput, Notifier, OutputRegion, RenderState,
        SubmitOutcome, Verdict,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
