//! Output region
//!
//! The single display slot a controller owns. Every update replaces the whole
//! contents under one lock, so readers never observe a half-written region.

use crate::render::RenderState;
use parking_lot::Mutex;

#[derive(Debug, Default)]
struct RegionInner {
    html: String,
    state: RenderState,
}

/// Whole-region replaceable display slot
#[derive(Debug, Default)]
pub struct OutputRegion {
    inner: Mutex<RegionInner>,
}

impl OutputRegion {
    /// Create an empty, idle region
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a region showing prior contents
    #[must_use]
    pub fn with_contents(html: impl Into<String>) -> Self {
        Self {
            inner: Mutex::new(RegionInner {
                html: html.into(),
                state: RenderState::Idle,
            }),
        }
    }

    /// Replace the entire region
    pub fn replace(&self, state: RenderState, html: String) {
        let mut inner = self.inner.lock();
        inner.state = state;
        inner.html = html;
    }

    /// Current HTML
    #[must_use]
    pub fn html(&self) -> String {
        self.inner.lock().html.clone()
    }

    /// State that produced the current HTML
    #[must_use]
    pub fn state(&self) -> RenderState {
        self.inner.lock().state.clone()
    }

    /// Visible text of the current HTML (tags stripped, basic entities decoded)
    #[must_use]
    pub fn text(&self) -> String {
        visible_text(&self.inner.lock().html)
    }
}

fn visible_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}
