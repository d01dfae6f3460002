//! Markdown collaborator
//!
//! Uses pulldown-cmark to turn the backend's markdown commentary into HTML.

use crate::error::RenderError;
use pulldown_cmark::{html, Options, Parser as MdParser};

/// Converts markdown source into rich (HTML) content
#[cfg_attr(test, mockall::automock)]
pub trait MarkdownRenderer: Send + Sync {
    /// Render markdown to an HTML fragment
    ///
    /// # Errors
    /// - `RenderError::Markdown` if the source cannot be rendered
    fn render(&self, markdown: &str) -> Result<String, RenderError>;
}

/// CommonMark renderer with the GitHub-style extensions LLM output relies on
#[derive(Debug, Clone, Copy)]
pub struct CommonMarkRenderer {
    options: Options,
}

impl CommonMarkRenderer {
    /// Create renderer with tables, strikethrough and task lists enabled
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS,
        }
    }

    /// Plain CommonMark, no extensions
    #[inline]
    #[must_use]
    pub fn strict() -> Self {
        Self {
            options: Options::empty(),
        }
    }
}

impl Default for CommonMarkRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer for CommonMarkRenderer {
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        let parser = MdParser::new_ext(markdown, self.options);
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn heading() {
        let html = CommonMarkRenderer::new().render("# OK").unwrap();
        assert_eq!(html, "<h1>OK</h1>\n");
    }

    #[test]
    fn emphasis() {
        let html = CommonMarkRenderer::new().render("*risky*").unwrap();
        assert_eq!(html, "<p><em>risky</em></p>\n");
    }

    #[test]
    fn fenced_code_keeps_language() {
        let html = CommonMarkRenderer::new()
            .render("```python\nprint('hi')\n```\n")
            .unwrap();
        assert!(html.contains("language-python"));
        assert!(html.contains("print(&#x27;hi&#x27;)") || html.contains("print('hi')"));
    }

    #[test]
    fn tables_only_with_extensions() {
        let source = "| a | b |\n|---|---|\n| 1 | 2 |\n";
        assert!(CommonMarkRenderer::new().render(source).unwrap().contains("<table>"));
        assert!(!CommonMarkRenderer::strict().render(source).unwrap().contains("<table>"));
    }

    #[test]
    fn empty_source() {
        assert_eq!(CommonMarkRenderer::new().render("").unwrap(), "");
    }
}
