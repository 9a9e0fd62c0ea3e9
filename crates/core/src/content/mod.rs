//! Content pipeline: raw post bytes to sanitized HTML and a summary.
//!
//! Steps, in order:
//! 1. rewrite `../images` to `/images`
//! 2. render markdown to HTML
//! 3. sanitize the HTML against an allow-list
//! 4. take the text of the first paragraph as summary

pub mod render;
pub mod sanitize;
pub mod summary;

pub use render::{default_options, fix_image_paths, render_markdown};
pub use sanitize::{LINK_REL, sanitize_html, ugc_policy};
pub use summary::extract_summary;

/// Output of [`ContentPipeline::process`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedContent {
    /// Sanitized HTML.
    pub html: String,
    /// Plain text of the first paragraph.
    pub summary: String,
}

/// Renderer and sanitizer configuration, built once and reused for every post.
pub struct ContentPipeline {
    options: comrak::Options<'static>,
    policy: ammonia::Builder<'static>,
}

impl ContentPipeline {
    pub fn new() -> Self {
        Self { options: default_options(), policy: ugc_policy() }
    }

    /// Run every step over `raw`. The whole document is rendered, including any
    /// metadata header it carries.
    pub fn process(&self, raw: &[u8]) -> RenderedContent {
        let fixed = fix_image_paths(raw);
        let markdown = String::from_utf8_lossy(&fixed);
        let unsafe_html = render_markdown(&markdown, &self.options);
        let html = sanitize_html(&self.policy, &unsafe_html);
        let summary = extract_summary(&html);
        RenderedContent { html, summary }
    }
}

impl Default for ContentPipeline {
    fn default() -> Self {
        Self::new()
    }
}
