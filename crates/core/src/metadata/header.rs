//! Optional metadata header embedded in a post.
//!
//! The header is a JSON object inside the first HTML comment of the
//! document:
//!
//! ```markdown
//! <!--
//! {"title": "Hello", "permalink": "hello", "created-at": "2021-03-04"}
//! -->
//! Post body...
//! ```
//!
//! Every field is optional and unknown fields are ignored. A missing or
//! malformed header leaves the article fields empty for the defaulting step.

use serde::Deserialize;
use thiserror::Error;

use crate::article::Article;
use crate::content::render::find;

pub const HEADER_OPEN: &[u8] = b"<!--";
pub const HEADER_CLOSE: &[u8] = b"-->";

#[derive(Debug, Error)]
pub enum HeaderError {
    #[error("invalid metadata header: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Fields a post may override through its header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ArticleHeader {
    pub title: Option<String>,
    pub permalink: Option<String>,
    #[serde(rename = "created-at")]
    pub created_at: Option<String>,
    pub summary: Option<String>,
}

impl ArticleHeader {
    /// Copy the fields that are set onto `article`.
    pub fn apply_to(self, article: &mut Article) {
        if let Some(title) = self.title {
            article.title = title;
        }
        if let Some(permalink) = self.permalink {
            article.permalink = permalink;
        }
        if let Some(created_at) = self.created_at {
            article.created_at = created_at;
        }
        if let Some(summary) = self.summary {
            article.summary = summary;
        }
    }
}

/// Bytes between the first `<!--` and the `-->` that follows it.
pub fn find_header(raw: &[u8]) -> Option<&[u8]> {
    let start = find(raw, HEADER_OPEN)? + HEADER_OPEN.len();
    let len = find(&raw[start..], HEADER_CLOSE)?;
    Some(&raw[start..start + len])
}

/// Parse the header of `raw`.
///
/// `Ok(None)` when there is no comment, or the first comment is not a JSON
/// object (an ordinary comment rather than a header).
pub fn parse_header(raw: &[u8]) -> Result<Option<ArticleHeader>, HeaderError> {
    let Some(block) = find_header(raw) else {
        return Ok(None);
    };
    if !block.trim_ascii_start().starts_with(b"{") {
        return Ok(None);
    }
    Ok(Some(serde_json::from_slice(block)?))
}

/// New article populated from the header of `raw`.
///
/// A malformed header is logged and ignored.
pub fn extract_entry_data(raw: &[u8]) -> Article {
    let mut article = Article::default();
    match parse_header(raw) {
        Ok(Some(header)) => header.apply_to(&mut article),
        Ok(None) => tracing::debug!("No metadata header found"),
        Err(e) => tracing::warn!("Ignoring metadata header: {}", e),
    }
    article
}
