//! Raw post bytes plus file metadata to a storable article.

use crate::article::{Article, FileMetadata};
use crate::content::ContentPipeline;
use crate::metadata::{PUBLISHED_SEGMENT, extract_entry_data, parse_timestamp, sanitize_metadata};

/// Builds articles from the contents of synced files.
pub struct EntryParser {
    pipeline: ContentPipeline,
    published_dir: String,
}

impl EntryParser {
    pub fn new() -> Self {
        Self { pipeline: ContentPipeline::new(), published_dir: PUBLISHED_SEGMENT.to_string() }
    }

    /// Folder stripped from paths when deriving default permalinks.
    /// `blog` and `/blog` both become `/blog/`.
    pub fn with_published_dir(mut self, dir: &str) -> Self {
        let dir = dir.trim_matches('/');
        self.published_dir = if dir.is_empty() { "/".to_string() } else { format!("/{dir}/") };
        self
    }

    pub fn published_dir(&self) -> &str {
        &self.published_dir
    }

    /// Build an article from one file.
    ///
    /// Never fails: a malformed header or date leaves the affected fields to
    /// their defaults. The returned article has no ID yet; assign one with
    /// [`Article::generate_id`] before saving.
    pub fn parse(&self, file: FileMetadata, raw: &[u8]) -> Article {
        let mut article = extract_entry_data(raw);

        let rendered = self.pipeline.process(raw);
        article.content = rendered.html;
        if article.summary.is_empty() {
            article.summary = rendered.summary;
        }

        article.file = file;
        sanitize_metadata(&mut article, &self.published_dir);
        parse_timestamp(&mut article);
        article
    }

    /// [`EntryParser::parse`] followed by [`Article::generate_id`] for `owner`.
    pub fn parse_owned(&self, owner: &str, file: FileMetadata, raw: &[u8]) -> Article {
        let mut article = self.parse(file, raw);
        article.generate_id(owner);
        article
    }
}

impl Default for EntryParser {
    fn default() -> Self {
        Self::new()
    }
}
