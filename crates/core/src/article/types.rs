//! Article and file metadata types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// File metadata supplied by the file-sync collaborator.
///
/// The core only reads `path` and `modified`; the remaining fields are
/// carried through to storage untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMetadata {
    /// Path inside the synced folder, e.g. `/published/hello_world.md`.
    pub path: String,
    /// Last modification time reported by the source.
    pub modified: DateTime<Utc>,
    /// Revision identifier of this version of the file.
    pub rev: String,
    /// Human-readable size, e.g. `"2.1 KB"`.
    pub size: String,
    pub bytes: u64,
    pub is_dir: bool,
    pub mime_type: String,
    pub is_deleted: bool,
}

/// A blog post owned by one user.
///
/// Serialized as JSON under its `id`. Field names on the wire keep the layout
/// existing stores were written with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Article {
    /// Storage key, `<owner>:article:<path>`. See [`generate_id`].
    #[serde(rename = "ID")]
    pub id: String,
    /// Sanitized HTML body. Empty in index entries.
    #[serde(rename = "Content")]
    pub content: String,
    pub title: String,
    /// Creation date as `YYYY-MM-DD`.
    #[serde(rename = "created-at")]
    pub created_at: String,
    /// Decimal Unix epoch derived from `created_at`, or empty.
    pub timestamp: String,
    pub permalink: String,
    /// Plain text of the first paragraph.
    pub summary: String,
    #[serde(flatten)]
    pub file: FileMetadata,
}

impl Article {
    /// Derive and assign the storage key from the owner and the file path.
    pub fn generate_id(&mut self, owner: &str) {
        self.id = generate_id(owner, &self.file.path);
    }

    pub fn path(&self) -> &str {
        &self.file.path
    }

    /// Copy of this article without its body, as stored in the index.
    pub fn without_content(&self) -> Self {
        Self { content: String::new(), ..self.clone() }
    }
}

/// Storage key of the article at `path` owned by `owner`.
///
/// ```
/// use dropblog_core::article::generate_id;
///
/// assert_eq!(
///     generate_id("u@x.com", "/published/a.md"),
///     "u@x.com:article:/published/a.md"
/// );
/// ```
pub fn generate_id(owner: &str, path: &str) -> String {
    format!("{owner}{ARTICLE_SEGMENT}{path}")
}

/// Prefix shared by every article key of `owner`.
pub fn article_prefix(owner: &str) -> String {
    format!("{owner}{ARTICLE_SEGMENT}")
}

/// Key of the article index of `owner`.
pub fn index_key(owner: &str) -> String {
    format!("{owner}:index")
}

const ARTICLE_SEGMENT: &str = ":article:";
