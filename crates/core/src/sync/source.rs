//! The file-sync collaborator, as seen by the synchronizer.

use thiserror::Error;

use crate::article::FileMetadata;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Remote(String),
}

/// One changed path in a delta page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeltaEntry {
    pub path: String,
    /// `None` when the path was deleted.
    pub metadata: Option<FileMetadata>,
}

impl DeltaEntry {
    pub fn changed(metadata: FileMetadata) -> Self {
        Self { path: metadata.path.clone(), metadata: Some(metadata) }
    }

    pub fn deleted(path: impl Into<String>) -> Self {
        Self { path: path.into(), metadata: None }
    }

    pub fn is_deletion(&self) -> bool {
        self.metadata.as_ref().is_none_or(|m| m.is_deleted)
    }
}

/// A page of changes since some cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delta {
    pub entries: Vec<DeltaEntry>,
    /// Cursor to pass to the next [`FileSource::delta`] call.
    pub cursor: String,
    /// The source dropped its history: local state must be cleared before
    /// applying `entries`.
    pub reset: bool,
    pub has_more: bool,
}

/// A remote folder that reports changes as cursor-based deltas.
pub trait FileSource {
    /// Folder the cursor is tracked for.
    fn root(&self) -> &str {
        "/"
    }

    /// Create `path` if it does not exist yet.
    fn create_dir(&self, path: &str) -> Result<(), SourceError>;

    /// Changes since `cursor`, or a full listing when `cursor` is `None`.
    fn delta(&self, cursor: Option<&str>) -> Result<Delta, SourceError>;

    /// Contents of the file at `path`.
    fn download(&self, path: &str) -> Result<Vec<u8>, SourceError>;
}
