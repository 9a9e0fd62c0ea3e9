//! A local folder standing in for the synced tree.

use std::fs;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};
use dropblog_core::article::FileMetadata;
use dropblog_core::sync::{Delta, DeltaEntry, FileSource, SourceError};
use walkdir::{DirEntry, WalkDir};

/// Serves a local directory as a [`FileSource`].
///
/// There is no change history, so every delta is a full listing with
/// `reset` set.
pub struct LocalDirSource {
    root: PathBuf,
}

impl LocalDirSource {
    pub fn new(root: &Path) -> std::io::Result<Self> {
        let root = root.canonicalize()?;
        if !root.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotADirectory,
                format!("{} is not a directory", root.display()),
            ));
        }
        Ok(Self { root })
    }

    fn local_path(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }

    fn metadata(&self, entry: &DirEntry) -> Result<FileMetadata, SourceError> {
        let meta = entry.metadata().map_err(std::io::Error::from)?;
        let modified: DateTime<Utc> = meta.modified()?.into();
        let path = remote_path(&self.root, entry.path());

        if meta.is_dir() {
            return Ok(FileMetadata { path, modified, is_dir: true, ..Default::default() });
        }

        let bytes = fs::read(entry.path())?;
        Ok(FileMetadata {
            mime_type: mime_type(&path).to_string(),
            path,
            modified,
            rev: content_rev(&bytes),
            size: human_size(meta.len()),
            bytes: meta.len(),
            ..Default::default()
        })
    }
}

impl FileSource for LocalDirSource {
    fn create_dir(&self, path: &str) -> Result<(), SourceError> {
        fs::create_dir_all(self.local_path(path))?;
        Ok(())
    }

    fn delta(&self, _cursor: Option<&str>) -> Result<Delta, SourceError> {
        let mut entries = Vec::new();
        let mut hasher = DefaultHasher::new();

        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_hidden(e));
        for entry in walker {
            let entry = entry.map_err(std::io::Error::from)?;
            let meta = self.metadata(&entry)?;
            meta.path.hash(&mut hasher);
            meta.rev.hash(&mut hasher);
            entries.push(DeltaEntry::changed(meta));
        }

        tracing::debug!("Listed {} entries under {}", entries.len(), self.root.display());
        let cursor = format!("{:016x}", hasher.finish());
        Ok(Delta { entries, cursor, reset: true, has_more: false })
    }

    fn download(&self, path: &str) -> Result<Vec<u8>, SourceError> {
        let local = self.local_path(path);
        if !local.is_file() {
            return Err(SourceError::NotFound(path.to_string()));
        }
        Ok(fs::read(local)?)
    }
}

/// Revision of a file: hash of its contents.
pub fn content_rev(bytes: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

pub fn human_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{bytes} bytes")
    } else if b < KB * KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / (KB * KB))
    }
}

/// `/`-rooted path of `path` relative to `root`.
fn remote_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let mut out = String::new();
    for c in rel.components() {
        if let Component::Normal(part) = c {
            out.push('/');
            out.push_str(&part.to_string_lossy());
        }
    }
    if out.is_empty() { "/".to_string() } else { out }
}

fn mime_type(path: &str) -> &'static str {
    match path.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()).as_deref() {
        Some("md" | "markdown") => "text/markdown",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|s| s.starts_with('.'))
}
