//! Applies source deltas to the article store.

use thiserror::Error;

use super::source::{DeltaEntry, FileSource, SourceError};
use crate::account::{AccountError, AccountStore};
use crate::article::{ArticleError, ArticleStore, IndexBuilder, article_prefix, generate_id};
use crate::ingest::EntryParser;
use crate::store::{Bucket, Store, StoreError};

const DRAFTS_DIR: &str = "/drafts";

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("File source error: {0}")]
    Source(#[from] SourceError),

    #[error(transparent)]
    Article(#[from] ArticleError),

    #[error(transparent)]
    Account(#[from] AccountError),
}

impl From<StoreError> for SyncError {
    fn from(e: StoreError) -> Self {
        SyncError::Article(ArticleError::Store(e))
    }
}

/// Outcome of one [`Synchronizer::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub saved: usize,
    pub deleted: usize,
    pub skipped: usize,
    /// Whether the source asked for a reset.
    pub reset: bool,
    /// Entries in the rebuilt index.
    pub indexed: usize,
    /// Cursor stored at the end of the run.
    pub cursor: String,
}

/// Pulls changes from a [`FileSource`] and keeps one owner's articles and
/// index in step with the published folder.
pub struct Synchronizer<'a, S: FileSource + ?Sized> {
    store: &'a Store,
    source: &'a S,
    parser: EntryParser,
}

impl<'a, S: FileSource + ?Sized> Synchronizer<'a, S> {
    pub fn new(store: &'a Store, source: &'a S) -> Self {
        Self { store, source, parser: EntryParser::new() }
    }

    /// Only `.md` files below this folder are published, and the folder is
    /// left out of default permalinks. Defaults to `/published/`.
    pub fn with_published_dir(mut self, dir: &str) -> Self {
        self.parser = self.parser.with_published_dir(dir);
        self
    }

    pub fn run(&self, owner: &str) -> Result<SyncStats, SyncError> {
        let articles = ArticleStore::new(self.store);
        let accounts = AccountStore::new(self.store);
        let root = self.source.root();

        self.source.create_dir(DRAFTS_DIR)?;
        let published = self.parser.published_dir().trim_end_matches('/');
        if !published.is_empty() {
            self.source.create_dir(published)?;
        }

        let mut cursor = match accounts.get_current_cursor(owner, root) {
            Ok(c) => Some(c),
            Err(AccountError::CursorNotFound { .. }) => None,
            Err(e) => return Err(e.into()),
        };
        tracing::info!(
            "Syncing {} from {} ({})",
            owner,
            root,
            if cursor.is_some() { "incremental" } else { "full listing" }
        );

        let mut stats = SyncStats::default();
        loop {
            let delta = self.source.delta(cursor.as_deref())?;
            if delta.reset {
                let removed = articles.delete_articles(owner)?;
                tracing::info!("Source reset for {}: dropped {} articles", owner, removed);
                stats.reset = true;
            }
            for entry in &delta.entries {
                self.apply(owner, entry, &articles, &mut stats)?;
            }
            cursor = Some(delta.cursor);
            if !delta.has_more {
                break;
            }
        }

        let cursor = cursor.unwrap_or_default();
        accounts.save_current_cursor(owner, root, &cursor)?;
        stats.cursor = cursor;
        stats.indexed = IndexBuilder::new(self.store).rebuild(owner)?.indexed;

        tracing::info!(
            "Synced {}: {} saved, {} deleted, {} skipped",
            owner,
            stats.saved,
            stats.deleted,
            stats.skipped
        );
        Ok(stats)
    }

    fn apply(
        &self,
        owner: &str,
        entry: &DeltaEntry,
        articles: &ArticleStore<'_>,
        stats: &mut SyncStats,
    ) -> Result<(), SyncError> {
        if entry.is_deletion() {
            stats.deleted += self.delete_path(owner, &entry.path)?;
            return Ok(());
        }

        let Some(meta) = entry.metadata.as_ref() else { return Ok(()) };
        if meta.is_dir || !self.is_published(&entry.path) {
            tracing::debug!("Skipping {}", entry.path);
            stats.skipped += 1;
            return Ok(());
        }

        let raw = match self.source.download(&entry.path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to download {}: {}", entry.path, e);
                stats.skipped += 1;
                return Ok(());
            }
        };

        let mut file = meta.clone();
        file.path = entry.path.clone();
        let article = self.parser.parse_owned(owner, file, &raw);
        articles.save(&article)?;
        stats.saved += 1;
        Ok(())
    }

    /// Remove the article at `path`, or every article below it when `path`
    /// was a folder.
    fn delete_path(&self, owner: &str, path: &str) -> Result<usize, SyncError> {
        let id = generate_id(owner, path);
        let folder = format!("{}{}/", article_prefix(owner), path.trim_end_matches('/'));
        let removed = self.store.update(|tx| -> Result<usize, StoreError> {
            let mut removed = usize::from(tx.delete(Bucket::UserArticles, id.as_bytes())?);
            removed += tx.delete_prefix(Bucket::UserArticles, folder.as_bytes())?;
            Ok(removed)
        })?;
        if removed > 0 {
            tracing::debug!("Deleted {} articles at {}", removed, path);
        }
        Ok(removed)
    }

    fn is_published(&self, path: &str) -> bool {
        path.starts_with(self.parser.published_dir()) && path.ends_with(".md")
    }
}
