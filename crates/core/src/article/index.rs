//! Per-owner article index, rebuilt wholesale.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::store::{ArticleError, validate_owner};
use super::types::{Article, article_prefix, index_key};
use crate::store::{Bucket, Store, StoreError};

/// Statistics from a reindex.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReindexStats {
    /// Article entries found under the owner's prefix.
    pub scanned: usize,
    /// Entries written to the index.
    pub indexed: usize,
    /// Entries that shared a sort key with a later entry and were dropped.
    pub collapsed: usize,
    /// Entries that could not be deserialized.
    pub skipped: usize,
    pub duration_ms: u64,
}

/// Listing order of an index entry: creation epoch, then permalink.
///
/// Epochs compare as integers, so the order does not depend on how many
/// digits the timestamps have. Entries without a parsable timestamp sort
/// before every dated entry, which puts them last in the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub epoch: Option<i64>,
    pub permalink: String,
}

impl SortKey {
    pub fn of(article: &Article) -> Self {
        Self { epoch: article.timestamp.parse().ok(), permalink: article.permalink.clone() }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch.cmp(&other.epoch).then_with(|| self.permalink.cmp(&other.permalink))
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Rebuilds the `<owner>:index` record from the owner's stored articles.
pub struct IndexBuilder<'a> {
    store: &'a Store,
}

impl<'a> IndexBuilder<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Recompute the index of `owner` from scratch and persist it.
    ///
    /// The scan and the write share one read-write transaction, so the stored
    /// index always matches a consistent set of articles.
    pub fn rebuild(&self, owner: &str) -> Result<ReindexStats, ArticleError> {
        validate_owner(owner)?;
        let start = std::time::Instant::now();
        let prefix = article_prefix(owner);
        let key = index_key(owner);

        let mut stats = self.store.update(|tx| -> Result<ReindexStats, StoreError> {
            let entries = tx.scan_prefix(Bucket::UserArticles, prefix.as_bytes())?;
            let mut stats = ReindexStats { scanned: entries.len(), ..Default::default() };

            let mut sorted: BTreeMap<SortKey, Article> = BTreeMap::new();
            for (entry_key, value) in entries {
                let article: Article = match serde_json::from_slice(&value) {
                    Ok(a) => a,
                    Err(e) => {
                        tracing::warn!(
                            "Skipping unreadable article {}: {}",
                            String::from_utf8_lossy(&entry_key),
                            e
                        );
                        stats.skipped += 1;
                        continue;
                    }
                };
                // Scan runs in key order, so on a tie the greatest key wins.
                if sorted.insert(SortKey::of(&article), article.without_content()).is_some() {
                    stats.collapsed += 1;
                }
            }

            let index: Vec<Article> = sorted.into_values().rev().collect();
            tx.put_json(Bucket::UserArticles, key.as_bytes(), &index)?;
            stats.indexed = index.len();
            Ok(stats)
        })?;

        stats.duration_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(
            "Reindexed {}: {} scanned, {} indexed, {} collapsed, {} skipped",
            owner,
            stats.scanned,
            stats.indexed,
            stats.collapsed,
            stats.skipped
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::{ArticleStore, FileMetadata};

    fn save(store: &Store, owner: &str, path: &str, permalink: &str, timestamp: &str) -> Article {
        let mut a = Article {
            content: "<p>long body</p>".into(),
            permalink: permalink.into(),
            title: permalink.replace('-', " "),
            timestamp: timestamp.into(),
            file: FileMetadata { path: path.into(), ..Default::default() },
            ..Default::default()
        };
        a.generate_id(owner);
        ArticleStore::new(store).save(&a).unwrap();
        a
    }

    fn permalinks(index: &[Article]) -> Vec<&str> {
        index.iter().map(|a| a.permalink.as_str()).collect()
    }

    fn raw_index(store: &Store, owner: &str) -> Vec<u8> {
        store
            .view(|tx| tx.get(Bucket::UserArticles, index_key(owner).as_bytes()))
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_rebuild_orders_most_recent_first() {
        let store = Store::open_in_memory().unwrap();
        save(&store, "u@x.com", "/published/a.md", "a", "1609459200");
        save(&store, "u@x.com", "/published/c.md", "c", "1640995200");
        save(&store, "u@x.com", "/published/b.md", "b", "1622505600");

        let stats = IndexBuilder::new(&store).rebuild("u@x.com").unwrap();
        assert_eq!(stats.scanned, 3);
        assert_eq!(stats.indexed, 3);

        let index = ArticleStore::new(&store).load_index("u@x.com").unwrap();
        assert_eq!(permalinks(&index), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_rebuild_strips_content() {
        let store = Store::open_in_memory().unwrap();
        let saved = save(&store, "u@x.com", "/published/a.md", "a", "1609459200");

        IndexBuilder::new(&store).rebuild("u@x.com").unwrap();
        let index = ArticleStore::new(&store).load_index("u@x.com").unwrap();
        assert_eq!(index.len(), 1);
        assert!(index[0].content.is_empty());
        assert_eq!(index[0].id, saved.id);

        // The stored article keeps its body.
        let stored = ArticleStore::new(&store).load(&saved.id).unwrap();
        assert_eq!(stored.content, "<p>long body</p>");
    }

    #[test]
    fn test_rebuild_compares_epochs_numerically() {
        let store = Store::open_in_memory().unwrap();
        // As strings, the eight-digit 1973 epoch would sort after the ten-digit 2001 one.
        save(&store, "u@x.com", "/published/old.md", "old", "99999999");
        save(&store, "u@x.com", "/published/new.md", "new", "1000000000");
        save(&store, "u@x.com", "/published/undated.md", "undated", "");

        IndexBuilder::new(&store).rebuild("u@x.com").unwrap();
        let index = ArticleStore::new(&store).load_index("u@x.com").unwrap();
        assert_eq!(permalinks(&index), vec!["new", "old", "undated"]);
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let store = Store::open_in_memory().unwrap();
        save(&store, "u@x.com", "/published/a.md", "a", "1609459200");
        save(&store, "u@x.com", "/published/b.md", "b", "1622505600");

        let builder = IndexBuilder::new(&store);
        builder.rebuild("u@x.com").unwrap();
        let first = raw_index(&store, "u@x.com");
        builder.rebuild("u@x.com").unwrap();
        assert_eq!(raw_index(&store, "u@x.com"), first);
    }

    #[test]
    fn test_duplicate_sort_keys_collapse() {
        let store = Store::open_in_memory().unwrap();
        save(&store, "u@x.com", "/published/my post.md", "my-post", "1609459200");
        save(&store, "u@x.com", "/published/my_post.md", "my-post", "1609459200");

        let stats = IndexBuilder::new(&store).rebuild("u@x.com").unwrap();
        assert_eq!(stats.collapsed, 1);

        let index = ArticleStore::new(&store).load_index("u@x.com").unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index[0].path(), "/published/my_post.md");
    }

    #[test]
    fn test_rebuild_ignores_other_owners() {
        let store = Store::open_in_memory().unwrap();
        save(&store, "u@x.com", "/published/a.md", "a", "1609459200");
        save(&store, "v@x.com", "/published/b.md", "b", "1622505600");

        IndexBuilder::new(&store).rebuild("u@x.com").unwrap();
        let index = ArticleStore::new(&store).load_index("u@x.com").unwrap();
        assert_eq!(permalinks(&index), vec!["a"]);
    }

    #[test]
    fn test_rebuild_skips_unreadable_entries() {
        let store = Store::open_in_memory().unwrap();
        save(&store, "u@x.com", "/published/a.md", "a", "1609459200");
        store
            .update(|tx| tx.put(Bucket::UserArticles, b"u@x.com:article:/broken.md", b"not json"))
            .unwrap();

        let stats = IndexBuilder::new(&store).rebuild("u@x.com").unwrap();
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.indexed, 1);
    }

    #[test]
    fn test_rebuild_without_articles_writes_empty_index() {
        let store = Store::open_in_memory().unwrap();
        let stats = IndexBuilder::new(&store).rebuild("u@x.com").unwrap();
        assert_eq!(stats.indexed, 0);
        assert_eq!(raw_index(&store, "u@x.com"), b"[]".to_vec());
    }
}
