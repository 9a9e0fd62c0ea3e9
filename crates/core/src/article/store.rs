//! Keyed article storage.

use thiserror::Error;

use super::types::{Article, article_prefix, index_key};
use crate::store::{Bucket, Store, StoreError};

#[derive(Debug, Error)]
pub enum ArticleError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Article not found: {0}")]
    NotFound(String),

    #[error("Article has no ID; call generate_id before saving")]
    MissingId,

    #[error("Invalid owner '{0}': must be non-empty and must not contain ':'")]
    InvalidOwner(String),
}

/// Article CRUD over the `UserArticles` bucket.
///
/// Every call runs in its own transaction.
pub struct ArticleStore<'a> {
    store: &'a Store,
}

impl<'a> ArticleStore<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Write `article` under its ID, replacing whatever was stored there.
    pub fn save(&self, article: &Article) -> Result<(), ArticleError> {
        if article.id.is_empty() {
            return Err(ArticleError::MissingId);
        }
        self.store.update(|tx| tx.put_json(Bucket::UserArticles, article.id.as_bytes(), article))?;
        tracing::debug!("Saved article {}", article.id);
        Ok(())
    }

    /// Remove `article`. Not an error if it was never stored.
    pub fn delete(&self, article: &Article) -> Result<(), ArticleError> {
        self.delete_by_id(&article.id)?;
        Ok(())
    }

    /// Remove the article stored under `id`. Returns whether it existed.
    pub fn delete_by_id(&self, id: &str) -> Result<bool, ArticleError> {
        if id.is_empty() {
            return Err(ArticleError::MissingId);
        }
        Ok(self.store.delete(Bucket::UserArticles, id.as_bytes())?)
    }

    /// Load the article stored under `id`.
    pub fn load(&self, id: &str) -> Result<Article, ArticleError> {
        if id.is_empty() {
            return Err(ArticleError::NotFound(String::new()));
        }

        let article: Option<Article> =
            self.store.view(|tx| tx.get_json(Bucket::UserArticles, id.as_bytes()))?;

        match article {
            Some(a) if !a.id.is_empty() => Ok(a),
            _ => Err(ArticleError::NotFound(id.to_string())),
        }
    }

    /// Remove every article of `owner`. Returns the number removed.
    ///
    /// The owner's index is left alone; see [`ArticleStore::delete_index`].
    pub fn delete_articles(&self, owner: &str) -> Result<usize, ArticleError> {
        validate_owner(owner)?;
        let prefix = article_prefix(owner);
        let removed =
            self.store.update(|tx| tx.delete_prefix(Bucket::UserArticles, prefix.as_bytes()))?;
        tracing::debug!("Deleted {} articles of {}", removed, owner);
        Ok(removed)
    }

    /// The last index built for `owner`, most recent first.
    /// Empty when no index has been built yet.
    pub fn load_index(&self, owner: &str) -> Result<Vec<Article>, ArticleError> {
        validate_owner(owner)?;
        let key = index_key(owner);
        let index: Option<Vec<Article>> =
            self.store.view(|tx| tx.get_json(Bucket::UserArticles, key.as_bytes()))?;
        Ok(index.unwrap_or_default())
    }

    /// Remove the index of `owner`. Returns whether one existed.
    pub fn delete_index(&self, owner: &str) -> Result<bool, ArticleError> {
        validate_owner(owner)?;
        Ok(self.store.delete(Bucket::UserArticles, index_key(owner).as_bytes())?)
    }

    /// All stored articles of `owner`, in key order, content included.
    pub fn list(&self, owner: &str) -> Result<Vec<Article>, ArticleError> {
        validate_owner(owner)?;
        let prefix = article_prefix(owner);
        let entries =
            self.store.view(|tx| tx.scan_prefix(Bucket::UserArticles, prefix.as_bytes()))?;

        let mut articles = Vec::with_capacity(entries.len());
        for (_, value) in entries {
            articles.push(serde_json::from_slice(&value).map_err(StoreError::from)?);
        }
        Ok(articles)
    }
}

/// Owner identifiers lead every key of their namespace. Refusing `:` keeps one
/// owner's prefix from reaching into another owner's keys.
pub(crate) fn validate_owner(owner: &str) -> Result<(), ArticleError> {
    if owner.is_empty() || owner.contains(':') {
        return Err(ArticleError::InvalidOwner(owner.to_string()));
    }
    Ok(())
}
