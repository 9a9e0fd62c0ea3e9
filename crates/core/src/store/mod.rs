//! Embedded key-value store for account and article data.
//!
//! The store keeps two buckets, each an ordered map from byte keys to byte
//! values:
//! - `UserData`: account info, access tokens, uid mappings and sync cursors
//! - `UserArticles`: serialized articles and the per-owner article index
//!
//! Keys compare bytewise, so every key sharing a prefix lives in one
//! contiguous range. Prefix scans and bulk deletes rely on that.
//!
//! # Example
//!
//! ```no_run
//! use dropblog_core::store::{Bucket, Store, StoreError};
//! use std::path::Path;
//!
//! let store = Store::open(Path::new("blog.db")).unwrap();
//!
//! store
//!     .update(|tx| tx.put(Bucket::UserData, b"u@x.com:token", b"{}"))
//!     .unwrap();
//!
//! let value = store
//!     .view(|tx| -> Result<_, StoreError> { tx.get(Bucket::UserData, b"u@x.com:token") })
//!     .unwrap();
//! assert!(value.is_some());
//! ```

pub mod db;
pub mod schema;

pub use db::{Store, StoreError, Tx};
pub use schema::{SCHEMA_VERSION, SchemaError};

/// Logical namespace inside the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// Account info, tokens, uid mappings and sync cursors.
    UserData,
    /// Articles and article indexes.
    UserArticles,
}

impl Bucket {
    pub const ALL: [Bucket; 2] = [Bucket::UserData, Bucket::UserArticles];

    pub fn name(self) -> &'static str {
        match self {
            Bucket::UserData => "UserData",
            Bucket::UserArticles => "UserArticles",
        }
    }

    /// Backing table. Only ever one of these literals, so it is safe to
    /// splice into SQL text.
    pub(crate) fn table(self) -> &'static str {
        match self {
            Bucket::UserData => "user_data",
            Bucket::UserArticles => "user_articles",
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
