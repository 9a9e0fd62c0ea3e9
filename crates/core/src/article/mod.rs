//! Articles: the stored form of a blog post, keyed storage and the listing
//! index.
//!
//! Layout inside the `UserArticles` bucket:
//! - `<owner>:article:<path>` → one serialized [`Article`]
//! - `<owner>:index` → serialized list of content-stripped articles, most
//!   recent first
//!
//! # Example
//!
//! ```no_run
//! use dropblog_core::article::{ArticleStore, IndexBuilder};
//! use dropblog_core::store::Store;
//!
//! let store = Store::open_in_memory().unwrap();
//! IndexBuilder::new(&store).rebuild("u@x.com").unwrap();
//!
//! for entry in ArticleStore::new(&store).load_index("u@x.com").unwrap() {
//!     println!("{} {}", entry.created_at, entry.title);
//! }
//! ```

pub mod index;
pub mod store;
pub mod types;

pub use index::{IndexBuilder, ReindexStats, SortKey};
pub use store::{ArticleError, ArticleStore};
pub use types::{Article, FileMetadata, article_prefix, generate_id, index_key};
