//! Core of dropblog: turns Markdown files from a synced folder into
//! sanitized, indexed blog articles kept in an embedded key-value store.
//!
//! - [`store`]: buckets of ordered keys with read and write transactions
//! - [`metadata`] and [`content`]: header extraction, defaults, rendering
//! - [`ingest`]: raw file to [`article::Article`]
//! - [`article`]: article CRUD and the per-owner index
//! - [`account`]: accounts, tokens and sync cursors
//! - [`sync`]: applying deltas from a [`sync::FileSource`]

pub mod account;
pub mod article;
pub mod config;
pub mod content;
pub mod ingest;
pub mod metadata;
pub mod store;
pub mod sync;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
