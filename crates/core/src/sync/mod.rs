//! Keeping stored articles in step with a synced folder.
//!
//! A [`FileSource`] reports changes as cursor-based deltas. The
//! [`Synchronizer`] applies them for one owner: published Markdown files are
//! downloaded, parsed and saved, deletions remove articles, and the index is
//! rebuilt once at the end of the run. The cursor is stored per owner so the
//! next run only sees newer changes.

pub mod source;
pub mod synchronizer;

pub use source::{Delta, DeltaEntry, FileSource, SourceError};
pub use synchronizer::{SyncError, SyncStats, Synchronizer};
