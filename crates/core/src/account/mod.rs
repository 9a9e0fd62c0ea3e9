//! Account and session data: account info, access tokens, uid → email
//! mappings and per-path sync cursors.

pub mod store;
pub mod types;

pub use store::{AccountError, AccountStore, cursor_key, token_key, uid_key};
pub use types::{AccessToken, AccountInfo, QuotaInfo};
