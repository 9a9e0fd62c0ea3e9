//! Account, token and sync cursor storage.
//!
//! Keys in the `UserData` bucket:
//! - `<email>` → account info
//! - `<email>:token` → access token
//! - `<uid>` → email
//! - `<email><path>:current_cursor` → sync cursor for `path`

use thiserror::Error;

use super::types::{AccessToken, AccountInfo};
use crate::store::{Bucket, Store, StoreError};

const CURSOR_SUFFIX: &str = ":current_cursor";

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Access token not found for {0}")]
    TokenNotFound(String),

    #[error("No email registered for uid {0}")]
    UidNotFound(u64),

    #[error("No sync cursor for {email} at {path}")]
    CursorNotFound { email: String, path: String },

    #[error("Cursor path must start with '/': {0:?}")]
    InvalidCursorPath(String),
}

pub fn token_key(email: &str) -> String {
    format!("{email}:token")
}

pub fn uid_key(uid: u64) -> String {
    uid.to_string()
}

pub fn cursor_key(email: &str, path: &str) -> String {
    format!("{email}{path}{CURSOR_SUFFIX}")
}

/// CRUD for the account namespace. Every call runs in its own transaction.
pub struct AccountStore<'a> {
    store: &'a Store,
}

impl<'a> AccountStore<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Store account info, token and the uid → email mapping together.
    pub fn save_user_data(
        &self,
        info: &AccountInfo,
        token: &AccessToken,
    ) -> Result<(), AccountError> {
        if info.email.is_empty() {
            return Err(AccountError::AccountNotFound(String::new()));
        }
        self.store.update(|tx| -> Result<(), StoreError> {
            tx.put_json(Bucket::UserData, token_key(&info.email).as_bytes(), token)?;
            tx.put_json(Bucket::UserData, info.email.as_bytes(), info)?;
            tx.put(Bucket::UserData, uid_key(info.uid).as_bytes(), info.email.as_bytes())?;
            Ok(())
        })?;
        tracing::debug!("Saved account {} (uid {})", info.email, info.uid);
        Ok(())
    }

    pub fn load_user_data(&self, email: &str) -> Result<AccountInfo, AccountError> {
        if email.is_empty() {
            return Err(AccountError::AccountNotFound(String::new()));
        }
        self.store
            .view(|tx| tx.get_json(Bucket::UserData, email.as_bytes()))?
            .ok_or_else(|| AccountError::AccountNotFound(email.to_string()))
    }

    pub fn load_user_token(&self, email: &str) -> Result<AccessToken, AccountError> {
        if email.is_empty() {
            return Err(AccountError::TokenNotFound(String::new()));
        }
        let token: Option<AccessToken> =
            self.store.view(|tx| tx.get_json(Bucket::UserData, token_key(email).as_bytes()))?;
        token.ok_or_else(|| AccountError::TokenNotFound(email.to_string()))
    }

    pub fn get_user_email_by_uid(&self, uid: u64) -> Result<String, AccountError> {
        let email =
            self.store.view(|tx| tx.get(Bucket::UserData, uid_key(uid).as_bytes()))?;
        match email {
            Some(bytes) if !bytes.is_empty() => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            _ => Err(AccountError::UidNotFound(uid)),
        }
    }

    pub fn load_user_token_by_uid(&self, uid: u64) -> Result<AccessToken, AccountError> {
        let email = self.get_user_email_by_uid(uid)?;
        self.load_user_token(&email)
    }

    pub fn save_current_cursor(
        &self,
        email: &str,
        path: &str,
        cursor: &str,
    ) -> Result<(), AccountError> {
        if email.is_empty() {
            return Err(AccountError::AccountNotFound(String::new()));
        }
        // Rooted paths keep every cursor of `email` under `<email>/`.
        if !path.starts_with('/') {
            return Err(AccountError::InvalidCursorPath(path.to_string()));
        }
        self.store.update(|tx| {
            tx.put(Bucket::UserData, cursor_key(email, path).as_bytes(), cursor.as_bytes())
        })?;
        Ok(())
    }

    pub fn get_current_cursor(&self, email: &str, path: &str) -> Result<String, AccountError> {
        let not_found = || AccountError::CursorNotFound {
            email: email.to_string(),
            path: path.to_string(),
        };
        if email.is_empty() {
            return Err(not_found());
        }
        let cursor =
            self.store.view(|tx| tx.get(Bucket::UserData, cursor_key(email, path).as_bytes()))?;
        match cursor {
            Some(bytes) if !bytes.is_empty() => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            _ => Err(not_found()),
        }
    }

    /// Remove account info, token, uid mapping and every sync cursor of
    /// `email`. Returns the number of keys removed.
    pub fn remove_account(&self, email: &str) -> Result<usize, AccountError> {
        if email.is_empty() {
            return Err(AccountError::AccountNotFound(String::new()));
        }
        let removed = self.store.update(|tx| -> Result<usize, StoreError> {
            let mut removed = 0;

            if let Some(info) = tx.get_json::<AccountInfo>(Bucket::UserData, email.as_bytes())? {
                let uid = uid_key(info.uid);
                // Only drop the mapping if it still points at this account.
                if tx.get(Bucket::UserData, uid.as_bytes())?.as_deref() == Some(email.as_bytes()) {
                    removed += usize::from(tx.delete(Bucket::UserData, uid.as_bytes())?);
                }
            }
            removed += usize::from(tx.delete(Bucket::UserData, email.as_bytes())?);
            removed += usize::from(tx.delete(Bucket::UserData, token_key(email).as_bytes())?);

            // Cursor paths are `/`-rooted, so all of them share `<email>/`.
            let prefix = format!("{email}/");
            for (key, _) in tx.scan_prefix(Bucket::UserData, prefix.as_bytes())? {
                if key.ends_with(CURSOR_SUFFIX.as_bytes()) {
                    removed += usize::from(tx.delete(Bucket::UserData, &key)?);
                }
            }
            Ok(removed)
        })?;
        tracing::debug!("Removed {} keys of account {}", removed, email);
        Ok(removed)
    }
}
