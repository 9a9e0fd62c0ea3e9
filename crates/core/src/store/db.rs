//! Store handle and transactions.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use rusqlite::{Connection, OpenFlags, OptionalExtension, TransactionBehavior, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::Bucket;
use super::schema::{SchemaError, init_schema};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Write attempted in a read-only transaction")]
    ReadOnly,

    #[error("Key must not be empty")]
    EmptyKey,

    #[error("Store connection lock poisoned")]
    Poisoned,
}

/// Handle to the embedded store.
///
/// Opened once and shared by reference. Read-write transactions are
/// serialized through the writer connection. For file-backed stores every
/// read-only transaction gets its own connection, so readers run in parallel
/// and each sees a consistent snapshot.
pub struct Store {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl Store {
    /// Open or create a store at the given path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        init_schema(&conn)?;
        tracing::debug!("Opened store at {}", path.display());
        Ok(Self { conn: Mutex::new(conn), path: Some(path.to_path_buf()) })
    }

    /// Create an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self { conn: Mutex::new(conn), path: None })
    }

    /// Location of the backing file, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Close the store, flushing the writer connection.
    pub fn close(self) -> Result<(), StoreError> {
        let conn = self.conn.into_inner().map_err(|_| StoreError::Poisoned)?;
        conn.close().map_err(|(_, e)| StoreError::Database(e))
    }

    /// Run `f` inside a read-write transaction.
    ///
    /// The transaction commits when `f` returns `Ok` and rolls back otherwise.
    pub fn update<T, E>(&self, f: impl FnOnce(&Tx<'_>) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let mut conn = self.lock()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(StoreError::from)?;
        let out = f(&Tx { conn: &tx, writable: true })?;
        tx.commit().map_err(StoreError::from)?;
        Ok(out)
    }

    /// Run `f` inside a read-only transaction.
    pub fn view<T, E>(&self, f: impl FnOnce(&Tx<'_>) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        match &self.path {
            Some(path) => {
                let mut conn = open_reader(path)?;
                read_in(&mut conn, f)
            }
            None => {
                let mut conn = self.lock()?;
                read_in(&mut conn, f)
            }
        }
    }

    /// Delete a single key. Absent keys are not an error.
    pub fn delete(&self, bucket: Bucket, key: &[u8]) -> Result<bool, StoreError> {
        self.update(|tx| tx.delete(bucket, key))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}

fn open_reader(path: &Path) -> Result<Connection, StoreError> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(conn)
}

fn read_in<T, E>(
    conn: &mut Connection,
    f: impl FnOnce(&Tx<'_>) -> Result<T, E>,
) -> Result<T, E>
where
    E: From<StoreError>,
{
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Deferred)
        .map_err(StoreError::from)?;
    let out = f(&Tx { conn: &tx, writable: false })?;
    tx.rollback().map_err(StoreError::from)?;
    Ok(out)
}

/// A key/value pair returned by a prefix scan.
pub type Entry = (Vec<u8>, Vec<u8>);

/// An open transaction. Obtained through [`Store::update`] or [`Store::view`].
pub struct Tx<'a> {
    conn: &'a Connection,
    writable: bool,
}

impl Tx<'_> {
    /// Whether this transaction accepts writes.
    pub fn writable(&self) -> bool {
        self.writable
    }

    pub fn get(&self, bucket: Bucket, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("SELECT value FROM {} WHERE key = ?1", bucket.table()))?;
        stmt.query_row(params![key], |row| row.get(0)).optional().map_err(Into::into)
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn put(&self, bucket: Bucket, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.check_write(key)?;
        let mut stmt = self.conn.prepare_cached(&format!(
            "INSERT INTO {} (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            bucket.table()
        ))?;
        stmt.execute(params![key, value])?;
        Ok(())
    }

    /// Remove `key`. Returns whether it existed.
    pub fn delete(&self, bucket: Bucket, key: &[u8]) -> Result<bool, StoreError> {
        self.check_write(key)?;
        let mut stmt = self
            .conn
            .prepare_cached(&format!("DELETE FROM {} WHERE key = ?1", bucket.table()))?;
        Ok(stmt.execute(params![key])? > 0)
    }

    /// All entries whose key starts with `prefix`, in key order.
    pub fn scan_prefix(&self, bucket: Bucket, prefix: &[u8]) -> Result<Vec<Entry>, StoreError> {
        if prefix.is_empty() {
            return Err(StoreError::EmptyKey);
        }

        let read_row = |row: &rusqlite::Row<'_>| -> rusqlite::Result<Entry> {
            Ok((row.get(0)?, row.get(1)?))
        };
        let table = bucket.table();

        let entries = match prefix_successor(prefix) {
            Some(end) => {
                let mut stmt = self.conn.prepare_cached(&format!(
                    "SELECT key, value FROM {table} WHERE key >= ?1 AND key < ?2 ORDER BY key"
                ))?;
                let rows = stmt
                    .query_map(params![prefix, end], read_row)?
                    .collect::<Result<Vec<Entry>, _>>()?;
                rows
            }
            None => {
                let mut stmt = self.conn.prepare_cached(&format!(
                    "SELECT key, value FROM {table} WHERE key >= ?1 ORDER BY key"
                ))?;
                let rows =
                    stmt.query_map(params![prefix], read_row)?.collect::<Result<Vec<Entry>, _>>()?;
                rows
            }
        };

        Ok(entries)
    }

    /// Remove every entry whose key starts with `prefix`. Returns the count.
    pub fn delete_prefix(&self, bucket: Bucket, prefix: &[u8]) -> Result<usize, StoreError> {
        self.check_write(prefix)?;
        let table = bucket.table();

        let rows = match prefix_successor(prefix) {
            Some(end) => self.conn.execute(
                &format!("DELETE FROM {table} WHERE key >= ?1 AND key < ?2"),
                params![prefix, end],
            )?,
            None => self
                .conn
                .execute(&format!("DELETE FROM {table} WHERE key >= ?1"), params![prefix])?,
        };

        Ok(rows)
    }

    /// Read and deserialize a JSON value.
    pub fn get_json<T: DeserializeOwned>(
        &self,
        bucket: Bucket,
        key: &[u8],
    ) -> Result<Option<T>, StoreError> {
        match self.get(bucket, key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Serialize `value` as JSON and store it.
    pub fn put_json<T: Serialize + ?Sized>(
        &self,
        bucket: Bucket,
        key: &[u8],
        value: &T,
    ) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(value)?;
        self.put(bucket, key, &bytes)
    }

    fn check_write(&self, key: &[u8]) -> Result<(), StoreError> {
        if !self.writable {
            return Err(StoreError::ReadOnly);
        }
        if key.is_empty() {
            return Err(StoreError::EmptyKey);
        }
        Ok(())
    }
}

/// Smallest byte string greater than every string starting with `prefix`.
/// `None` when the prefix is all `0xFF` and the range is unbounded.
fn prefix_successor(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut end = prefix.to_vec();
    while let Some(last) = end.pop() {
        if last < u8::MAX {
            end.push(last + 1);
            return Some(end);
        }
    }
    None
}
