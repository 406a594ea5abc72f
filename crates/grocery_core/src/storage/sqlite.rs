//! SQLite-backed key-value slots.
//!
//! # Invariants
//! - Only connections migrated by `crate::db` are accepted.
//! - Each `set` is a single upsert statement.

use super::{KeyValueStore, KvError, KvResult};
use crate::db::migrations::{current_user_version, latest_version};
use crate::db::{open_db, open_db_in_memory};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

const KV_TABLE: &str = "kv_entries";

/// Key-value store persisted in the `kv_entries` table.
pub struct SqliteKeyValueStore {
    conn: Connection,
}

impl SqliteKeyValueStore {
    /// Wraps a connection that has already been opened through `crate::db`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` when the slot table is absent.
    pub fn try_new(conn: Connection) -> KvResult<Self> {
        ensure_connection_ready(&conn)?;
        Ok(Self { conn })
    }

    /// Opens (or creates) the database file and wraps it.
    pub fn open(path: impl AsRef<Path>) -> KvResult<Self> {
        Self::try_new(open_db(path)?)
    }

    pub fn open_in_memory() -> KvResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn into_connection(self) -> Connection {
        self.conn
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> KvResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

fn ensure_connection_ready(conn: &Connection) -> KvResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version < expected_version {
        return Err(KvError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
        [KV_TABLE],
        |row| row.get(0),
    )?;
    if !exists {
        return Err(KvError::MissingRequiredTable(KV_TABLE));
    }
    Ok(())
}
