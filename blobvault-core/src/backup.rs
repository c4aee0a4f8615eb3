use crate::error::{ItemError, Result, VaultError};
use crate::util::ident::quote_ident;
use rusqlite::{Connection, params};
use std::path::Path;
use tracing::debug;

/// Table and column names of the backup store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackupLayout {
    pub table: String,
    pub key_column: String,
    pub data_column: String,
}

impl Default for BackupLayout {
    fn default() -> Self {
        Self {
            table: "backup".to_string(),
            key_column: "tradingStatusPath".to_string(),
            data_column: "data".to_string(),
        }
    }
}

impl BackupLayout {
    /// Layout whose key column is `key_column`. The value column is `data`,
    /// or `data_blob` when that would clash with the key (SQLite compares
    /// column names case-insensitively).
    pub fn new(table: impl Into<String>, key_column: impl Into<String>) -> Self {
        let key_column = key_column.into();
        let data_column = if key_column.eq_ignore_ascii_case("data") {
            "data_blob"
        } else {
            "data"
        };
        Self {
            table: table.into(),
            key_column,
            data_column: data_column.to_string(),
        }
    }

    fn create_sql(&self) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({} TEXT PRIMARY KEY, {} BLOB)",
            quote_ident(&self.table),
            quote_ident(&self.key_column),
            quote_ident(&self.data_column),
        )
    }

    fn upsert_sql(&self) -> String {
        format!(
            "INSERT OR REPLACE INTO {} ({}, {}) VALUES (?1, ?2)",
            quote_ident(&self.table),
            quote_ident(&self.key_column),
            quote_ident(&self.data_column),
        )
    }

    pub(crate) fn list_sql(&self) -> String {
        format!(
            "SELECT {k}, length({d}) FROM {t} ORDER BY {k}",
            k = quote_ident(&self.key_column),
            d = quote_ident(&self.data_column),
            t = quote_ident(&self.table),
        )
    }
}

/// Destination for archived payloads.
///
/// Each call is its own unit of durability: when `upsert` returns `Ok` the
/// blob is committed, and a failure leaves no partial row behind.
pub trait BlobSink {
    fn upsert(&mut self, key: &str, payload: &[u8]) -> std::result::Result<(), ItemError>;
}

pub struct BackupStore {
    conn: Connection,
    upsert_sql: String,
}

impl BackupStore {
    /// Open or create the backup database and make sure its table exists.
    pub fn open(path: &Path, layout: &BackupLayout) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| VaultError::BackupUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        conn.execute_batch(&layout.create_sql())
            .map_err(|source| VaultError::Schema {
                table: layout.table.clone(),
                source,
            })?;
        debug!(backup = %path.display(), table = %layout.table, "backup store ready");
        Ok(Self {
            conn,
            upsert_sql: layout.upsert_sql(),
        })
    }
}

impl BlobSink for BackupStore {
    fn upsert(&mut self, key: &str, payload: &[u8]) -> std::result::Result<(), ItemError> {
        let tx = self.conn.transaction().map_err(ItemError::Write)?;
        tx.execute(&self.upsert_sql, params![key, payload])
            .map_err(ItemError::Write)?;
        // A failed commit drops `tx`, which rolls the item back.
        tx.commit().map_err(ItemError::Commit)
    }
}
