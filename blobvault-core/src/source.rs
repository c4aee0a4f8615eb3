use crate::domain::SourceRecord;
use crate::error::{Result, VaultError};
use crate::util::ident::quote_ident;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read-only handle on the index database that references the files.
pub struct SourceIndex {
    conn: Connection,
    path: PathBuf,
}

impl SourceIndex {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(VaultError::SourceUnavailable {
                path: path.to_path_buf(),
                reason: "does not exist".to_string(),
            });
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| VaultError::SourceUnavailable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// All values of `column` in `table`, in query order.
    ///
    /// NULL reads as an empty path. Numbers are rendered as text and will not
    /// pass validation. Values that are not UTF-8 come back flagged `lossy`.
    pub fn paths(&self, table: &str, column: &str) -> Result<Vec<SourceRecord>> {
        let query_err = |source| VaultError::QueryFailure {
            table: table.to_string(),
            source,
        };
        let sql = format!("SELECT {} FROM {}", quote_ident(column), quote_ident(table));
        let mut stmt = self.conn.prepare(&sql).map_err(query_err)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(match row.get_ref(0)? {
                    ValueRef::Null => SourceRecord::new(""),
                    ValueRef::Text(t) | ValueRef::Blob(t) => match std::str::from_utf8(t) {
                        Ok(s) => SourceRecord::new(s),
                        Err(_) => SourceRecord {
                            path: String::from_utf8_lossy(t).into_owned(),
                            lossy: true,
                        },
                    },
                    ValueRef::Integer(i) => SourceRecord::new(i.to_string()),
                    ValueRef::Real(r) => SourceRecord::new(r.to_string()),
                })
            })
            .map_err(query_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(query_err)?;
        debug!(source = %self.path.display(), table, column, rows = rows.len(), "extracted paths");
        Ok(rows)
    }
}
