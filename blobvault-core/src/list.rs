use crate::backup::BackupLayout;
use crate::domain::BlobRow;
use crate::error::{Result, VaultError};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

/// Keys and stored sizes in the backup store, sorted by key. Read-only.
pub fn list(backup_db: &Path, layout: &BackupLayout) -> Result<Vec<BlobRow>> {
    let conn = Connection::open_with_flags(backup_db, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(
        |source| VaultError::BackupUnavailable {
            path: backup_db.to_path_buf(),
            source,
        },
    )?;
    let query_err = |source| VaultError::QueryFailure {
        table: layout.table.clone(),
        source,
    };
    let mut stmt = conn.prepare(&layout.list_sql()).map_err(query_err)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(BlobRow {
                path: row.get(0)?,
                stored_len: row.get::<_, Option<i64>>(1)?.unwrap_or(0) as u64,
            })
        })
        .map_err(query_err)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(query_err)?;
    Ok(rows)
}
