use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Run-level failures. Any of these aborts the whole run.
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("source database '{}' is unavailable: {reason}", path.display())]
    SourceUnavailable { path: PathBuf, reason: String },

    #[error("query on source table '{table}' failed: {source}")]
    QueryFailure {
        table: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("backup database '{}' is unavailable: {source}", path.display())]
    BackupUnavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("creating backup table '{table}' failed: {source}")]
    Schema {
        table: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("compression level {0} is outside 1..=22")]
    InvalidLevel(i32),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, VaultError>;

/// Pipeline stage at which a single item failed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Read,
    Compress,
    Write,
    Commit,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Read => "read",
            Stage::Compress => "compress",
            Stage::Write => "write",
            Stage::Commit => "commit",
        })
    }
}

/// Per-item failures. The item is dropped and the run continues.
#[derive(Error, Debug)]
pub enum ItemError {
    #[error("failed to read file: {0}")]
    Read(#[source] std::io::Error),

    #[error("compression failed: {0}")]
    Compression(#[source] std::io::Error),

    #[error("failed to insert data: {0}")]
    Write(#[source] rusqlite::Error),

    #[error("failed to commit data: {0}")]
    Commit(#[source] rusqlite::Error),
}

impl ItemError {
    pub fn stage(&self) -> Stage {
        match self {
            ItemError::Read(_) => Stage::Read,
            ItemError::Compression(_) => Stage::Compress,
            ItemError::Write(_) => Stage::Write,
            ItemError::Commit(_) => Stage::Commit,
        }
    }
}
