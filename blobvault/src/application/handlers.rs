use std::path::PathBuf;

use blobvault_core::error::Result;
use blobvault_core::{ArchiveOptions, BackupLayout, Codec, Level, archive, list};

fn codec_from_args(compression_level: Option<i32>, store: bool) -> Result<Codec> {
    if store {
        return Ok(Codec::Store);
    }
    let level = compression_level
        .map(Level::new)
        .transpose()?
        .unwrap_or_default();
    Ok(Codec::Zstd(level))
}

#[allow(clippy::too_many_arguments)]
pub fn handle_archive(
    source_db: PathBuf,
    backup_db: PathBuf,
    source_table: String,
    compression_level: Option<i32>,
    column: String,
    backup_table: String,
    store: bool,
    json: bool,
) -> Result<()> {
    // Reject bad levels before either database is touched.
    let codec = codec_from_args(compression_level, store)?;
    let opts = ArchiveOptions {
        column,
        backup_table,
        codec,
    };
    let summary = archive(&source_db, &backup_db, &source_table, Some(&opts))?;
    if json {
        let out = serde_json::to_string_pretty(&summary).map_err(std::io::Error::from)?;
        println!("{out}");
    }
    Ok(())
}

pub fn handle_list(backup_db: PathBuf, backup_table: String, column: String) -> Result<()> {
    let layout = BackupLayout::new(backup_table, column);
    for row in list(&backup_db, &layout)? {
        println!("{}  {} bytes", row.path, row.stored_len);
    }
    Ok(())
}
