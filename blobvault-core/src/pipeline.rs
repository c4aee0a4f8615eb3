use crate::backup::{BackupLayout, BackupStore, BlobSink};
use crate::codec::{Codec, Compressor};
use crate::domain::SourceRecord;
use crate::error::Result;
use crate::report::{Outcome, Reporter, RunSummary};
use crate::source::SourceIndex;
use crate::transcode::transcode_file;
use crate::validate::{SkipReason, Validation, classify};
use std::path::Path;
use tracing::info;

#[derive(Clone, Debug)]
pub struct ArchiveOptions {
    /// Column of the source table holding the file path. Also names the key
    /// column of the backup table.
    pub column: String,
    pub backup_table: String,
    pub codec: Codec,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        let layout = BackupLayout::default();
        Self {
            column: layout.key_column,
            backup_table: layout.table,
            codec: Codec::default(),
        }
    }
}

impl ArchiveOptions {
    pub fn layout(&self) -> BackupLayout {
        BackupLayout::new(self.backup_table.clone(), self.column.clone())
    }
}

/// Archive every file referenced by `table` in `source_db` into `backup_db`.
///
/// Returns `Err` only for run-level failures. Per-item problems are counted
/// in the returned summary.
pub fn archive(
    source_db: &Path,
    backup_db: &Path,
    table: &str,
    opts: Option<&ArchiveOptions>,
) -> Result<RunSummary> {
    let opts = opts.cloned().unwrap_or_default();
    info!(
        source = %source_db.display(),
        backup = %backup_db.display(),
        table,
        column = %opts.column,
        codec = %opts.codec,
        "starting backup"
    );

    // The source handle lives only for the extraction.
    let records = SourceIndex::open(source_db)?.paths(table, &opts.column)?;

    let mut store = BackupStore::open(backup_db, &opts.layout())?;
    let compressor = opts.codec.compressor();
    Ok(run_items(&records, &mut store, compressor.as_ref()))
}

/// Process `records` in order, one independent unit of work each.
pub fn run_items(
    records: &[SourceRecord],
    sink: &mut dyn BlobSink,
    compressor: &dyn Compressor,
) -> RunSummary {
    let mut reporter = Reporter::new(records.len());
    for rec in records {
        reporter.begin_item(&rec.path);
        let outcome = process_one(rec, sink, compressor);
        reporter.record(&rec.path, &outcome);
    }
    reporter.finish()
}

fn process_one(
    rec: &SourceRecord,
    sink: &mut dyn BlobSink,
    compressor: &dyn Compressor,
) -> Outcome {
    if rec.lossy {
        return Outcome::Skipped(SkipReason::NotUtf8);
    }
    let path = rec.path.as_str();
    if let Validation::Skip(reason) = classify(path) {
        return Outcome::Skipped(reason);
    }
    let payload = match transcode_file(Path::new(path), compressor) {
        Ok(p) => p,
        Err(e) => return Outcome::Failed(e),
    };
    match sink.upsert(path, &payload.bytes) {
        Ok(()) => Outcome::Succeeded {
            logical_len: payload.logical_len,
            stored_len: payload.bytes.len() as u64,
        },
        Err(e) => Outcome::Failed(e),
    }
}
