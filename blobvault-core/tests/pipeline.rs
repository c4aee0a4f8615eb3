use blobvault_core::error::VaultError;
use blobvault_core::{ArchiveOptions, Codec, Level, archive};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Fixture {
    dir: TempDir,
    source: PathBuf,
    backup: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("job_index.sqlite");
        let backup = dir.path().join("backup.sqlite");
        Connection::open(&source)
            .unwrap()
            .execute_batch("CREATE TABLE jobs (id INTEGER PRIMARY KEY, tradingStatusPath TEXT)")
            .unwrap();
        Self {
            dir,
            source,
            backup,
        }
    }

    fn file(&self, name: &str, data: &[u8]) -> String {
        let p = self.dir.path().join("data").join(name);
        std::fs::create_dir_all(p.parent().unwrap()).unwrap();
        std::fs::write(&p, data).unwrap();
        p.to_str().unwrap().to_string()
    }

    fn abs(&self, name: &str) -> String {
        self.dir.path().join("data").join(name).to_str().unwrap().to_string()
    }

    fn reference(&self, paths: &[&str]) {
        let conn = Connection::open(&self.source).unwrap();
        for p in paths {
            conn.execute("INSERT INTO jobs (tradingStatusPath) VALUES (?1)", [p])
                .unwrap();
        }
    }

    fn run(&self, codec: Codec) -> blobvault_core::RunSummary {
        let opts = ArchiveOptions {
            codec,
            ..Default::default()
        };
        archive(&self.source, &self.backup, "jobs", Some(&opts)).unwrap()
    }
}

fn backup_rows(path: &Path) -> Vec<(String, Vec<u8>)> {
    let conn = Connection::open(path).unwrap();
    let mut stmt = conn
        .prepare("SELECT tradingStatusPath, data FROM backup ORDER BY tradingStatusPath")
        .unwrap();
    stmt.query_map([], |r| Ok((r.get(0)?, r.get(1)?)))
        .unwrap()
        .collect::<rusqlite::Result<Vec<_>>>()
        .unwrap()
}

#[test]
fn mixed_candidates_scenario() {
    let fx = Fixture::new();
    let a = fx.file("a.csv", b"0123456789");
    let missing = fx.abs("missing.csv");
    fx.reference(&[&a, &missing, "", "relative.csv"]);

    let summary = fx.run(Codec::Store);

    assert_eq!(summary.total, 4);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.skipped.total(), 3);
    assert_eq!(summary.skipped.empty, 1);
    assert_eq!(summary.skipped.not_absolute, 1);
    assert_eq!(summary.skipped.not_found, 1);
    assert_eq!(summary.failed.total(), 0);
    assert_eq!(backup_rows(&fx.backup), vec![(a, b"0123456789".to_vec())]);
}

#[test]
fn compressed_payload_round_trips() {
    let fx = Fixture::new();
    let data: Vec<u8> = b"timestamp,status\n".repeat(20_000);
    let p = fx.file("status.csv", &data);
    fx.reference(&[&p]);

    let summary = fx.run(Codec::Zstd(Level::new(19).unwrap()));
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.logical_bytes, data.len() as u64);

    let rows = backup_rows(&fx.backup);
    assert_eq!(rows.len(), 1);
    assert!(rows[0].1.len() < data.len());
    assert_eq!(summary.stored_bytes, rows[0].1.len() as u64);
    assert_eq!(zstd::decode_all(&rows[0].1[..]).unwrap(), data);
}

#[test]
fn rerun_is_idempotent() {
    let fx = Fixture::new();
    let a = fx.file("a.csv", b"alpha");
    let b = fx.file("b.csv", &[7u8; 100_000]);
    fx.reference(&[&a, &b]);

    fx.run(Codec::default());
    let first = backup_rows(&fx.backup);
    fx.run(Codec::default());
    let second = backup_rows(&fx.backup);

    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
}

#[test]
fn duplicate_references_leave_one_row() {
    let fx = Fixture::new();
    let a = fx.file("a.csv", b"v1");
    fx.reference(&[&a, &a]);
    let summary = fx.run(Codec::Store);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(backup_rows(&fx.backup).len(), 1);

    // content changed on disk, next run overwrites the single row
    std::fs::write(&a, b"v2").unwrap();
    fx.run(Codec::Store);
    assert_eq!(backup_rows(&fx.backup), vec![(a, b"v2".to_vec())]);
}

#[test]
fn unreadable_item_does_not_affect_others() {
    let fx = Fixture::new();
    let a = fx.file("a.csv", b"aaa");
    let dir_path = fx.abs("subdir");
    std::fs::create_dir_all(&dir_path).unwrap();
    let c = fx.file("c.csv", b"ccc");
    fx.reference(&[&a, &dir_path, &c]);

    let summary = fx.run(Codec::default());
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed.read, 1);
    assert_eq!(summary.failed.total(), 1);
    let keys: Vec<String> = backup_rows(&fx.backup).into_iter().map(|r| r.0).collect();
    assert_eq!(keys, vec![a, c]);
}

#[test]
fn blobs_for_paths_no_longer_referenced_are_kept() {
    let fx = Fixture::new();
    let a = fx.file("a.csv", b"a");
    fx.reference(&[&a]);
    fx.run(Codec::Store);

    Connection::open(&fx.source)
        .unwrap()
        .execute("DELETE FROM jobs", [])
        .unwrap();
    let summary = fx.run(Codec::Store);
    assert_eq!(summary.total, 0);
    assert_eq!(backup_rows(&fx.backup).len(), 1);
}

#[test]
fn missing_source_is_fatal_and_creates_nothing() {
    let fx = Fixture::new();
    let err = archive(
        &fx.dir.path().join("nope.sqlite"),
        &fx.backup,
        "jobs",
        None,
    )
    .unwrap_err();
    assert!(matches!(err, VaultError::SourceUnavailable { .. }));
    assert!(!fx.backup.exists());
}

#[test]
fn bad_table_is_fatal() {
    let fx = Fixture::new();
    let err = archive(&fx.source, &fx.backup, "nojobs", None).unwrap_err();
    assert!(matches!(err, VaultError::QueryFailure { .. }));
}

#[test]
fn path_column_named_data_is_archived() {
    let fx = Fixture::new();
    let a = fx.file("a.csv", b"payload");
    let conn = Connection::open(&fx.source).unwrap();
    conn.execute_batch("CREATE TABLE refs (data TEXT)").unwrap();
    conn.execute("INSERT INTO refs VALUES (?1)", [&a]).unwrap();

    let opts = ArchiveOptions {
        column: "data".to_string(),
        codec: Codec::Store,
        ..Default::default()
    };
    let summary = archive(&fx.source, &fx.backup, "refs", Some(&opts)).unwrap();
    assert_eq!(summary.succeeded, 1);

    let (key, blob): (String, Vec<u8>) = Connection::open(&fx.backup)
        .unwrap()
        .query_row("SELECT data, data_blob FROM backup", [], |r| {
            Ok((r.get(0)?, r.get(1)?))
        })
        .unwrap();
    assert_eq!(key, a);
    assert_eq!(blob, b"payload");
}

#[test]
fn garbage_backup_file_is_a_schema_failure() {
    let fx = Fixture::new();
    let a = fx.file("a.csv", b"a");
    fx.reference(&[&a]);
    std::fs::write(&fx.backup, "not a database\n".repeat(512)).unwrap();

    let err = archive(&fx.source, &fx.backup, "jobs", None).unwrap_err();
    assert!(matches!(err, VaultError::Schema { .. }));
}

#[test]
fn non_utf8_reference_is_skipped_by_name() {
    let fx = Fixture::new();
    let a = fx.file("a.csv", b"a");
    // the lossy rendering of the bad reference exists on disk
    let lossy = fx.file("b\u{FFFD}.csv", b"b");
    fx.reference(&[&a]);
    let mut raw = lossy.replace('\u{FFFD}', "").into_bytes();
    let at = raw.len() - ".csv".len();
    raw.insert(at, 0xFF);
    Connection::open(&fx.source)
        .unwrap()
        .execute(
            "INSERT INTO jobs (tradingStatusPath) VALUES (CAST(?1 AS TEXT))",
            [raw],
        )
        .unwrap();

    let summary = fx.run(Codec::Store);
    assert_eq!(summary.total, 2);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.skipped.not_utf8, 1);
    let keys: Vec<String> = backup_rows(&fx.backup).into_iter().map(|r| r.0).collect();
    assert_eq!(keys, vec![a]);
}
