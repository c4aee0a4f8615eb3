use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Without a subcommand the positional arguments describe one archive run:
/// `blobvault <source_db> <backup_db> <source_table> [compression_level]`.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "blobvault: archive files referenced by an SQLite index",
    long_about = None,
    args_conflicts_with_subcommands = true,
    subcommand_negates_reqs = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub archive: ArchiveArgs,
}

#[derive(Args)]
pub struct ArchiveArgs {
    /// existing SQLite index holding the file paths
    #[arg(required = true)]
    pub source_db: Option<PathBuf>,
    /// backup SQLite database (created if absent)
    #[arg(required = true)]
    pub backup_db: Option<PathBuf>,
    /// table in the source database to read paths from; taken as one quoted
    /// identifier, so schema-qualified names such as main.jobs are not supported
    #[arg(required = true)]
    pub source_table: Option<String>,
    /// zstd level, 1-22 (default 3)
    #[arg(allow_negative_numbers = true)]
    pub compression_level: Option<i32>,

    /// column holding the path; also names the key column of the backup table
    #[arg(long, default_value = "tradingStatusPath")]
    pub column: String,

    #[arg(long, default_value = "backup")]
    pub backup_table: String,

    /// store raw file bytes without compression
    #[arg(long, conflicts_with = "compression_level")]
    pub store: bool,

    /// print the run summary as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List archived paths with their stored sizes
    List {
        backup_db: PathBuf,

        #[arg(long, default_value = "backup")]
        backup_table: String,

        #[arg(long, default_value = "tradingStatusPath")]
        column: String,
    },
}
