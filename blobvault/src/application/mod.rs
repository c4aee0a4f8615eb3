pub mod handlers;

use crate::presentation::cli::{ArchiveArgs, Cli, Commands};
use blobvault_core::error::Result;

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::List {
            backup_db,
            backup_table,
            column,
        }) => handlers::handle_list(backup_db, backup_table, column),
        None => {
            let ArchiveArgs {
                source_db,
                backup_db,
                source_table,
                compression_level,
                column,
                backup_table,
                store,
                json,
            } = cli.archive;
            // clap enforces the positionals whenever no subcommand is given
            let (Some(source_db), Some(backup_db), Some(source_table)) =
                (source_db, backup_db, source_table)
            else {
                unreachable!("archive positionals are required without a subcommand");
            };
            handlers::handle_archive(
                source_db,
                backup_db,
                source_table,
                compression_level,
                column,
                backup_table,
                store,
                json,
            )
        }
    }
}
