#![forbid(unsafe_code)]

pub mod error;

pub mod util {
    pub mod ident;
}

pub mod codec;
pub mod domain;

pub mod backup;
pub mod list;
pub mod pipeline;
pub mod report;
pub mod source;
pub mod transcode;
pub mod validate;

// Re-exports: stable API surface
pub use backup::{BackupLayout, BackupStore, BlobSink};
pub use codec::{Codec, Level};
pub use list::list;
pub use pipeline::{ArchiveOptions, archive};
pub use report::RunSummary;
