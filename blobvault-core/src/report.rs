use crate::error::{ItemError, Stage};
use crate::validate::SkipReason;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{error, info, warn};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipCounts {
    pub empty: u64,
    pub not_absolute: u64,
    pub not_found: u64,
    pub not_utf8: u64,
}

impl SkipCounts {
    pub fn total(&self) -> u64 {
        self.empty + self.not_absolute + self.not_found + self.not_utf8
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureCounts {
    pub read: u64,
    pub compress: u64,
    pub write: u64,
    pub commit: u64,
}

impl FailureCounts {
    pub fn total(&self) -> u64 {
        self.read + self.compress + self.write + self.commit
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: u64,
    pub succeeded: u64,
    pub skipped: SkipCounts,
    pub failed: FailureCounts,
    /// Source bytes read for committed items.
    pub logical_bytes: u64,
    /// Payload bytes committed to the backup store.
    pub stored_bytes: u64,
}

impl RunSummary {
    pub fn processed(&self) -> u64 {
        self.succeeded + self.skipped.total() + self.failed.total()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} processed: {} succeeded, {} skipped, {} failed ({} bytes read, {} bytes stored)",
            self.processed(),
            self.total,
            self.succeeded,
            self.skipped.total(),
            self.failed.total(),
            self.logical_bytes,
            self.stored_bytes,
        )
    }
}

/// Terminal state of one candidate path.
#[derive(Debug)]
pub enum Outcome {
    Skipped(SkipReason),
    Failed(ItemError),
    Succeeded { logical_len: u64, stored_len: u64 },
}

/// Logs per-item progress and tallies outcomes into a `RunSummary`.
pub struct Reporter {
    seen: u64,
    summary: RunSummary,
}

impl Reporter {
    pub fn new(total: usize) -> Self {
        info!("Found {total} paths to back up");
        Self {
            seen: 0,
            summary: RunSummary {
                total: total as u64,
                ..Default::default()
            },
        }
    }

    pub fn begin_item(&mut self, path: &str) {
        self.seen += 1;
        info!("Processing {}/{}: {}", self.seen, self.summary.total, path);
    }

    pub fn record(&mut self, path: &str, outcome: &Outcome) {
        let s = &mut self.summary;
        match outcome {
            Outcome::Skipped(reason) => {
                match reason {
                    SkipReason::Empty => s.skipped.empty += 1,
                    SkipReason::NotAbsolute => s.skipped.not_absolute += 1,
                    SkipReason::NotFound => s.skipped.not_found += 1,
                    SkipReason::NotUtf8 => s.skipped.not_utf8 += 1,
                }
                warn!(path, "{reason}, skipping");
            }
            Outcome::Failed(err) => {
                let stage = err.stage();
                match stage {
                    Stage::Read => s.failed.read += 1,
                    Stage::Compress => s.failed.compress += 1,
                    Stage::Write => s.failed.write += 1,
                    Stage::Commit => s.failed.commit += 1,
                }
                error!(path, %stage, "{err}, skipping");
            }
            Outcome::Succeeded {
                logical_len,
                stored_len,
            } => {
                s.succeeded += 1;
                s.logical_bytes += logical_len;
                s.stored_bytes += stored_len;
                info!(path, logical = logical_len, stored = stored_len, "archived");
            }
        }
    }

    pub fn finish(self) -> RunSummary {
        info!("Backup completed: {}", self.summary);
        self.summary
    }
}
