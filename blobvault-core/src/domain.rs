// blobvault_core/src/domain.rs

/// One row of the source index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceRecord {
    pub path: String,
    /// The stored value was not valid UTF-8; `path` is a lossy rendering
    /// for display and must not be used as a key.
    pub lossy: bool,
}

impl SourceRecord {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            lossy: false,
        }
    }
}

/// One archived entry as seen when listing the backup store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlobRow {
    pub path: String,
    pub stored_len: u64,
}
