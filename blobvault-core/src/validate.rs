use std::fmt;
use std::path::Path;

/// Why a candidate path was not archived.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SkipReason {
    Empty,
    NotAbsolute,
    NotFound,
    /// The index holds bytes that do not decode as UTF-8.
    NotUtf8,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SkipReason::Empty => "empty path",
            SkipReason::NotAbsolute => "path is not absolute",
            SkipReason::NotFound => "file does not exist",
            SkipReason::NotUtf8 => "path is not valid UTF-8",
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Validation {
    Skip(SkipReason),
    Valid,
}

/// Classify a raw path from the source index.
///
/// Checks run in order: empty, absolute, exists. The result reflects the file
/// system at call time only; the file may disappear before it is read.
pub fn classify(raw: &str) -> Validation {
    if raw.is_empty() {
        return Validation::Skip(SkipReason::Empty);
    }
    let p = Path::new(raw);
    if !p.is_absolute() {
        return Validation::Skip(SkipReason::NotAbsolute);
    }
    if !p.exists() {
        return Validation::Skip(SkipReason::NotFound);
    }
    Validation::Valid
}
