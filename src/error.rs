//! Error type shared by every stage of the report pipeline.
//!
//! All variants are fatal to the current invocation: nothing is retried and
//! no partial report is produced.

use thiserror::Error;

/// Convenience alias used throughout the library.
pub type Result<T, E = DuError> = std::result::Result<T, E>;

/// Errors produced while collecting, parsing, or rendering disk usage.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DuError {
    /// The target is not an existing directory, or an option is out of range.
    #[error("{0}")]
    InvalidInput(String),

    /// A collector line did not have the `size<TAB>path` shape.
    #[error("Malformed entry {line:?}: {reason}")]
    MalformedEntry { line: String, reason: String },

    /// A computed percentage fell outside `[0, 100]`.
    #[error("Percent must be between 0 and 100, got {0}")]
    PercentRange(f64),

    /// The external size utility could not be run or exited unsuccessfully.
    #[error("Size collector failed: {0}")]
    Collector(String),
}

impl DuError {
    pub(crate) fn malformed(line: &str, reason: impl Into<String>) -> Self {
        Self::MalformedEntry {
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}
