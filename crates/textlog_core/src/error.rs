//! Error types for history edits and queries.
use thiserror::Error;

/// Failure raised by a [`crate::History`] operation.
///
/// Every failing call leaves the history untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("Invalid position {pos}: buffer length is {len}")]
    InvalidPosition { pos: usize, len: usize },

    #[error("Cannot delete {length} characters at {pos}: only {available} remain")]
    InsufficientTail {
        pos: usize,
        length: usize,
        available: usize,
    },

    #[error("Invalid version range {from_version}..{to_version} (current version {current})")]
    InvalidRange {
        from_version: u64,
        to_version: u64,
        current: u64,
    },

    #[error("Action version range {from_version}..{to_version} is not increasing")]
    InvalidVersionRange { from_version: u64, to_version: u64 },

    #[error("History lock is poisoned")]
    Poisoned,
}
