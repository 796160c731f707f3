//! Core library for textlog: a versioned log of edits over one text buffer.

/// Edit records and how they apply to a buffer.
pub mod action;
/// Configuration loading and defaults.
pub mod config;
/// Shared constants.
pub mod constants;
/// Error types for edits and history queries.
pub mod error;
/// The versioned history container.
pub mod history;
/// Query-time coalescing of adjacent actions.
pub mod merge;
/// Lock-guarded history for multi-threaded callers.
pub mod shared;

pub use action::{replay, Action, DeleteAction, InsertAction, ReplaceAction};
pub use config::{Config, HistoryConfig};
pub use error::HistoryError;
pub use history::History;
pub use merge::merge_actions;
pub use shared::SharedHistory;
