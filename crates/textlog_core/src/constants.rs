//! Shared constants used across textlog crates.

/// Version of an empty history.
pub const INITIAL_VERSION: u64 = 0;

/// Env var toggling query-time merging of adjacent actions.
pub const MERGE_ACTIONS_ENV: &str = "TEXTLOG_MERGE_ACTIONS";

/// Env var selecting JSON output in the CLI.
pub const JSON_OUTPUT_ENV: &str = "TEXTLOG_JSON";

/// Default tracing filter for the CLI when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "textlog=info,textlog_core=info";
