//! Configuration loading from environment variables.

use crate::constants::{JSON_OUTPUT_ENV, MERGE_ACTIONS_ENV};
use serde::Deserialize;
use std::env;

/// Behaviour switches for a single [`crate::History`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HistoryConfig {
    /// Coalesce adjacent compatible actions in `get_actions` results.
    pub merge_actions: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            merge_actions: true,
        }
    }
}

/// Runtime configuration for the textlog CLI.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub history: HistoryConfig,
    pub json_output: bool,
}

/// Interpret a switch value such as `TEXTLOG_MERGE_ACTIONS=off`.
///
/// `1`/`true`/`yes`/`on` enable, `0`/`false`/`no`/`off` and blank disable,
/// in any case and with surrounding whitespace ignored. Anything else is
/// `None` so the caller can fall back to its default.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a boolean flag from the environment, falling back to `default`
/// when the variable is missing or unrecognized.
pub fn env_flag_or(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(value) => parse_env_flag(&value).unwrap_or_else(|| {
            tracing::warn!("Ignoring unrecognized value {:?} for {}", value, name);
            default
        }),
        Err(_) => default,
    }
}

/// Read a boolean flag from the environment.
///
/// Missing or unrecognized values are treated as `false`.
pub fn env_flag_enabled(name: &str) -> bool {
    env_flag_or(name, false)
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        Self {
            history: HistoryConfig {
                merge_actions: env_flag_or(MERGE_ACTIONS_ENV, true),
            },
            json_output: env_flag_enabled(JSON_OUTPUT_ENV),
        }
    }
}
