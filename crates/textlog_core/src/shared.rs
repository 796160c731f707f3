//! Lock-guarded history shared between threads.
//!
//! Edits take the write lock so that the log append, buffer update and
//! version bump land as one unit. Queries take the read lock and see a
//! consistent `(log, version)` snapshot.

use crate::action::Action;
use crate::config::HistoryConfig;
use crate::error::HistoryError;
use crate::history::History;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Cloneable handle to one [`History`] behind a reader/writer lock.
#[derive(Debug, Clone, Default)]
pub struct SharedHistory {
    inner: Arc<RwLock<History>>,
}

impl SharedHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: HistoryConfig) -> Self {
        Self::from(History::with_config(config))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, History>, HistoryError> {
        self.inner.read().map_err(|_| {
            tracing::error!("History lock poisoned on read");
            HistoryError::Poisoned
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, History>, HistoryError> {
        self.inner.write().map_err(|_| {
            tracing::error!("History lock poisoned on write");
            HistoryError::Poisoned
        })
    }

    /// Snapshot of the current buffer.
    pub fn text(&self) -> Result<String, HistoryError> {
        Ok(self.read()?.text().to_string())
    }

    pub fn version(&self) -> Result<u64, HistoryError> {
        Ok(self.read()?.version())
    }

    /// See [`History::insert`].
    pub fn insert(&self, text: &str, pos: Option<usize>) -> Result<u64, HistoryError> {
        self.write()?.insert(text, pos)
    }

    /// See [`History::replace`].
    pub fn replace(&self, text: &str, pos: Option<usize>) -> Result<u64, HistoryError> {
        self.write()?.replace(text, pos)
    }

    /// See [`History::delete`].
    pub fn delete(&self, pos: usize, length: usize) -> Result<u64, HistoryError> {
        self.write()?.delete(pos, length)
    }

    /// See [`History::apply_raw_action`].
    pub fn apply_raw_action(&self, action: Action) -> Result<u64, HistoryError> {
        self.write()?.apply_raw_action(action)
    }

    /// See [`History::get_actions`].
    pub fn get_actions(
        &self,
        from_version: Option<u64>,
        to_version: Option<u64>,
    ) -> Result<Vec<Action>, HistoryError> {
        self.read()?.get_actions(from_version, to_version)
    }

    /// Run `f` against a consistent snapshot of the history.
    pub fn with_history<T>(&self, f: impl FnOnce(&History) -> T) -> Result<T, HistoryError> {
        Ok(f(&*self.read()?))
    }
}

impl From<History> for SharedHistory {
    fn from(history: History) -> Self {
        Self {
            inner: Arc::new(RwLock::new(history)),
        }
    }
}
