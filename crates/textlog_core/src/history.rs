//! Versioned history over a single text buffer.

use crate::action::{Action, DeleteAction, InsertAction, ReplaceAction};
use crate::config::HistoryConfig;
use crate::constants::INITIAL_VERSION;
use crate::error::HistoryError;
use crate::merge::merge_actions;

/// Text buffer plus the append-only log of edits that produced it.
///
/// Each successful edit appends one [`Action`], applies it to the buffer and
/// bumps the version by one. Failed edits leave all three untouched.
#[derive(Debug, Clone, Default)]
pub struct History {
    text: String,
    text_chars: usize,
    version: u64,
    actions: Vec<Action>,
    config: HistoryConfig,
}

impl History {
    /// Create an empty history at version 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty history with explicit behaviour switches.
    pub fn with_config(config: HistoryConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Current buffer content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current version; 0 for an empty history.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn config(&self) -> HistoryConfig {
        self.config
    }

    /// Insert `text` at `pos` (end of buffer when `None`).
    ///
    /// # Returns
    /// The new version.
    ///
    /// # Errors
    /// [`HistoryError::InvalidPosition`] when `pos` is past the end.
    pub fn insert(&mut self, text: &str, pos: Option<usize>) -> Result<u64, HistoryError> {
        let pos = self.check_position(pos)?;
        let next = self.next_version()?;
        let action = InsertAction::new(pos, text, self.version, next);
        Ok(self.commit(action.into()))
    }

    /// Overwrite the buffer from `pos` (end of buffer when `None`) with
    /// `text`, extending it when the tail is shorter than `text`.
    ///
    /// # Returns
    /// The new version.
    ///
    /// # Errors
    /// [`HistoryError::InvalidPosition`] when `pos` is past the end.
    pub fn replace(&mut self, text: &str, pos: Option<usize>) -> Result<u64, HistoryError> {
        let pos = self.check_position(pos)?;
        let next = self.next_version()?;
        let action = ReplaceAction::new(pos, text, self.version, next);
        Ok(self.commit(action.into()))
    }

    /// Remove `length` characters starting at `pos`.
    ///
    /// # Returns
    /// The new version.
    ///
    /// # Errors
    /// - [`HistoryError::InvalidPosition`] when `pos` is past the end.
    /// - [`HistoryError::InsufficientTail`] when fewer than `length`
    ///   characters follow `pos`.
    pub fn delete(&mut self, pos: usize, length: usize) -> Result<u64, HistoryError> {
        let pos = self.check_position(Some(pos))?;
        let available = self.text_chars - pos;
        if available < length {
            return Err(HistoryError::InsufficientTail {
                pos,
                length,
                available,
            });
        }
        let next = self.next_version()?;
        let action = DeleteAction::new(pos, length, self.version, next);
        Ok(self.commit(action.into()))
    }

    /// Record a pre-built action without position validation.
    ///
    /// Only versions are checked. The history version becomes the action's
    /// `to_version`, which may skip ahead but never rewind.
    ///
    /// # Errors
    /// [`HistoryError::InvalidVersionRange`] when the action's
    /// `from_version` is not below its `to_version`, or when its
    /// `to_version` does not move past the current version.
    pub fn apply_raw_action(&mut self, action: Action) -> Result<u64, HistoryError> {
        let checked = action.version_check().and_then(|()| {
            if action.to_version() > self.version {
                Ok(())
            } else {
                Err(HistoryError::InvalidVersionRange {
                    from_version: self.version,
                    to_version: action.to_version(),
                })
            }
        });
        if let Err(err) = checked {
            tracing::warn!("Rejected raw action {}: {}", action, err);
            return Err(err);
        }
        tracing::warn!(
            "Recording raw action {} at version {}",
            action,
            self.version
        );
        Ok(self.commit(action))
    }

    /// Recorded actions whose `from_version` lies in
    /// `[from_version, to_version)`, merged when the history is configured
    /// to merge.
    ///
    /// `from_version` defaults to 0 and `to_version` to the current version.
    /// A `to_version` of 0 always yields an empty slice.
    ///
    /// # Errors
    /// [`HistoryError::InvalidRange`] when `from_version > to_version` or
    /// `to_version` exceeds the current version.
    pub fn get_actions(
        &self,
        from_version: Option<u64>,
        to_version: Option<u64>,
    ) -> Result<Vec<Action>, HistoryError> {
        let slice = self.get_actions_unmerged(from_version, to_version)?;
        if self.config.merge_actions {
            Ok(merge_actions(slice))
        } else {
            Ok(slice)
        }
    }

    /// Same selection as [`History::get_actions`], never merged.
    ///
    /// # Errors
    /// [`HistoryError::InvalidRange`] on malformed bounds.
    pub fn get_actions_unmerged(
        &self,
        from_version: Option<u64>,
        to_version: Option<u64>,
    ) -> Result<Vec<Action>, HistoryError> {
        let from_version = from_version.unwrap_or(INITIAL_VERSION);
        let to_version = to_version.unwrap_or(self.version);
        if from_version > to_version || to_version > self.version {
            return Err(HistoryError::InvalidRange {
                from_version,
                to_version,
                current: self.version,
            });
        }
        if to_version == 0 {
            return Ok(Vec::new());
        }
        Ok(self
            .actions
            .iter()
            .filter(|action| (from_version..to_version).contains(&action.from_version()))
            .cloned()
            .collect())
    }

    /// Validate `pos` against the current buffer, defaulting to its end.
    fn check_position(&self, pos: Option<usize>) -> Result<usize, HistoryError> {
        let len = self.text_chars;
        match pos {
            None => Ok(len),
            Some(pos) if pos <= len => Ok(pos),
            Some(pos) => Err(HistoryError::InvalidPosition { pos, len }),
        }
    }

    /// Version the next validated edit will move to.
    fn next_version(&self) -> Result<u64, HistoryError> {
        self.version
            .checked_add(1)
            .ok_or(HistoryError::InvalidVersionRange {
                from_version: self.version,
                to_version: self.version,
            })
    }

    /// Append, apply and advance. Callers have already validated `action`.
    fn commit(&mut self, action: Action) -> u64 {
        self.text = action.apply(&self.text);
        self.text_chars = self.text.chars().count();
        self.version = action.to_version();
        tracing::debug!("Committed {} -> version {}", action, self.version);
        self.actions.push(action);
        self.version
    }
}

#[cfg(test)]
mod tests;
