//! Edit records and their buffer semantics.
//!
//! Positions are character offsets. Out-of-range offsets clamp to the end of
//! the buffer, so applying an action never panics even when it was built by
//! hand and never passed through position validation.

use crate::error::HistoryError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Behaviour shared by every action variant.
pub trait Edit: Sized {
    /// Apply this edit to `buffer`, returning the new buffer content.
    fn apply(&self, buffer: &str) -> String;

    /// Fold `next` into `self` when the two describe one contiguous edit.
    ///
    /// # Returns
    /// The combined action, or `None` when the pair must stay separate.
    fn merge_with(&self, next: &Self) -> Option<Self>;
}

/// Byte offset of character `char_idx`, clamped to the end of `text`.
fn byte_offset(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(idx, _)| idx)
}

/// Insert `text` at `pos`, shifting the remainder right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertAction {
    pos: usize,
    text: String,
    from_version: u64,
    to_version: u64,
}

impl InsertAction {
    pub fn new(pos: usize, text: impl Into<String>, from_version: u64, to_version: u64) -> Self {
        Self {
            pos,
            text: text.into(),
            from_version,
            to_version,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Edit for InsertAction {
    fn apply(&self, buffer: &str) -> String {
        let at = byte_offset(buffer, self.pos);
        let mut out = String::with_capacity(buffer.len() + self.text.len());
        out.push_str(&buffer[..at]);
        out.push_str(&self.text);
        out.push_str(&buffer[at..]);
        out
    }

    fn merge_with(&self, next: &Self) -> Option<Self> {
        let text = if next.pos == self.pos {
            // The later insert landed in front of ours.
            format!("{}{}", next.text, self.text)
        } else if next.pos == self.pos.saturating_add(self.text.chars().count()) {
            format!("{}{}", self.text, next.text)
        } else {
            return None;
        };
        Some(Self {
            pos: self.pos,
            text,
            from_version: self.from_version,
            to_version: next.to_version,
        })
    }
}

/// Overwrite `text.len()` characters starting at `pos`, growing the buffer
/// when the tail is shorter than `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceAction {
    pos: usize,
    text: String,
    from_version: u64,
    to_version: u64,
}

impl ReplaceAction {
    pub fn new(pos: usize, text: impl Into<String>, from_version: u64, to_version: u64) -> Self {
        Self {
            pos,
            text: text.into(),
            from_version,
            to_version,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Edit for ReplaceAction {
    fn apply(&self, buffer: &str) -> String {
        let head = byte_offset(buffer, self.pos);
        let tail = byte_offset(
            buffer,
            self.pos.saturating_add(self.text.chars().count()),
        );
        let mut out = String::with_capacity(head + self.text.len() + (buffer.len() - tail));
        out.push_str(&buffer[..head]);
        out.push_str(&self.text);
        out.push_str(&buffer[tail..]);
        out
    }

    fn merge_with(&self, _next: &Self) -> Option<Self> {
        None
    }
}

/// Remove up to `length` characters starting at `pos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAction {
    pos: usize,
    length: usize,
    from_version: u64,
    to_version: u64,
}

impl DeleteAction {
    pub fn new(pos: usize, length: usize, from_version: u64, to_version: u64) -> Self {
        Self {
            pos,
            length,
            from_version,
            to_version,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Edit for DeleteAction {
    fn apply(&self, buffer: &str) -> String {
        let start = byte_offset(buffer, self.pos);
        let end = byte_offset(buffer, self.pos.saturating_add(self.length));
        let mut out = String::with_capacity(buffer.len() - (end - start));
        out.push_str(&buffer[..start]);
        out.push_str(&buffer[end..]);
        out
    }

    fn merge_with(&self, next: &Self) -> Option<Self> {
        (next.pos == self.pos).then(|| Self {
            pos: self.pos,
            length: self.length.saturating_add(next.length),
            from_version: self.from_version,
            to_version: next.to_version,
        })
    }
}

/// One recorded edit, tagged with the versions it transitions between.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    Insert(InsertAction),
    Replace(ReplaceAction),
    Delete(DeleteAction),
}

impl Action {
    /// Start offset of the edit, as seen by the buffer it was created for.
    pub fn pos(&self) -> usize {
        match self {
            Self::Insert(a) => a.pos,
            Self::Replace(a) => a.pos,
            Self::Delete(a) => a.pos,
        }
    }

    pub fn from_version(&self) -> u64 {
        match self {
            Self::Insert(a) => a.from_version,
            Self::Replace(a) => a.from_version,
            Self::Delete(a) => a.from_version,
        }
    }

    pub fn to_version(&self) -> u64 {
        match self {
            Self::Insert(a) => a.to_version,
            Self::Replace(a) => a.to_version,
            Self::Delete(a) => a.to_version,
        }
    }

    /// Require `from_version < to_version`.
    ///
    /// # Errors
    /// Returns [`HistoryError::InvalidVersionRange`] otherwise.
    pub fn version_check(&self) -> Result<(), HistoryError> {
        let (from_version, to_version) = (self.from_version(), self.to_version());
        if from_version < to_version {
            Ok(())
        } else {
            Err(HistoryError::InvalidVersionRange {
                from_version,
                to_version,
            })
        }
    }

    /// Apply this action to `buffer`.
    pub fn apply(&self, buffer: &str) -> String {
        match self {
            Self::Insert(a) => a.apply(buffer),
            Self::Replace(a) => a.apply(buffer),
            Self::Delete(a) => a.apply(buffer),
        }
    }

    /// Merge with the action that immediately follows this one.
    ///
    /// Actions of different variants never merge.
    pub fn merge_with(&self, next: &Action) -> Option<Action> {
        match (self, next) {
            (Self::Insert(a), Self::Insert(b)) => a.merge_with(b).map(Self::Insert),
            (Self::Replace(a), Self::Replace(b)) => a.merge_with(b).map(Self::Replace),
            (Self::Delete(a), Self::Delete(b)) => a.merge_with(b).map(Self::Delete),
            _ => None,
        }
    }
}

impl From<InsertAction> for Action {
    fn from(value: InsertAction) -> Self {
        Self::Insert(value)
    }
}

impl From<ReplaceAction> for Action {
    fn from(value: ReplaceAction) -> Self {
        Self::Replace(value)
    }
}

impl From<DeleteAction> for Action {
    fn from(value: DeleteAction) -> Self {
        Self::Delete(value)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert(a) => write!(
                f,
                "Insert({:?}, pos = {}, v1 = {}, v2 = {})",
                a.text, a.pos, a.from_version, a.to_version
            ),
            Self::Replace(a) => write!(
                f,
                "Replace({:?}, pos = {}, v1 = {}, v2 = {})",
                a.text, a.pos, a.from_version, a.to_version
            ),
            Self::Delete(a) => write!(
                f,
                "Delete(pos = {}, length = {}, v1 = {}, v2 = {})",
                a.pos, a.length, a.from_version, a.to_version
            ),
        }
    }
}

/// Apply `actions` in order, starting from `base`.
pub fn replay<'a>(actions: impl IntoIterator<Item = &'a Action>, base: &str) -> String {
    actions
        .into_iter()
        .fold(base.to_string(), |buffer, action| action.apply(&buffer))
}
