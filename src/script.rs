//! Command-line edit scripts: parsing and replay against a [`History`].

use anyhow::{bail, Context};
use serde::Serialize;
use std::str::FromStr;
use textlog_core::{Action, History, InsertAction};

/// One edit step given on the command line.
///
/// Accepted forms:
/// - `insert:TEXT` / `insert:TEXT@POS`
/// - `replace:TEXT` / `replace:TEXT@POS`
/// - `delete:POS:LEN`
/// - `demo` (the built-in demonstration script)
///
/// A trailing `@suffix` that is not a number stays part of the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    Insert { text: String, pos: Option<usize> },
    Replace { text: String, pos: Option<usize> },
    Delete { pos: usize, length: usize },
    Demo,
}

fn split_text_and_pos(payload: &str) -> (String, Option<usize>) {
    if let Some((text, pos)) = payload.rsplit_once('@') {
        if let Ok(pos) = pos.parse() {
            return (text.to_string(), Some(pos));
        }
    }
    (payload.to_string(), None)
}

impl FromStr for EditOp {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> anyhow::Result<Self> {
        if raw == "demo" {
            return Ok(Self::Demo);
        }
        let Some((kind, payload)) = raw.split_once(':') else {
            bail!(
                "Unrecognized edit '{}'. Expected insert:, replace:, delete: or demo",
                raw
            );
        };
        match kind {
            "insert" => {
                let (text, pos) = split_text_and_pos(payload);
                Ok(Self::Insert { text, pos })
            }
            "replace" => {
                let (text, pos) = split_text_and_pos(payload);
                Ok(Self::Replace { text, pos })
            }
            "delete" => {
                let (pos, length) = payload
                    .split_once(':')
                    .with_context(|| format!("delete needs POS:LEN, got '{}'", payload))?;
                Ok(Self::Delete {
                    pos: pos
                        .parse()
                        .with_context(|| format!("invalid delete position '{}'", pos))?,
                    length: length
                        .parse()
                        .with_context(|| format!("invalid delete length '{}'", length))?,
                })
            }
            other => bail!("Unknown edit kind '{}'", other),
        }
    }
}

/// Replay the demonstration script, including one raw action.
fn run_demo(history: &mut History) -> anyhow::Result<()> {
    history.insert("123456", None)?;
    history.delete(2, 2)?;
    history.delete(2, 2)?;
    history.insert("3", None)?;
    let from_version = history.version();
    history.apply_raw_action(Action::from(InsertAction::new(
        3,
        "123456",
        from_version,
        from_version + 6,
    )))?;
    history.delete(0, 1)?;
    history.insert("Hello, World", None)?;
    history.replace("123456", Some(3))?;
    history.insert("zxc", Some(9))?;
    history.replace("789", Some(9))?;
    history.replace("10", Some(12))?;
    Ok(())
}

impl EditOp {
    /// Apply this step to `history`.
    ///
    /// # Errors
    /// Propagates the history's validation failure, annotated with the step.
    pub fn apply(&self, history: &mut History) -> anyhow::Result<()> {
        match self {
            Self::Insert { text, pos } => history.insert(text, *pos).map(drop),
            Self::Replace { text, pos } => history.replace(text, *pos).map(drop),
            Self::Delete { pos, length } => history.delete(*pos, *length).map(drop),
            Self::Demo => return run_demo(history),
        }
        .with_context(|| format!("edit {:?} failed", self))
    }
}

/// Final state of a replayed script.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub text: String,
    pub version: u64,
    pub actions: Vec<Action>,
}

impl Report {
    /// Collect the state of `history` and its actions in
    /// `[from_version, to_version)`.
    pub fn collect(
        history: &History,
        from_version: Option<u64>,
        to_version: Option<u64>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            text: history.text().to_string(),
            version: history.version(),
            actions: history.get_actions(from_version, to_version)?,
        })
    }

    /// Human-readable rendering, one action per line.
    pub fn render_text(&self) -> String {
        let mut out = format!("text: {:?}\nversion: {}\nactions:\n", self.text, self.version);
        for action in &self.actions {
            out.push_str("  ");
            out.push_str(&action.to_string());
            out.push('\n');
        }
        out
    }
}

/// Apply every step in order, stopping at the first failure.
pub fn run_script(history: &mut History, ops: &[EditOp]) -> anyhow::Result<()> {
    for op in ops {
        op.apply(history)?;
    }
    Ok(())
}
