//! Root crate facade for textlog.

pub mod script;

pub use textlog_core::{
    action, config, constants, error, history, merge, merge_actions, replay, shared, Action,
    Config, DeleteAction, History, HistoryConfig, HistoryError, InsertAction, ReplaceAction,
    SharedHistory,
};
