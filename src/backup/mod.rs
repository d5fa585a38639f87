// src/backup/mod.rs
//! Backup, restore and merge of the settings store
//!
//! All three share one file format: a pretty-printed JSON object keyed by
//! description. Backup files hold descriptions in cleartext.

pub mod json;
pub mod merge;
pub mod restore;

pub use json::{encode_backup, parse_backup, read_backup, write_backup};
pub use merge::{
    run_merge, Conflict, DecisionProvider, MergeOutcome, MergeSession, MergeState, MergeStep,
    ScriptedDecisions,
};
pub use restore::{prepare_restore, RestorePlan};
