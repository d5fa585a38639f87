// src/backup/restore.rs
//! Wholesale replacement of the store from a backup
//!
//! Two steps so the caller can confirm in between: [`prepare_restore`]
//! parses the file and reports the counts, [`RestorePlan::apply`] commits.

use std::path::Path;

use tracing::info;

use crate::backup::json::read_backup;
use crate::error::Result;
use crate::settings::{SettingsMap, SettingsStore};

#[derive(Debug, Clone)]
pub struct RestorePlan {
    current_count: usize,
    incoming: SettingsMap,
}

impl RestorePlan {
    pub fn new(store: &SettingsStore, incoming: SettingsMap) -> Self {
        Self {
            current_count: store.len(),
            incoming,
        }
    }

    pub fn current_count(&self) -> usize {
        self.current_count
    }

    pub fn incoming_count(&self) -> usize {
        self.incoming.len()
    }

    /// Confirmation text showing old vs new count
    pub fn prompt(&self) -> String {
        format!(
            "This will replace your current {} settings with {} settings from the backup file. Continue?",
            self.current_count,
            self.incoming.len()
        )
    }

    /// Replace the store; returns the number of restored records
    pub fn apply(self, store: &mut SettingsStore) -> Result<usize> {
        let count = self.incoming.len();
        store.replace_all(self.incoming)?;
        info!(count, "settings restored");
        Ok(count)
    }
}

/// Read and parse `path`. A malformed file fails here, before anything changes.
pub fn prepare_restore<P: AsRef<Path>>(store: &SettingsStore, path: P) -> Result<RestorePlan> {
    let incoming = read_backup(path)?;
    Ok(RestorePlan::new(store, incoming))
}
