// src/settings/store.rs
//! The saved-settings store
//!
//! Not thread-safe by contract: one owner drives it (the CLI or a UI
//! event loop). Wrap it in a lock if you share it.

use tracing::{debug, warn};

use crate::error::{CoreError, Result};
use crate::persist::Persistence;
use crate::settings::filter::filter_descriptions;
use crate::settings::record::{ParameterRecord, SettingsMap};

pub struct SettingsStore {
    records: SettingsMap,
    persistence: Box<dyn Persistence>,
    load_warning: Option<CoreError>,
}

impl SettingsStore {
    /// Load the store from `persistence`.
    ///
    /// Unreadable or malformed content resets to an empty store; the cause
    /// is logged and kept in [`SettingsStore::load_warning`].
    pub fn open(persistence: impl Persistence + 'static) -> Self {
        let persistence: Box<dyn Persistence> = Box::new(persistence);
        let (records, load_warning) = match Self::read(persistence.as_ref()) {
            Ok(records) => (records, None),
            Err(err) => {
                warn!("error loading saved settings, starting empty: {err}");
                (SettingsMap::new(), Some(err))
            }
        };
        debug!(count = records.len(), "settings loaded");

        Self {
            records,
            persistence,
            load_warning,
        }
    }

    fn read(persistence: &dyn Persistence) -> Result<SettingsMap> {
        match persistence.read_all()? {
            None => Ok(SettingsMap::new()),
            Some(bytes) if bytes.is_empty() => Ok(SettingsMap::new()),
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
        }
    }

    /// Why the last load fell back to an empty store, if it did
    pub fn load_warning(&self) -> Option<&CoreError> {
        self.load_warning.as_ref()
    }

    /// Upsert the record for `description` and persist.
    ///
    /// An empty description is ignored. The in-memory store is updated even
    /// if the write fails.
    pub fn save(&mut self, description: &str, record: ParameterRecord) -> Result<()> {
        if description.is_empty() {
            return Ok(());
        }
        self.records.insert(description.to_owned(), record);
        self.persist()
    }

    pub fn load(&self, description: &str) -> Option<&ParameterRecord> {
        self.records.get(description)
    }

    /// Remove `description`; returns whether it existed.
    ///
    /// The record stays in memory if the write fails.
    pub fn delete(&mut self, description: &str) -> Result<bool> {
        if !self.records.contains_key(description) {
            return Ok(false);
        }
        let mut next = self.records.clone();
        next.remove(description);
        self.write(&next)?;
        self.records = next;
        Ok(true)
    }

    /// All descriptions, sorted
    pub fn list(&self) -> Vec<String> {
        self.records.keys().cloned().collect()
    }

    pub fn filter(&self, substring: &str, hide_inactive: bool) -> Vec<String> {
        filter_descriptions(&self.records, substring, hide_inactive)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Read-only view of every record
    pub fn records(&self) -> &SettingsMap {
        &self.records
    }

    /// Replace the whole store (restore, merge commit).
    ///
    /// Nothing changes in memory unless the new map was written.
    pub fn replace_all(&mut self, records: SettingsMap) -> Result<()> {
        self.write(&records)?;
        self.records = records;
        Ok(())
    }

    fn persist(&mut self) -> Result<()> {
        Self::write_to(self.persistence.as_mut(), &self.records)
    }

    fn write(&mut self, records: &SettingsMap) -> Result<()> {
        Self::write_to(self.persistence.as_mut(), records)
    }

    fn write_to(persistence: &mut dyn Persistence, records: &SettingsMap) -> Result<()> {
        let data = serde_json::to_vec(records)?;
        persistence.write_all(&data)
    }
}
