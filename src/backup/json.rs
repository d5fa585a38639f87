// src/backup/json.rs
use std::path::Path;

use tracing::info;

use crate::error::{CoreError, Result};
use crate::settings::{SettingsMap, SettingsStore};

/// Serialize records as a backup document (two-space indent, sorted keys)
pub fn encode_backup(records: &SettingsMap) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Parse a backup document. Anything but a JSON object of records fails.
pub fn parse_backup(data: &[u8]) -> Result<SettingsMap> {
    Ok(serde_json::from_slice(data)?)
}

/// Write the whole store to `path`; returns the number of records written.
///
/// The live store is only read.
pub fn write_backup<P: AsRef<Path>>(store: &SettingsStore, path: P) -> Result<usize> {
    if store.is_empty() {
        return Err(CoreError::NothingToBackup);
    }
    let data = encode_backup(store.records())?;
    std::fs::write(path.as_ref(), data)?;
    info!(
        count = store.len(),
        path = %path.as_ref().display(),
        "settings backed up"
    );
    Ok(store.len())
}

pub fn read_backup<P: AsRef<Path>>(path: P) -> Result<SettingsMap> {
    let data = std::fs::read(path.as_ref())?;
    parse_backup(&data)
}
