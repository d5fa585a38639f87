// src/settings/filter.rs
use crate::settings::record::SettingsMap;

/// Sorted descriptions matching `substring` (case-insensitive).
///
/// With `hide_inactive`, records whose iterations parse to exactly 0 are
/// dropped; unparseable iterations are kept.
pub fn filter_descriptions(records: &SettingsMap, substring: &str, hide_inactive: bool) -> Vec<String> {
    let needle = substring.to_lowercase();

    records
        .iter()
        .filter(|(_, record)| !(hide_inactive && record.is_inactive()))
        .filter(|(key, _)| needle.is_empty() || key.to_lowercase().contains(&needle))
        .map(|(key, _)| key.clone())
        .collect()
}
