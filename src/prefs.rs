// src/prefs.rs
//! Last-used UI values
//!
//! Pure convenience state. A missing or corrupt blob silently becomes the
//! defaults below (corruption is logged).

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::consts::{DEFAULT_ALGORITHM, DEFAULT_CHAR_RESTRICTION, DEFAULT_ITERATIONS, DEFAULT_LENGTH};
use crate::error::Result;
use crate::persist::Persistence;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppPreferences {
    pub last_description: String,
    pub last_filter: String,
    pub last_algorithm: String,
    #[serde(rename = "last_char_rest")]
    pub last_char_restriction: String,
    pub last_length: String,
    pub last_iterations: String,
    /// Hide records with zero iterations ("inactive")
    #[serde(rename = "hide_zero_iter")]
    pub hide_inactive: bool,
    #[serde(rename = "copy_to_clipboard")]
    pub auto_copy: bool,
}

impl Default for AppPreferences {
    fn default() -> Self {
        Self {
            last_description: String::new(),
            last_filter: String::new(),
            last_algorithm: DEFAULT_ALGORITHM.to_owned(),
            last_char_restriction: DEFAULT_CHAR_RESTRICTION.to_owned(),
            last_length: DEFAULT_LENGTH.to_owned(),
            last_iterations: DEFAULT_ITERATIONS.to_owned(),
            hide_inactive: true,
            auto_copy: true,
        }
    }
}

pub struct PreferencesStore {
    prefs: AppPreferences,
    persistence: Box<dyn Persistence>,
}

impl PreferencesStore {
    pub fn open(persistence: impl Persistence + 'static) -> Self {
        let persistence: Box<dyn Persistence> = Box::new(persistence);
        let prefs = match persistence.read_all() {
            Ok(Some(bytes)) if !bytes.is_empty() => {
                serde_json::from_slice(&bytes).unwrap_or_else(|err| {
                    warn!("error parsing app preferences, using defaults: {err}");
                    AppPreferences::default()
                })
            }
            Ok(_) => AppPreferences::default(),
            Err(err) => {
                warn!("error reading app preferences, using defaults: {err}");
                AppPreferences::default()
            }
        };
        Self { prefs, persistence }
    }

    pub fn get(&self) -> &AppPreferences {
        &self.prefs
    }

    /// Mutate and persist
    pub fn update(&mut self, f: impl FnOnce(&mut AppPreferences)) -> Result<()> {
        f(&mut self.prefs);
        let data = serde_json::to_vec(&self.prefs)?;
        self.persistence.write_all(&data)
    }
}
