// src/app.rs
//! Application state: owns the settings and preferences stores and runs
//! the user-facing workflows (generate, select, delete, backup, restore,
//! merge) on top of the pure derivation engine.

use std::path::Path;

use tracing::{info, warn};

use crate::aliases::MasterPassword;
use crate::backup::{self, DecisionProvider, MergeOutcome, RestorePlan};
use crate::config::Config;
use crate::core::derive;
use crate::enums::{Algorithm, CharRestriction};
use crate::error::{CoreError, Result};
use crate::persist::{FilePersistence, Persistence};
use crate::prefs::{AppPreferences, PreferencesStore};
use crate::settings::{ParameterRecord, SettingsStore};

/// Raw form input, exactly as typed by the user
pub struct GenerateRequest {
    pub description: String,
    pub master_password: MasterPassword,
    pub algorithm: String,
    pub restriction: String,
    pub length: String,
    pub iterations: String,
}

impl Clone for GenerateRequest {
    fn clone(&self) -> Self {
        Self {
            description: self.description.clone(),
            master_password: MasterPassword::new(self.master_password.expose_secret().clone()),
            algorithm: self.algorithm.clone(),
            restriction: self.restriction.clone(),
            length: self.length.clone(),
            iterations: self.iterations.clone(),
        }
    }
}

/// Typed parameters after boundary validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidParams {
    pub algorithm: Algorithm,
    pub restriction: CharRestriction,
    pub iterations: i64,
    pub max_length: Option<usize>,
}

impl GenerateRequest {
    /// Request for `description` using the text parameters of `record`
    pub fn from_record(
        description: impl Into<String>,
        master_password: MasterPassword,
        record: &ParameterRecord,
    ) -> Self {
        Self {
            description: description.into(),
            master_password,
            algorithm: record.algorithm.clone(),
            restriction: record.char_restrictions.clone(),
            length: record.length.clone(),
            iterations: record.iterations.clone(),
        }
    }

    /// Checks that decide whether the request is worth remembering:
    /// a description and recognised algorithm and restriction labels
    pub fn validate_record(&self) -> Result<(Algorithm, CharRestriction)> {
        if self.description.is_empty() {
            return Err(CoreError::Validation("description cannot be empty".into()));
        }
        Ok((self.algorithm.parse()?, self.restriction.parse()?))
    }

    pub fn validate(&self) -> Result<ValidParams> {
        if self.description.is_empty() {
            return Err(CoreError::Validation("description cannot be empty".into()));
        }
        if self.master_password.expose_secret().is_empty() {
            return Err(CoreError::Validation(
                "master password cannot be empty".into(),
            ));
        }
        let max_length = match self.length.as_str() {
            "" => None,
            text => match text.parse::<i64>() {
                Ok(n) if n >= 0 => usize::try_from(n).ok().filter(|&n| n > 0),
                _ => {
                    return Err(CoreError::Validation(
                        "length must be a non-negative integer".into(),
                    ))
                }
            },
        };
        let iterations = match self.iterations.parse::<i64>() {
            Ok(n) if n >= 1 => n,
            _ => {
                return Err(CoreError::Validation(
                    "iterations must be a positive integer".into(),
                ))
            }
        };

        Ok(ValidParams {
            algorithm: self.algorithm.parse()?,
            restriction: self.restriction.parse()?,
            iterations,
            max_length,
        })
    }

    /// The record persisted for this request
    pub fn to_record(&self) -> ParameterRecord {
        ParameterRecord {
            description: self.description.clone(),
            algorithm: self.algorithm.clone(),
            char_restrictions: self.restriction.clone(),
            length: self.length.clone(),
            iterations: self.iterations.clone(),
        }
    }
}

pub struct HashMaster {
    store: SettingsStore,
    prefs: PreferencesStore,
}

impl HashMaster {
    /// Open both stores at the paths named by `config`
    pub fn open(config: &Config) -> Self {
        Self::with_persistence(
            FilePersistence::new(&config.paths.settings_file),
            FilePersistence::new(&config.paths.preferences_file),
        )
    }

    pub fn with_persistence(
        settings: impl Persistence + 'static,
        preferences: impl Persistence + 'static,
    ) -> Self {
        Self {
            store: SettingsStore::open(settings),
            prefs: PreferencesStore::open(preferences),
        }
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    pub fn prefs(&self) -> &AppPreferences {
        self.prefs.get()
    }

    /// Remember the parameters, then validate the rest and derive.
    ///
    /// The record is saved as soon as the description, algorithm and
    /// restriction are valid, so a zero iteration count stores an inactive
    /// record and still reports the iterations error. A failed write of the
    /// settings or preferences is logged and does not block the output.
    pub fn generate(&mut self, request: &GenerateRequest) -> Result<String> {
        request.validate_record()?;

        if let Err(err) = self
            .store
            .save(&request.description, request.to_record())
        {
            warn!("could not persist settings: {err}");
        }
        self.remember(&request.to_record());

        let params = request.validate()?;
        derive(
            &request.description,
            &request.master_password,
            params.algorithm,
            params.iterations,
            params.restriction,
            params.max_length,
        )
    }

    /// Parameters to prefill for `description`: its saved record, else the
    /// last-used values
    pub fn parameters_for(&self, description: &str) -> ParameterRecord {
        match self.store.load(description) {
            Some(record) => record.clone(),
            None => {
                let p = self.prefs.get();
                ParameterRecord {
                    description: description.to_owned(),
                    algorithm: p.last_algorithm.clone(),
                    char_restrictions: p.last_char_restriction.clone(),
                    length: p.last_length.clone(),
                    iterations: p.last_iterations.clone(),
                }
            }
        }
    }

    /// Load a saved record into the form (and the last-used preferences)
    pub fn select(&mut self, description: &str) -> Option<ParameterRecord> {
        let record = self.store.load(description)?.clone();
        self.remember(&record);
        Some(record)
    }

    pub fn delete(&mut self, description: &str) -> Result<bool> {
        self.store.delete(description)
    }

    /// Saved descriptions after the stored filter text and hide-inactive toggle
    pub fn visible_descriptions(&self) -> Vec<String> {
        let p = self.prefs.get();
        self.store.filter(&p.last_filter, p.hide_inactive)
    }

    pub fn set_filter(&mut self, text: &str) -> Result<()> {
        self.prefs.update(|p| p.last_filter = text.to_owned())
    }

    pub fn set_hide_inactive(&mut self, hide: bool) -> Result<()> {
        self.prefs.update(|p| p.hide_inactive = hide)
    }

    pub fn set_auto_copy(&mut self, enabled: bool) -> Result<()> {
        self.prefs.update(|p| p.auto_copy = enabled)
    }

    pub fn backup_to<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        backup::write_backup(&self.store, path)
    }

    pub fn prepare_restore<P: AsRef<Path>>(&self, path: P) -> Result<RestorePlan> {
        backup::prepare_restore(&self.store, path)
    }

    pub fn apply_restore(&mut self, plan: RestorePlan) -> Result<usize> {
        plan.apply(&mut self.store)
    }

    /// Merge a backup file into the store.
    ///
    /// An unreadable or malformed file fails before any merging starts.
    pub fn merge_from<P, D>(&mut self, path: P, provider: &mut D) -> Result<MergeOutcome>
    where
        P: AsRef<Path>,
        D: DecisionProvider + ?Sized,
    {
        let imported = backup::read_backup(path.as_ref())?;
        info!(count = imported.len(), "merging settings");
        backup::run_merge(&mut self.store, imported, provider)
    }

    fn remember(&mut self, record: &ParameterRecord) {
        let result = self.prefs.update(|p| {
            p.last_description = record.description.clone();
            p.last_algorithm = record.algorithm.clone();
            p.last_char_restriction = record.char_restrictions.clone();
            p.last_length = record.length.clone();
            p.last_iterations = record.iterations.clone();
        });
        if let Err(err) = result {
            warn!("could not persist app preferences: {err}");
        }
    }
}
