// src/config/app.rs
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;
use tracing::{debug, warn};

use super::defaults::*;
use crate::consts::{ENV_CONFIG, ENV_PREFS_FILE, ENV_SETTINGS_FILE};
use crate::error::Result;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_paths")]
    pub paths: Paths,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paths {
    #[serde(default = "default_settings_file")]
    pub settings_file: PathBuf,
    #[serde(default = "default_preferences_file")]
    pub preferences_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            paths: default_paths(),
        }
    }
}

impl Config {
    /// Parse a TOML config file. No env overrides are applied.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    /// Resolve the effective config without caching.
    ///
    /// `$HM_CONFIG` (or the platform config path) is read if it exists,
    /// then `HM_SETTINGS_FILE` / `HM_PREFS_FILE` override the paths.
    pub fn resolve() -> Result<Self> {
        let config_path = std::env::var_os(ENV_CONFIG)
            .map(PathBuf::from)
            .unwrap_or_else(default_config_path);

        let mut conf = if config_path.exists() {
            debug!(path = %config_path.display(), "loading config");
            Config::from_file(&config_path)?
        } else {
            debug!(path = %config_path.display(), "config not found, using built-in defaults");
            Config::default()
        };

        conf.apply_env_overrides();
        Ok(conf)
    }

    fn apply_env_overrides(&mut self) {
        if let Some(p) = std::env::var_os(ENV_SETTINGS_FILE) {
            self.paths.settings_file = PathBuf::from(p);
        }
        if let Some(p) = std::env::var_os(ENV_PREFS_FILE) {
            self.paths.preferences_file = PathBuf::from(p);
        }
    }
}

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load config at runtime; falls back to defaults if the file is unreadable
pub fn load() -> &'static Config {
    CONFIG.get_or_init(|| {
        Config::resolve().unwrap_or_else(|err| {
            warn!("{err}; using built-in defaults");
            let mut conf = Config::default();
            conf.apply_env_overrides();
            conf
        })
    })
}
