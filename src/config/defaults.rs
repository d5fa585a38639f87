// src/config/defaults.rs
use std::path::PathBuf;

use crate::config::app::Paths;
use crate::consts::{APP_DIR_NAME, CONFIG_FILE_NAME, PREFERENCES_FILE_NAME, SETTINGS_FILE_NAME};

/// Per-user data directory, or the working directory when the platform has none
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_FILE_NAME)
}

pub fn default_settings_file() -> PathBuf {
    default_data_dir().join(SETTINGS_FILE_NAME)
}

pub fn default_preferences_file() -> PathBuf {
    default_data_dir().join(PREFERENCES_FILE_NAME)
}

pub fn default_paths() -> Paths {
    Paths {
        settings_file: default_settings_file(),
        preferences_file: default_preferences_file(),
    }
}
