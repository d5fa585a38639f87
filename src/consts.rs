// src/consts.rs
//! Shared constants: parameter defaults, storage keys, env vars

/// Default hash algorithm label for a fresh install
pub const DEFAULT_ALGORITHM: &str = "SHA-256";

/// Default character restriction label for a fresh install
pub const DEFAULT_CHAR_RESTRICTION: &str = "Alphanumeric (replace others with underscore)";

/// Default output length (characters)
pub const DEFAULT_LENGTH: &str = "12";

/// Default number of hash rounds
pub const DEFAULT_ITERATIONS: &str = "1";

/// Logical key of the saved-settings blob
pub const SETTINGS_KEY: &str = "savedSettings";

/// Logical key of the app-preferences blob
pub const PREFERENCES_KEY: &str = "appPreferences";

/// Directory name under the platform config/data dirs
pub const APP_DIR_NAME: &str = "hashmaster";

pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Env var: explicit config file path
pub const ENV_CONFIG: &str = "HM_CONFIG";
/// Env var: override the settings file path
pub const ENV_SETTINGS_FILE: &str = "HM_SETTINGS_FILE";
/// Env var: override the preferences file path
pub const ENV_PREFS_FILE: &str = "HM_PREFS_FILE";
