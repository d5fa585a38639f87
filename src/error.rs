// src/error.rs
//! Public error type for the entire crate

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// A required field is empty or a numeric field is out of range.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Invalid iteration count: {0}")]
    InvalidIterationCount(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("No settings to backup")]
    NothingToBackup,

    #[error("Merge session is not waiting for a conflict decision")]
    NoPendingConflict,
}

impl CoreError {
    /// Read/write/parse failures on a persisted store.
    ///
    /// These are surfaced as warnings and never terminate the process.
    pub fn is_persistence(&self) -> bool {
        matches!(self, CoreError::Io(_) | CoreError::Json(_))
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
