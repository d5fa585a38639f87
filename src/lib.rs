// src/lib.rs
//! hash-master — deterministic, stateless password derivation
//!
//! Features:
//! - description + master password → iterated SHA-2 / SHA-1 / MD5 chain
//! - base64 output with character restriction and truncation
//! - per-description parameter store (JSON)
//! - backup, restore and interactive three-way merge of that store
//!
//! Nothing secret is stored: only the parameters, keyed by description.

pub mod aliases;
pub mod app;
pub mod backup;
pub mod config;
pub mod consts;
pub mod core;
pub mod enums;
pub mod error;
pub mod persist;
pub mod prefs;
pub mod settings;

// Re-export everything users need at the crate root
pub use aliases::MasterPassword;
pub use app::{GenerateRequest, HashMaster};
pub use backup::{run_merge, DecisionProvider, MergeOutcome, MergeSession, MergeStep};
pub use config::load as load_config;
pub use self::core::{derive, derive_with_record};
pub use enums::{Algorithm, CharRestriction, MergeDecision};
pub use error::{CoreError, Result as CoreResult};
pub use persist::{FilePersistence, MemoryPersistence, Persistence};
pub use prefs::AppPreferences;
pub use settings::{ParameterRecord, SettingsMap, SettingsStore};
