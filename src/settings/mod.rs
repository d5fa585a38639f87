// src/settings/mod.rs
//! Per-description parameter records and their store
//!
//! Records keep every field as text; validation happens at the boundary
//! (see [`crate::app::GenerateRequest`]), never in storage.

mod filter;
mod record;
mod store;

pub use filter::filter_descriptions;
pub use record::{Field, ParameterRecord, SettingsMap};
pub use store::SettingsStore;
