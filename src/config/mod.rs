// src/config/mod.rs
//! Configuration system for hash-master
//!
//! Central, lazy-loaded global config with TOML + env overrides.

pub use app::{load, Config, Paths};

mod app;
mod defaults;
