// src/core/mod.rs
//! Derivation engine: pure functions, no I/O, no shared state
//!
//! description ++ secret → iterated raw-digest chain → base64 →
//! character restriction → truncation.
//! Everything here is safe to call concurrently.
mod derive;
mod hash;
mod restrict;

pub use derive::{derive, derive_with_record, parse_iterations, parse_max_length};
pub use hash::{digest, hash_chain};
pub use restrict::{apply_restriction, truncate};
