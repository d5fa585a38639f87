// src/aliases.rs
//! Re-exports secure-gate's ergonomic secret types
//!
//! The master password is the only secret the crate handles; it is never
//! persisted and is zeroized when dropped.

pub use secure_gate::dynamic_alias;

// Dynamic secrets
dynamic_alias!(MasterPassword, String); // Combined with the description to derive output
