// src/enums.rs
//! Public enum types used throughout the crate
//!
//! Central location for the enums that represent user-visible choices:
//! hash algorithms, character restrictions and merge decisions.
//!
//! Algorithms and restrictions round-trip through their display labels,
//! which is also how they are stored in settings and backup files.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Supported hash algorithms for the derivation chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    #[default]
    Sha256,
    Sha512,
    Sha1,
    Md5,
    Sha224,
    Sha384,
}

impl Algorithm {
    /// All algorithms, in the order they are offered to the user
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Sha256,
        Algorithm::Sha512,
        Algorithm::Sha1,
        Algorithm::Md5,
        Algorithm::Sha224,
        Algorithm::Sha384,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Sha256 => "SHA-256",
            Algorithm::Sha512 => "SHA-512",
            Algorithm::Sha1 => "SHA-1",
            Algorithm::Md5 => "MD5",
            Algorithm::Sha224 => "SHA-224",
            Algorithm::Sha384 => "SHA-384",
        }
    }

    /// Raw digest size in bytes
    pub fn digest_len(self) -> usize {
        match self {
            Algorithm::Sha256 => 32,
            Algorithm::Sha512 => 64,
            Algorithm::Sha1 => 20,
            Algorithm::Md5 => 16,
            Algorithm::Sha224 => 28,
            Algorithm::Sha384 => 48,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Algorithm {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.label() == s)
            .ok_or_else(|| CoreError::UnsupportedAlgorithm(s.to_owned()))
    }
}

/// Post-hash filter narrowing the output alphabet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharRestriction {
    All,
    #[default]
    AlnumUnderscore,
    AlnumOmit,
    AlphaOnly,
    NumericOnly,
}

impl CharRestriction {
    pub const ALL: [CharRestriction; 5] = [
        CharRestriction::All,
        CharRestriction::AlnumUnderscore,
        CharRestriction::AlnumOmit,
        CharRestriction::AlphaOnly,
        CharRestriction::NumericOnly,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CharRestriction::All => "All generated chars",
            CharRestriction::AlnumUnderscore => "Alphanumeric (replace others with underscore)",
            CharRestriction::AlnumOmit => "Alphanumeric (omit others)",
            CharRestriction::AlphaOnly => "Alpha only",
            CharRestriction::NumericOnly => "Numeric only",
        }
    }
}

impl fmt::Display for CharRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CharRestriction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CharRestriction::ALL
            .into_iter()
            .find(|r| r.label() == s)
            .ok_or_else(|| CoreError::Validation(format!("unknown character restriction: {s}")))
    }
}

/// Answer to a merge conflict prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeDecision {
    /// Abort the whole merge; the store stays untouched
    Cancel,
    /// Replace the existing record with the imported one
    Overwrite,
    /// Keep the existing record
    Skip,
}
