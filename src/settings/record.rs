// src/settings/record.rs
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::{Algorithm, CharRestriction};

/// description → record, iterated in ascending key order
pub type SettingsMap = BTreeMap<String, ParameterRecord>;

/// Parameters used for one description.
///
/// The serialized shape is the backup file format: every value is a string,
/// algorithm and restriction are their display labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterRecord {
    pub description: String,
    pub algorithm: String,
    pub char_restrictions: String,
    /// Non-negative integer, or empty for unlimited
    pub length: String,
    /// Positive integer; "0" marks the record inactive
    pub iterations: String,
}

impl ParameterRecord {
    pub fn new(
        description: impl Into<String>,
        algorithm: Algorithm,
        restriction: CharRestriction,
        length: impl Into<String>,
        iterations: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            algorithm: algorithm.label().to_owned(),
            char_restrictions: restriction.label().to_owned(),
            length: length.into(),
            iterations: iterations.into(),
        }
    }

    /// True when iterations parses to exactly zero
    pub fn is_inactive(&self) -> bool {
        matches!(self.iterations.parse::<i64>(), Ok(0))
    }

    /// Compared fields that differ from `other`
    pub fn differing_fields(&self, other: &ParameterRecord) -> Vec<Field> {
        Field::COMPARED
            .into_iter()
            .filter(|f| f.value(self) != f.value(other))
            .collect()
    }
}

/// A record field shown in conflict comparisons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Description,
    Algorithm,
    CharRestrictions,
    Length,
    Iterations,
}

impl Field {
    pub const COMPARED: [Field; 5] = [
        Field::Description,
        Field::Algorithm,
        Field::CharRestrictions,
        Field::Length,
        Field::Iterations,
    ];

    pub fn value(self, record: &ParameterRecord) -> &str {
        match self {
            Field::Description => &record.description,
            Field::Algorithm => &record.algorithm,
            Field::CharRestrictions => &record.char_restrictions,
            Field::Length => &record.length,
            Field::Iterations => &record.iterations,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Description => "Description",
            Field::Algorithm => "Algorithm",
            Field::CharRestrictions => "Characters",
            Field::Length => "Length",
            Field::Iterations => "Iterations",
        })
    }
}
