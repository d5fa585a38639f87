// src/core/derive.rs
//! The derivation pipeline
//!
//! The exact order of operations is part of the output contract: the same
//! inputs must yield the same string on every platform and every release.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::debug;

use crate::aliases::MasterPassword;
use crate::core::hash::hash_chain;
use crate::core::restrict::{apply_restriction, truncate};
use crate::enums::{Algorithm, CharRestriction};
use crate::error::{CoreError, Result};
use crate::settings::ParameterRecord;

/// Derive the output string for `description` + `secret`.
///
/// 1. concatenate description and secret (UTF-8, no separator)
/// 2. hash the bytes `iterations` times, each round over the raw digest
/// 3. base64 (standard alphabet, padded) the final digest
/// 4. apply `restriction` to the base64 text
/// 5. keep the first `max_length` bytes when set
///
/// Empty description/secret are the caller's responsibility.
pub fn derive(
    description: &str,
    secret: &MasterPassword,
    algorithm: Algorithm,
    iterations: i64,
    restriction: CharRestriction,
    max_length: Option<usize>,
) -> Result<String> {
    let rounds = u32::try_from(iterations)
        .ok()
        .filter(|&n| n >= 1)
        .ok_or_else(|| CoreError::InvalidIterationCount(iterations.to_string()))?;

    debug!(%algorithm, rounds, ?restriction, ?max_length, "deriving");

    let mut combined = Vec::with_capacity(description.len() + secret.expose_secret().len());
    combined.extend_from_slice(description.as_bytes());
    combined.extend_from_slice(secret.expose_secret().as_bytes());

    let raw = hash_chain(algorithm, &combined, rounds);
    let hash_text = STANDARD.encode(raw);

    let restricted = apply_restriction(&hash_text, restriction);
    Ok(truncate(restricted, max_length))
}

/// Derive using the text-encoded parameters of a stored record
pub fn derive_with_record(
    description: &str,
    secret: &MasterPassword,
    record: &ParameterRecord,
) -> Result<String> {
    let algorithm: Algorithm = record.algorithm.parse()?;
    let restriction: CharRestriction = record.char_restrictions.parse()?;
    let iterations = parse_iterations(&record.iterations)?;
    let max_length = parse_max_length(&record.length)?;
    derive(
        description,
        secret,
        algorithm,
        iterations,
        restriction,
        max_length,
    )
}

/// Parse an iteration count; anything that is not a positive integer fails
pub fn parse_iterations(text: &str) -> Result<i64> {
    match text.parse::<i64>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(CoreError::InvalidIterationCount(text.to_owned())),
    }
}

/// Parse a length limit. Empty or non-positive means unlimited.
pub fn parse_max_length(text: &str) -> Result<Option<usize>> {
    if text.is_empty() {
        return Ok(None);
    }
    let n: i64 = text
        .parse()
        .map_err(|_| CoreError::Validation(format!("length is not a number: {text}")))?;
    Ok(usize::try_from(n).ok().filter(|&n| n > 0))
}
