// src/core/restrict.rs
//! Output alphabet filters and length truncation

use crate::enums::CharRestriction;

/// Apply a character restriction to the base64 hash text
pub fn apply_restriction(hash_text: &str, restriction: CharRestriction) -> String {
    match restriction {
        CharRestriction::All => hash_text.to_owned(),
        CharRestriction::AlnumUnderscore => hash_text
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect(),
        CharRestriction::AlnumOmit => keep(hash_text, |c| c.is_ascii_alphanumeric()),
        CharRestriction::AlphaOnly => keep(hash_text, |c| c.is_ascii_alphabetic()),
        // Empty when the hash has no digits; nothing is synthesized.
        CharRestriction::NumericOnly => keep(hash_text, |c| c.is_ascii_digit()),
    }
}

fn keep(text: &str, pred: impl Fn(char) -> bool) -> String {
    text.chars().filter(|&c| pred(c)).collect()
}

/// Keep at most `max_len` leading bytes; `None` means unlimited
pub fn truncate(mut text: String, max_len: Option<usize>) -> String {
    if let Some(max) = max_len {
        // base64 output is ASCII, so byte and char boundaries coincide
        if text.len() > max && text.is_char_boundary(max) {
            text.truncate(max);
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "a+B/9=";

    #[test]
    fn test_each_restriction_on_mixed_text() {
        assert_eq!(apply_restriction(SAMPLE, CharRestriction::All), "a+B/9=");
        assert_eq!(
            apply_restriction(SAMPLE, CharRestriction::AlnumUnderscore),
            "a_B_9_"
        );
        assert_eq!(apply_restriction(SAMPLE, CharRestriction::AlnumOmit), "aB9");
        assert_eq!(apply_restriction(SAMPLE, CharRestriction::AlphaOnly), "aB");
        assert_eq!(apply_restriction(SAMPLE, CharRestriction::NumericOnly), "9");
    }

    #[test]
    fn test_numeric_only_without_digits_is_empty() {
        assert_eq!(apply_restriction("abc+/=", CharRestriction::NumericOnly), "");
    }

    #[test]
    fn test_truncate_limits() {
        assert_eq!(truncate("abcdefgh".into(), Some(5)), "abcde");
        assert_eq!(truncate("abc".into(), Some(5)), "abc");
        assert_eq!(truncate("abcdefgh".into(), None), "abcdefgh");
    }
}
