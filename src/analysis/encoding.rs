//! Base64 payload validation — pure core.
//!
//! Malformed input is rejected here, before any network traffic. The
//! checks mirror what the service-side decode would enforce: standard or
//! URL-safe alphabet, at most two `=` of trailing padding, and a total
//! length divisible by four.

use regex::Regex;
use std::sync::OnceLock;

/// `data:image/png;base64,` style prefix, stripped before validation.
fn data_url_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^data:image/\w+;base64,").unwrap())
}

fn base64_alphabet() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9+/\-_]*={0,2}$").unwrap())
}

/// Strip a `data:image/...;base64,` prefix, if present.
///
/// Also used by the Analysis Service, which accepts payloads with or
/// without the prefix but forwards only the raw base64.
pub fn strip_data_url_prefix(input: &str) -> &str {
    let trimmed = input.trim();
    match data_url_prefix().find(trimmed) {
        Some(m) => &trimmed[m.end()..],
        None => trimmed,
    }
}

/// Strip any data-URL prefix and validate the remaining base64 text.
///
/// Returns the cleaned payload ready for submission.
pub fn normalize_base64(input: &str) -> Result<String, EncodingError> {
    let cleaned = strip_data_url_prefix(input);

    if cleaned.is_empty() {
        return Err(EncodingError::Empty);
    }
    if cleaned.len() % 4 != 0 {
        return Err(EncodingError::BadPadding(cleaned.len()));
    }
    if !base64_alphabet().is_match(cleaned) {
        return Err(EncodingError::BadAlphabet);
    }

    Ok(cleaned.to_string())
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EncodingError {
    #[error("capture payload is empty")]
    Empty,

    #[error("base64 length {0} is not a multiple of 4")]
    BadPadding(usize),

    #[error("payload contains characters outside the base64 alphabet")]
    BadAlphabet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_base64() {
        assert_eq!(normalize_base64("QUJDRA==").unwrap(), "QUJDRA==");
    }

    #[test]
    fn strips_data_url_prefix() {
        let out = normalize_base64("data:image/png;base64,QUJDRA==").unwrap();
        assert_eq!(out, "QUJDRA==");
    }

    #[test]
    fn accepts_url_safe_variant() {
        assert_eq!(normalize_base64("QUJ-_A==").unwrap(), "QUJ-_A==");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(normalize_base64("  QUJDRA==\n").unwrap(), "QUJDRA==");
    }

    #[test]
    fn rejects_wrong_padding_length() {
        assert_eq!(
            normalize_base64("QUJDR"),
            Err(EncodingError::BadPadding(5))
        );
    }

    #[test]
    fn rejects_disallowed_characters() {
        assert_eq!(normalize_base64("QUJ!RA=="), Err(EncodingError::BadAlphabet));
    }

    #[test]
    fn rejects_interior_padding() {
        assert_eq!(normalize_base64("QU==RA=="), Err(EncodingError::BadAlphabet));
    }

    #[test]
    fn rejects_empty_payload() {
        assert_eq!(normalize_base64(""), Err(EncodingError::Empty));
        assert_eq!(
            normalize_base64("data:image/png;base64,"),
            Err(EncodingError::Empty)
        );
    }
}
