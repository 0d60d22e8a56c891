//! API key type and format validation.
//!
//! Keys are restricted to `[A-Za-z0-9_-]{20,100}` so that a key can never
//! smuggle header separators or control characters into a request.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Message shown when a key fails format validation.
pub const INVALID_KEY_FORMAT_MESSAGE: &str = "Invalid API key format. API keys must be 20-100 characters and contain only alphanumeric characters, underscores, and hyphens.";

static API_KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{20,100}$").expect("API key pattern compiles"));

/// Returns true if `key` matches the accepted API key format.
pub fn is_valid_api_key(key: &str) -> bool {
    API_KEY_PATTERN.is_match(key)
}

/// A validated API key.
///
/// The only way to build one is [`Credential::parse`], so holding a
/// `Credential` means the value is safe to put in a header.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Trims `raw` and validates it.
    ///
    /// Returns `Ok(None)` when the trimmed value is empty, so callers can
    /// fall through to the next source.
    pub fn parse(raw: &str) -> Result<Option<Self>, CoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        if !is_valid_api_key(trimmed) {
            return Err(CoreError::InvalidCredentialFormat);
        }
        Ok(Some(Self(trimmed.to_string())))
    }

    /// Returns the key value.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

// Never print the key itself in logs or debug output.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&"<redacted>").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_keys_pass_unchanged() {
        let keys = [
            "abcdefghijklmnopqrst",
            "valid-api-key-1234567890",
            "UPPER_lower-0123456789_more",
            &"x".repeat(100),
        ];

        for key in keys {
            let credential = Credential::parse(key).unwrap().unwrap();
            assert_eq!(credential.expose(), key);
        }
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let credential = Credential::parse("  valid-api-key-1234567890\n")
            .unwrap()
            .unwrap();
        assert_eq!(credential.expose(), "valid-api-key-1234567890");
    }

    #[test]
    fn test_blank_is_absent() {
        assert_eq!(Credential::parse("").unwrap(), None);
        assert_eq!(Credential::parse("   \t").unwrap(), None);
    }

    #[test]
    fn test_invalid_keys_rejected() {
        let keys = [
            "too-short",
            "invalid@key#format-123456",
            "valid-key-1234567890\r\nX-Evil: header",
            "has space in the middle 1234",
            &"y".repeat(101),
        ];

        for key in keys {
            assert_eq!(
                Credential::parse(key),
                Err(CoreError::InvalidCredentialFormat),
                "expected rejection for {key:?}"
            );
        }
    }

    #[test]
    fn test_debug_redacts_value() {
        let credential = Credential::parse("valid-api-key-1234567890").unwrap().unwrap();
        let debug = format!("{credential:?}");
        assert!(!debug.contains("1234567890"));
    }
}
