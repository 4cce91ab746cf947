use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Number of hex characters kept from the digest of a long URL.
pub const SHORT_CODE_LENGTH: usize = 10;

/// The short identifier a long URL is reachable under.
///
/// Well-formed codes are exactly [`SHORT_CODE_LENGTH`] lowercase hex
/// characters. Codes built with [`ShortCode::new_unchecked`] skip that check
/// and are only meant for trusted sources (generators, stored records).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortCode(String);

impl ShortCode {
    /// Parses untrusted input (e.g. a request path) into a short code.
    pub fn parse(code: impl Into<String>) -> std::result::Result<Self, CoreError> {
        let code = code.into();
        Self::validate(&code)?;
        Ok(Self(code))
    }

    /// Creates a `ShortCode` without validation.
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Generates the full shortened URL based on the provided base URL.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(code: &str) -> std::result::Result<(), CoreError> {
        if code.len() != SHORT_CODE_LENGTH {
            return Err(CoreError::InvalidShortCode(format!(
                "length must be {}, got {}",
                SHORT_CODE_LENGTH,
                code.len()
            )));
        }

        if !code
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        {
            return Err(CoreError::InvalidShortCode(format!(
                "must contain only lowercase hex characters: '{}'",
                code
            )));
        }

        Ok(())
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_codes() {
        assert!(ShortCode::parse("100680ad54").is_ok());
        assert!(ShortCode::parse("0123456789").is_ok());
        assert!(ShortCode::parse("abcdefabcd").is_ok());
    }

    #[test]
    fn wrong_length() {
        assert!(ShortCode::parse("").is_err());
        assert!(ShortCode::parse("100680ad5").is_err());
        assert!(ShortCode::parse("100680ad546").is_err());
    }

    #[test]
    fn invalid_characters() {
        assert!(ShortCode::parse("100680AD54").is_err());
        assert!(ShortCode::parse("100680ad5g").is_err());
        assert!(ShortCode::parse("100680ad5/").is_err());
        assert!(ShortCode::parse("doesnotexi").is_err());
    }

    #[test]
    fn unchecked_skips_validation() {
        let code = ShortCode::new_unchecked("doesnotexist");
        assert_eq!(code.as_str(), "doesnotexist");
    }

    #[test]
    fn display() {
        let code = ShortCode::parse("100680ad54").unwrap();
        assert_eq!(code.to_string(), "100680ad54");
    }

    #[test]
    fn to_url() {
        let code = ShortCode::parse("100680ad54").unwrap();
        assert_eq!(
            code.to_url("http://localhost:8080"),
            "http://localhost:8080/100680ad54"
        );
        assert_eq!(
            code.to_url("http://localhost:8080/"),
            "http://localhost:8080/100680ad54"
        );
    }

    #[test]
    fn serializes_as_plain_string() {
        let code = ShortCode::parse("100680ad54").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"100680ad54\"");
    }
}
