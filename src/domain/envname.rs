//! Validated environment-variable name type
//!
//! Every key in a config's `items` map must be a syntactically valid
//! environment variable name. Validation happens once, at construction, so the
//! rest of the crate can pass names around without re-checking.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

fn envname_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid pattern"))
}

/// Environment variable name newtype wrapper
///
/// Names must match `[A-Za-z_][A-Za-z0-9_]*`.
///
/// # Examples
///
/// ```
/// use envix::domain::EnvName;
///
/// let name = EnvName::new("DATABASE_URL").unwrap();
/// assert_eq!(name.as_str(), "DATABASE_URL");
/// assert!(EnvName::new("1BAD").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EnvName(String);

impl EnvName {
    /// Creates a new EnvName, validating the name pattern
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if !envname_pattern().is_match(&name) {
            return Err(format!("Invalid environment variable name: {name}"));
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EnvName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EnvName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for EnvName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for EnvName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        EnvName::new(name).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for name in ["FOO", "_private", "DATABASE_URL", "a1", "X"] {
            assert!(EnvName::new(name).is_ok(), "expected {name} to be valid");
        }
    }

    #[test]
    fn test_invalid_names() {
        for name in ["", "1FOO", "FOO-BAR", "FOO BAR", "FOO.BAR", "$FOO"] {
            assert!(EnvName::new(name).is_err(), "expected {name} to be invalid");
        }
    }

    #[test]
    fn test_deserialize_rejects_invalid() {
        let result: Result<EnvName, _> = serde_json::from_str("\"2BAD\"");
        assert!(result.is_err());

        let name: EnvName = serde_json::from_str("\"GOOD\"").unwrap();
        assert_eq!(name.as_str(), "GOOD");
    }
}
