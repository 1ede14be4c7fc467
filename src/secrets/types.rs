//! Secure types for handling resolved secret values.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A string wrapper that redacts its contents in Debug, Display, and
/// serialization, and zeroes its memory on drop.
///
/// Every value fetched from the secret store travels through this type, so a
/// stray `{:?}` in a log line or a serialized summary can never leak
/// plaintext. The actual value is only reachable through
/// [`expose_secret`](Self::expose_secret), which the resolver calls at the
/// single point where a value is written into the configuration sink.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretString(String);

impl SecretString {
    /// Creates a new SecretString from a string value.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Exposes the underlying secret value. Never log or print the result.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// Returns the length of the secret without exposing the value.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the secret is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for SecretString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Never serialize the actual secret value
        serializer.serialize_str("[REDACTED]")
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(SecretString(value))
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretString([REDACTED])")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for SecretString {}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_and_display_redact() {
        let secret = SecretString::new("s3cr3t-value");

        assert_eq!(format!("{:?}", secret), "SecretString([REDACTED])");
        assert_eq!(format!("{}", secret), "[REDACTED]");
    }

    #[test]
    fn test_expose_secret() {
        let secret = SecretString::new("s3cr3t-value");
        assert_eq!(secret.expose_secret(), "s3cr3t-value");
        assert_eq!(secret.len(), 12);
        assert!(!secret.is_empty());
    }

    #[test]
    fn test_serialization_redacts() {
        let secret = SecretString::new("s3cr3t-value");
        let json = serde_json::to_string(&secret).unwrap();

        assert_eq!(json, "\"[REDACTED]\"");
        assert!(!json.contains("s3cr3t"));
    }

    #[test]
    fn test_deserialization_accepts_values() {
        let secret: SecretString = serde_json::from_str("\"actual-value\"").unwrap();
        assert_eq!(secret.expose_secret(), "actual-value");
    }

    #[test]
    fn test_equality() {
        assert_eq!(SecretString::new("same"), SecretString::new("same"));
        assert_ne!(SecretString::new("same"), SecretString::new("other"));
    }
}
