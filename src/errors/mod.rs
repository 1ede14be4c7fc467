//! # Error Handling
//!
//! Error types for secret resolution and configuration merging, defined with
//! `thiserror`.

use thiserror::Error;

/// Custom result type for secretsync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for secret resolution
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid provider options (e.g. missing project on the strict call path)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Secret or secret version not found in the store
    #[error("Secret not found: {reference}")]
    NotFound { reference: String },

    /// The store rejected the request for lack of permissions
    #[error("Permission denied accessing '{reference}': {message}")]
    PermissionDenied { reference: String, message: String },

    /// Transport or store-side failure
    #[error("Secret store error: {0}")]
    Store(String),

    /// Secret payload could not be decoded as UTF-8 text
    #[error("Invalid payload for '{reference}': {reason}")]
    InvalidPayload { reference: String, reason: String },

    /// Internal errors, including panics from user-supplied callbacks
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(reference: S) -> Self {
        Self::NotFound { reference: reference.into() }
    }

    /// Create a new permission-denied error
    pub fn permission_denied<R: Into<String>, M: Into<String>>(reference: R, message: M) -> Self {
        Self::PermissionDenied { reference: reference.into(), message: message.into() }
    }

    /// Create a new store error
    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store(message.into())
    }

    /// Create a new invalid-payload error
    pub fn invalid_payload<R: Into<String>, M: Into<String>>(reference: R, reason: M) -> Self {
        Self::InvalidPayload { reference: reference.into(), reason: reason.into() }
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_constructors() {
        let err = Error::not_found("projects/p/secrets/db-pass");
        assert!(matches!(err, Error::NotFound { .. }));
        assert_eq!(err.to_string(), "Secret not found: projects/p/secrets/db-pass");

        let err = Error::config("project name is empty");
        assert!(matches!(err, Error::Config(_)));

        let err = Error::permission_denied("db-pass", "missing role");
        assert!(err.to_string().contains("db-pass"));
        assert!(err.to_string().contains("missing role"));
    }

    #[test]
    fn test_error_display() {
        let err = Error::invalid_payload("db-pass", "not valid UTF-8");
        assert!(err.to_string().contains("Invalid payload"));
        assert!(err.to_string().contains("db-pass"));
    }
}
