//! Placeholder scanning for existing configuration values
//!
//! A configuration value can reference a secret with the literal token
//! `{GoogleSecret:<secretId>}` or `{GoogleSecret:<secretId>:<version>}`.
//! Scanning is a stateless function of the snapshot and the secret id:
//! matches come back in snapshot order, and malformed tokens (missing closing
//! brace, wrong secret id) are simply non-matches, never errors.

use crate::errors::{Error, Result};
use crate::secrets::options::LATEST_VERSION;
use regex::Regex;

/// A placeholder reference found in an existing configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderReference {
    /// The configuration key whose value contained the placeholder
    pub config_key: String,
    /// The referenced secret identifier
    pub secret_id: String,
    /// The referenced version label, `"latest"` when omitted
    pub version: String,
}

/// Scan a configuration snapshot for placeholder references to one secret.
pub fn find_references(
    snapshot: &[(String, String)],
    secret_id: &str,
) -> Result<Vec<PlaceholderReference>> {
    // Token grammar: {GoogleSecret:<secretId>} or {GoogleSecret:<secretId>:<version>}
    let pattern = format!(r"\{{GoogleSecret:{}(?::(\w+))?\}}", regex::escape(secret_id));
    let regex = Regex::new(&pattern)
        .map_err(|e| Error::internal(format!("invalid placeholder pattern: {}", e)))?;

    let mut references = Vec::new();
    for (key, value) in snapshot {
        if value.is_empty() {
            continue;
        }
        if let Some(captures) = regex.captures(value) {
            let version = captures
                .get(1)
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| LATEST_VERSION.to_string());
            references.push(PlaceholderReference {
                config_key: key.clone(),
                secret_id: secret_id.to_string(),
                version,
            });
        }
    }
    Ok(references)
}
