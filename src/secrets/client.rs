//! Secret store trait and metadata types
//!
//! Defines the boundary to the remote secret store. Implementations are
//! network-bound and may fail per call; the resolution engine is responsible
//! for containing those failures.

use crate::errors::Result;
use crate::secrets::types::SecretString;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Metadata describing a single remote secret.
///
/// Supplied by the store per call and read-only to the engine. The `name` is
/// the store's fully-qualified resource name (for GCP,
/// `projects/<project>/secrets/<secret_id>`), while `secret_id` is the short
/// identifier used for key mapping, placeholder matching, and version
/// overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretMetadata {
    /// Fully-qualified resource name
    pub name: String,
    /// Short secret identifier (last path segment of `name`)
    pub secret_id: String,
}

impl SecretMetadata {
    /// Build metadata from a fully-qualified resource name, deriving the
    /// short identifier from the last path segment.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let secret_id = name.rsplit('/').next().unwrap_or(name.as_str()).to_string();
        Self { name, secret_id }
    }
}

/// Trait for remote secret stores.
///
/// Implementations must be Send + Sync for use in async contexts.
#[async_trait]
pub trait SecretStore: Send + Sync + std::fmt::Debug {
    /// List all secrets in the given project scope.
    ///
    /// `filter` is a store-specific server-side filter expression; an empty
    /// string means no filtering. Pagination is handled internally, so the
    /// returned vector covers every page.
    async fn list_secrets(&self, project: &str, filter: &str) -> Result<Vec<SecretMetadata>>;

    /// Access one version of a secret and decode its payload as UTF-8 text.
    ///
    /// `version` is either a fixed version label or the floating alias
    /// `"latest"`.
    async fn access_version(&self, resource_name: &str, version: &str) -> Result<SecretString>;

    /// Verify connectivity and permissions against the store.
    async fn health_check(&self, project: &str) -> Result<()>;
}
