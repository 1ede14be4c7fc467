//! Version cache for reducing store calls
//!
//! In-memory cache for fetched secret versions, scoped to a single resolution
//! pass. A secret version is immutable once published, so there is no TTL and
//! no eviction; the cache is cleared at the start of every pass and discarded
//! with the resolver.

use crate::secrets::types::SecretString;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Cache key combining a secret's resource name and a version label.
///
/// `"latest"` is cached under its own identity: within one pass the floating
/// alias is treated as stable, which is what makes the placeholder pass and
/// the mapped-key pass share a single fetch.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct VersionIdentity {
    pub resource_name: String,
    pub version: String,
}

impl VersionIdentity {
    pub fn new(resource_name: impl Into<String>, version: impl Into<String>) -> Self {
        Self { resource_name: resource_name.into(), version: version.into() }
    }

    /// Store-facing version path, e.g. `projects/p/secrets/s/versions/latest`.
    pub fn version_name(&self) -> String {
        format!("{}/versions/{}", self.resource_name, self.version)
    }
}

/// Per-pass cache of fetched secret versions
#[derive(Debug, Default)]
pub struct VersionCache {
    inner: Arc<RwLock<HashMap<VersionIdentity, SecretString>>>,
}

impl VersionCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cached value if present
    pub async fn get(&self, identity: &VersionIdentity) -> Option<SecretString> {
        let cache = self.inner.read().await;
        let value = cache.get(identity).cloned();
        if value.is_some() {
            debug!(version = %identity.version_name(), "Cache hit for secret version");
        }
        value
    }

    /// Insert a value, keeping the existing one if the identity is already
    /// cached.
    ///
    /// Versions are immutable, so an existing entry is authoritative and is
    /// returned unchanged rather than silently overwritten.
    pub async fn insert(&self, identity: VersionIdentity, value: SecretString) -> SecretString {
        let mut cache = self.inner.write().await;
        cache.entry(identity).or_insert(value).clone()
    }

    /// Drop all entries. Called at the start of every resolution pass.
    pub async fn clear(&self) {
        let mut cache = self.inner.write().await;
        debug!(entries = cache.len(), "Clearing version cache");
        cache.clear();
    }

    /// Number of cached versions
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Check if the cache is empty
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

impl Clone for VersionCache {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}
