//! Resolution options
//!
//! User-configured, immutable once handed to the resolver. Key mapping and
//! eligibility filtering are plain function values so hosts can plug in their
//! own conventions without implementing a trait.

use crate::secrets::client::SecretMetadata;
use std::collections::HashMap;
use std::sync::Arc;

/// Floating alias for the newest version of a secret
pub const LATEST_VERSION: &str = "latest";

/// Maps secret metadata to a configuration key
pub type MapFn = Arc<dyn Fn(&SecretMetadata) -> String + Send + Sync>;

/// Decides whether a secret is exposed at all
pub type FilterFn = Arc<dyn Fn(&SecretMetadata) -> bool + Send + Sync>;

/// Options for one resolution pass.
#[derive(Clone)]
pub struct SyncOptions {
    /// Project scope to list secrets from. Empty means the provider is
    /// disabled (lenient path) or rejected at construction (strict path).
    pub project: String,
    /// Server-side list filter expression, empty for no filtering
    pub list_filter: String,
    /// Transform from secret metadata to a configuration key
    pub map_fn: MapFn,
    /// Eligibility predicate; secrets it rejects are skipped silently
    pub filter_fn: FilterFn,
    /// Pinned versions per secret id; unlisted secrets resolve `"latest"`
    pub version_overrides: HashMap<String, String>,
}

/// Default key mapping: the secret identifier with every double-underscore
/// replaced by the hierarchical separator, e.g. `Db__Password` → `Db:Password`.
pub fn default_key_mapping(metadata: &SecretMetadata) -> String {
    metadata.secret_id.replace("__", ":")
}

impl SyncOptions {
    /// Create options for the given project scope with default mapping
    /// (double-underscore to colon) and an accept-all filter.
    pub fn new(project: impl Into<String>) -> Self {
        Self { project: project.into(), ..Default::default() }
    }

    /// Set the server-side list filter expression
    pub fn with_list_filter(mut self, filter: impl Into<String>) -> Self {
        self.list_filter = filter.into();
        self
    }

    /// Replace the key-mapping function
    pub fn with_map_fn(
        mut self,
        map_fn: impl Fn(&SecretMetadata) -> String + Send + Sync + 'static,
    ) -> Self {
        self.map_fn = Arc::new(map_fn);
        self
    }

    /// Replace the eligibility filter
    pub fn with_filter_fn(
        mut self,
        filter_fn: impl Fn(&SecretMetadata) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.filter_fn = Arc::new(filter_fn);
        self
    }

    /// Pin one secret to a fixed version
    pub fn with_version_override(
        mut self,
        secret_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        self.version_overrides.insert(secret_id.into(), version.into());
        self
    }

    /// Version label to use for a secret's mapped-key write
    pub fn version_for(&self, secret_id: &str) -> &str {
        self.version_overrides.get(secret_id).map(String::as_str).unwrap_or(LATEST_VERSION)
    }
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            project: String::new(),
            list_filter: String::new(),
            map_fn: Arc::new(default_key_mapping),
            filter_fn: Arc::new(|_| true),
            version_overrides: HashMap::new(),
        }
    }
}

impl std::fmt::Debug for SyncOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncOptions")
            .field("project", &self.project)
            .field("list_filter", &self.list_filter)
            .field("version_overrides", &self.version_overrides)
            .field("map_fn", &"[fn]")
            .field("filter_fn", &"[fn]")
            .finish()
    }
}
