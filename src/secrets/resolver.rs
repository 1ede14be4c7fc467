//! Resolution engine
//!
//! Orchestrates one resolution pass: enumerate secrets, filter, rewrite
//! placeholders, write mapped keys, resolve versions through the cache. All
//! store and user-callback failures are contained here; nothing escapes to
//! the bootstrap layer.

use crate::config::ConfigurationSink;
use crate::errors::{Error, Result};
use crate::secrets::cache::{VersionCache, VersionIdentity};
use crate::secrets::client::{SecretMetadata, SecretStore};
use crate::secrets::options::SyncOptions;
use crate::secrets::placeholder;
use crate::secrets::types::SecretString;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{debug, error, info, warn};

/// Outcome of one resolution pass.
///
/// Partial success is the normal case: secrets that failed are listed with a
/// reason, and everything that resolved before or after them is already in
/// the sink. The pass itself never surfaces an error.
#[derive(Debug, Clone, Default)]
pub struct LoadSummary {
    /// Secrets whose mapped key (and any placeholder keys) were written
    pub loaded: usize,
    /// Secrets rejected by the eligibility filter
    pub filtered: usize,
    /// Per-secret failures as `(secret_id, reason)`
    pub failed: Vec<(String, String)>,
    /// Set when listing secrets failed and the pass wrote nothing
    pub enumeration_error: Option<String>,
}

impl LoadSummary {
    /// True when every enumerated secret either loaded or was filtered out
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.enumeration_error.is_none()
    }
}

/// The secret resolution engine.
///
/// Owns the per-pass [`VersionCache`] and the user-supplied [`SyncOptions`].
/// Construction is strict: an empty project scope is rejected immediately so
/// misconfiguration fails at setup time rather than silently at load time.
#[derive(Debug)]
pub struct SecretResolver {
    options: SyncOptions,
    cache: VersionCache,
}

impl SecretResolver {
    /// Create a resolver, failing fast if the project scope is empty.
    pub fn new(options: SyncOptions) -> Result<Self> {
        if options.project.trim().is_empty() {
            return Err(Error::config("project scope must not be empty"));
        }
        Ok(Self { options, cache: VersionCache::new() })
    }

    /// Run one resolution pass against the store, writing into the sink.
    ///
    /// The sink is snapshotted once before the first write, so the engine
    /// never observes its own output as a placeholder. For each eligible
    /// secret, placeholder-driven writes happen first and the mapped-key
    /// write last; if both target the same key, the mapped-key write wins,
    /// consistent with the sink's last-writer-wins rule.
    ///
    /// Never returns an error: enumeration failure aborts the pass with the
    /// configuration untouched, and any per-secret failure only skips that
    /// secret. Both are recorded in the returned [`LoadSummary`].
    pub async fn resolve(
        &self,
        store: &dyn SecretStore,
        sink: &mut dyn ConfigurationSink,
    ) -> LoadSummary {
        let mut summary = LoadSummary::default();

        if self.options.project.trim().is_empty() {
            warn!("Project scope is not set, skipping secret resolution");
            return summary;
        }

        // Each pass resolves "latest" afresh
        self.cache.clear().await;

        let snapshot = sink.entries();

        let secrets =
            match store.list_secrets(&self.options.project, &self.options.list_filter).await {
                Ok(secrets) => secrets,
                Err(e) => {
                    error!(
                        project = %self.options.project,
                        error = %e,
                        "Failed to list secrets, configuration left unchanged"
                    );
                    summary.enumeration_error = Some(e.to_string());
                    return summary;
                }
            };

        debug!(project = %self.options.project, count = secrets.len(), "Enumerated secrets");

        for secret in &secrets {
            match self.sync_secret(store, sink, &snapshot, secret).await {
                Ok(true) => summary.loaded += 1,
                Ok(false) => {
                    debug!(secret_id = %secret.secret_id, "Secret rejected by filter");
                    summary.filtered += 1;
                }
                Err(e) => {
                    warn!(secret_id = %secret.secret_id, error = %e, "Skipping secret");
                    summary.failed.push((secret.secret_id.clone(), e.to_string()));
                }
            }
        }

        info!(
            project = %self.options.project,
            loaded = summary.loaded,
            filtered = summary.filtered,
            failed = summary.failed.len(),
            "Secret resolution pass complete"
        );
        summary
    }

    /// Process a single secret. Returns `Ok(false)` when the eligibility
    /// filter rejected it, `Ok(true)` when its writes landed.
    async fn sync_secret(
        &self,
        store: &dyn SecretStore,
        sink: &mut dyn ConfigurationSink,
        snapshot: &[(String, String)],
        secret: &SecretMetadata,
    ) -> Result<bool> {
        if !self.apply_filter(secret)? {
            return Ok(false);
        }

        // Placeholder pass: rewrite existing values referencing this secret
        for reference in placeholder::find_references(snapshot, &secret.secret_id)? {
            let value = self.resolve_version(store, &secret.name, &reference.version).await?;
            sink.set(&reference.config_key, value.expose_secret());
            debug!(
                secret_id = %secret.secret_id,
                key = %reference.config_key,
                version = %reference.version,
                "Replaced placeholder with secret value"
            );
        }

        // Mapped-key pass: one write under the user-mapped key
        let key = self.apply_map(secret)?;
        let version = self.options.version_for(&secret.secret_id);
        let value = self.resolve_version(store, &secret.name, version).await?;
        sink.set(&key, value.expose_secret());
        info!(
            secret_id = %secret.secret_id,
            key = %key,
            version = %version,
            "Loaded secret into configuration"
        );

        Ok(true)
    }

    /// Resolve one version, going to the store only on a cache miss.
    async fn resolve_version(
        &self,
        store: &dyn SecretStore,
        resource_name: &str,
        version: &str,
    ) -> Result<SecretString> {
        let identity = VersionIdentity::new(resource_name, version);
        if let Some(cached) = self.cache.get(&identity).await {
            return Ok(cached);
        }
        let value = store.access_version(resource_name, version).await?;
        Ok(self.cache.insert(identity, value).await)
    }

    // User closures run inside catch_unwind so a panicking callback is
    // confined to the one secret being processed.

    fn apply_filter(&self, secret: &SecretMetadata) -> Result<bool> {
        catch_unwind(AssertUnwindSafe(|| (self.options.filter_fn)(secret))).map_err(|_| {
            Error::internal(format!("eligibility filter panicked for '{}'", secret.secret_id))
        })
    }

    fn apply_map(&self, secret: &SecretMetadata) -> Result<String> {
        catch_unwind(AssertUnwindSafe(|| (self.options.map_fn)(secret))).map_err(|_| {
            Error::internal(format!("key mapper panicked for '{}'", secret.secret_id))
        })
    }
}
