//! Bootstrap glue for registering the provider
//!
//! Two call paths mirror how hosts opt in:
//!
//! - **Lenient** ([`GoogleSecretsSource::from_env`]): the presence of the
//!   `GOOGLE_SECRETS_PROJECT` environment variable is the sole gate. When it
//!   is unset or blank the provider simply is not registered; loading secrets
//!   is optional infrastructure, not a hard dependency of boot.
//! - **Strict** ([`GoogleSecretsSource::new`]): the caller supplies options
//!   explicitly and an empty project scope is a construction-time error, so
//!   misconfiguration fails fast.
//!
//! Reading the environment happens here and only here; the resolver itself
//! takes fully-built options.

use crate::config::ConfigurationSink;
use crate::errors::Result;
use crate::secrets::client::SecretStore;
use crate::secrets::options::SyncOptions;
use crate::secrets::resolver::{LoadSummary, SecretResolver};
use tracing::info;

/// Environment variable naming the secret-store project scope
pub const GOOGLE_SECRETS_PROJECT_VAR: &str = "GOOGLE_SECRETS_PROJECT";

/// A registered secret-configuration source.
#[derive(Debug)]
pub struct GoogleSecretsSource {
    resolver: SecretResolver,
}

impl GoogleSecretsSource {
    /// Strict path: build from explicit options, rejecting an empty project.
    pub fn new(options: SyncOptions) -> Result<Self> {
        Ok(Self { resolver: SecretResolver::new(options)? })
    }

    /// Lenient path: build with default options when `GOOGLE_SECRETS_PROJECT`
    /// is set, `None` when it is absent or blank (feature disabled).
    pub fn from_env() -> Option<Self> {
        Self::from_env_with(SyncOptions::default())
    }

    /// Lenient path with customized options; the project scope always comes
    /// from the environment, overriding whatever the options carry.
    pub fn from_env_with(options: SyncOptions) -> Option<Self> {
        let project = std::env::var(GOOGLE_SECRETS_PROJECT_VAR).ok()?;
        if project.trim().is_empty() {
            return None;
        }

        info!(project = %project, "Google secrets provider enabled via environment");
        let options = SyncOptions { project, ..options };
        // Project is known non-empty, so the strict constructor cannot fail
        SecretResolver::new(options).ok().map(|resolver| Self { resolver })
    }

    /// Run one resolution pass. See [`SecretResolver::resolve`].
    pub async fn load(
        &self,
        store: &dyn SecretStore,
        sink: &mut dyn ConfigurationSink,
    ) -> LoadSummary {
        self.resolver.resolve(store, sink).await
    }
}
