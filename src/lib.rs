//! # Secretsync
//!
//! Secretsync is a configuration-provider library that synchronizes secrets
//! held in Google Secret Manager (or any [`SecretStore`] implementation) into
//! an application's layered runtime configuration.
//!
//! ## Architecture
//!
//! ```text
//! Secret Store (GCP) → Resolution Engine → Configuration Sink
//!         ↓                   ↓
//!   Version Cache     Placeholder Resolver
//! ```
//!
//! ## Core Components
//!
//! - **Secret Store**: async client boundary for listing secrets and accessing
//!   secret versions ([`secrets::SecretStore`], with a GCP implementation
//!   behind the `gcp` feature)
//! - **Resolution Engine**: enumerates and filters secrets, resolves versions,
//!   and writes values into the sink with per-secret failure isolation
//!   ([`secrets::SecretResolver`])
//! - **Placeholder Resolver**: rewrites `{GoogleSecret:...}` tokens found in
//!   existing configuration values ([`secrets::placeholder`])
//! - **Configuration Sink**: the mutable key/value store the engine writes
//!   into ([`config::ConfigurationSink`])
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use secretsync::{GoogleSecretsSource, MemoryConfig, SyncOptions};
//! # async fn run(store: impl secretsync::SecretStore) -> secretsync::Result<()> {
//! let source = GoogleSecretsSource::new(SyncOptions::new("my-project"))?;
//! let mut sink = MemoryConfig::new();
//! let summary = source.load(&store, &mut sink).await;
//! tracing::info!(loaded = summary.loaded, "secrets merged into configuration");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod observability;
pub mod secrets;

// Re-export commonly used types and traits
pub use config::{ConfigurationSink, MemoryConfig};
pub use errors::{Error, Result};
pub use observability::init_tracing;
pub use secrets::{
    GoogleSecretsSource, LoadSummary, SecretMetadata, SecretResolver, SecretStore, SecretString,
    SyncOptions,
};

/// Library version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
