//! Secret resolution and configuration merging.
//!
//! This module implements the provider's core engine:
//!
//! - **[`SecretStore`]**: async boundary to the remote secret store. The GCP
//!   Secret Manager implementation lives in [`gcp`] behind the `gcp` feature.
//! - **[`VersionCache`]**: per-pass cache keyed by immutable version identity,
//!   so a secret version referenced from several configuration keys is
//!   fetched exactly once.
//! - **[`placeholder`]**: scanner for `{GoogleSecret:<id>}` and
//!   `{GoogleSecret:<id>:<version>}` tokens in existing configuration values.
//! - **[`SecretResolver`]**: orchestrates enumeration, filtering, version
//!   resolution and sink writes, isolating failures per secret. Partial
//!   success is the normal outcome, never a crash.
//! - **[`GoogleSecretsSource`]**: bootstrap glue with an env-gated lenient
//!   path and a strict fail-fast constructor.
//!
//! # Example
//!
//! ```rust,ignore
//! use secretsync::{MemoryConfig, SecretResolver, SyncOptions};
//!
//! let options = SyncOptions::new("my-project")
//!     .with_version_override("api-key", "3");
//! let resolver = SecretResolver::new(options)?;
//!
//! let mut sink = MemoryConfig::new();
//! let summary = resolver.resolve(&store, &mut sink).await;
//! assert!(summary.failed.is_empty());
//! ```

pub mod cache;
pub mod client;
#[cfg(feature = "gcp")]
pub mod gcp;
pub mod options;
pub mod placeholder;
pub mod resolver;
pub mod source;
pub mod types;

// Re-export main types
pub use cache::{VersionCache, VersionIdentity};
pub use client::{SecretMetadata, SecretStore};
#[cfg(feature = "gcp")]
pub use gcp::GcpSecretStore;
pub use options::{SyncOptions, LATEST_VERSION};
pub use placeholder::PlaceholderReference;
pub use resolver::{LoadSummary, SecretResolver};
pub use source::{GoogleSecretsSource, GOOGLE_SECRETS_PROJECT_VAR};
pub use types::SecretString;
