//! End-to-end resolution tests against an in-memory mock store.

use async_trait::async_trait;
use secretsync::errors::{Error, Result};
use secretsync::{
    ConfigurationSink, MemoryConfig, SecretMetadata, SecretResolver, SecretStore, SecretString,
    SyncOptions,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tracing_test::traced_test;

/// Mock secret store with scripted contents and call recording.
#[derive(Debug, Default)]
struct MockStore {
    project: String,
    secrets: Vec<SecretMetadata>,
    /// (resource_name, version) -> plaintext
    values: HashMap<(String, String), String>,
    /// resource names whose access always fails
    deny_access: HashSet<String>,
    fail_listing: bool,
    list_calls: AtomicUsize,
    access_calls: Mutex<Vec<(String, String)>>,
}

impl MockStore {
    fn new(project: &str) -> Self {
        Self { project: project.to_string(), ..Default::default() }
    }

    fn resource_name(&self, secret_id: &str) -> String {
        format!("projects/{}/secrets/{}", self.project, secret_id)
    }

    /// Register a secret whose latest version resolves to `value`.
    fn with_secret(mut self, secret_id: &str, value: &str) -> Self {
        let name = self.resource_name(secret_id);
        self.secrets.push(SecretMetadata::new(&name));
        self.values.insert((name, "latest".to_string()), value.to_string());
        self
    }

    /// Add a pinned version value for an already-registered secret.
    fn with_version(mut self, secret_id: &str, version: &str, value: &str) -> Self {
        let name = self.resource_name(secret_id);
        self.values.insert((name, version.to_string()), value.to_string());
        self
    }

    /// Register a secret whose versions can never be accessed.
    fn with_denied_secret(mut self, secret_id: &str) -> Self {
        let name = self.resource_name(secret_id);
        self.secrets.push(SecretMetadata::new(&name));
        self.deny_access.insert(name);
        self
    }

    fn with_failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    fn access_count(&self) -> usize {
        self.access_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl SecretStore for MockStore {
    async fn list_secrets(&self, _project: &str, _filter: &str) -> Result<Vec<SecretMetadata>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_listing {
            return Err(Error::store("listing unavailable"));
        }
        Ok(self.secrets.clone())
    }

    async fn access_version(&self, resource_name: &str, version: &str) -> Result<SecretString> {
        self.access_calls
            .lock()
            .unwrap()
            .push((resource_name.to_string(), version.to_string()));

        if self.deny_access.contains(resource_name) {
            return Err(Error::permission_denied(resource_name, "access denied"));
        }
        self.values
            .get(&(resource_name.to_string(), version.to_string()))
            .map(|v| SecretString::new(v.clone()))
            .ok_or_else(|| Error::not_found(format!("{}/versions/{}", resource_name, version)))
    }

    async fn health_check(&self, _project: &str) -> Result<()> {
        Ok(())
    }
}

fn resolver(options: SyncOptions) -> SecretResolver {
    SecretResolver::new(options).expect("valid options")
}

#[tokio::test]
async fn eligible_secrets_land_under_their_mapped_keys() {
    let store = MockStore::new("p")
        .with_secret("Db__Password", "hunter2")
        .with_secret("api-key", "abc123");
    let mut sink = MemoryConfig::new();

    let summary = resolver(SyncOptions::new("p")).resolve(&store, &mut sink).await;

    assert!(summary.is_clean());
    assert_eq!(summary.loaded, 2);
    // Default mapping turns double underscores into the hierarchy separator
    assert_eq!(sink.get("Db:Password"), Some("hunter2"));
    assert_eq!(sink.get("api-key"), Some("abc123"));
}

#[tokio::test]
async fn placeholder_value_is_overwritten_with_resolved_secret() {
    let store = MockStore::new("p").with_secret("db-pass", "s3cr3t");
    let mut sink = MemoryConfig::new();
    sink.set("Db:Password", "{GoogleSecret:db-pass}");

    let summary = resolver(SyncOptions::new("p")).resolve(&store, &mut sink).await;

    assert!(summary.is_clean());
    assert_eq!(sink.get("Db:Password"), Some("s3cr3t"));
    // The mapped-key pass also fires for the same secret
    assert_eq!(sink.get("db-pass"), Some("s3cr3t"));
}

#[tokio::test]
async fn placeholder_with_pinned_version_resolves_that_version() {
    let store = MockStore::new("p")
        .with_secret("db-pass", "newest")
        .with_version("db-pass", "2", "older");
    let mut sink = MemoryConfig::new();
    sink.set("Db:Password", "{GoogleSecret:db-pass:2}");

    resolver(SyncOptions::new("p")).resolve(&store, &mut sink).await;

    assert_eq!(sink.get("Db:Password"), Some("older"));
    // Mapped key still resolves latest
    assert_eq!(sink.get("db-pass"), Some("newest"));
}

#[tokio::test]
async fn same_version_is_fetched_exactly_once_per_pass() {
    let store = MockStore::new("p").with_secret("db-pass", "s3cr3t");
    let mut sink = MemoryConfig::new();
    // Two placeholders plus the mapped key, all against latest
    sink.set("Db:Password", "{GoogleSecret:db-pass}");
    sink.set("Backup:Password", "{GoogleSecret:db-pass}");

    let summary = resolver(SyncOptions::new("p")).resolve(&store, &mut sink).await;

    assert!(summary.is_clean());
    assert_eq!(sink.get("Db:Password"), Some("s3cr3t"));
    assert_eq!(sink.get("Backup:Password"), Some("s3cr3t"));
    assert_eq!(sink.get("db-pass"), Some("s3cr3t"));
    assert_eq!(store.access_count(), 1);
}

#[tokio::test]
async fn distinct_versions_are_fetched_separately() {
    let store = MockStore::new("p")
        .with_secret("db-pass", "newest")
        .with_version("db-pass", "1", "first");
    let mut sink = MemoryConfig::new();
    sink.set("Old:Password", "{GoogleSecret:db-pass:1}");

    resolver(SyncOptions::new("p")).resolve(&store, &mut sink).await;

    assert_eq!(sink.get("Old:Password"), Some("first"));
    assert_eq!(sink.get("db-pass"), Some("newest"));
    assert_eq!(store.access_count(), 2);
}

#[traced_test]
#[tokio::test]
async fn one_failing_secret_does_not_block_the_rest() {
    let store = MockStore::new("p").with_denied_secret("broken").with_secret("healthy", "ok");
    let mut sink = MemoryConfig::new();

    let summary = resolver(SyncOptions::new("p")).resolve(&store, &mut sink).await;

    assert_eq!(summary.loaded, 1);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].0, "broken");
    assert_eq!(sink.get("healthy"), Some("ok"));
    assert_eq!(sink.get("broken"), None);
    assert!(logs_contain("Skipping secret"));
}

#[tokio::test]
async fn version_override_takes_precedence_over_latest() {
    let store = MockStore::new("p")
        .with_secret("secretX", "latest-value")
        .with_version("secretX", "3", "pinned-value");
    let mut sink = MemoryConfig::new();

    let options = SyncOptions::new("p").with_version_override("secretX", "3");
    resolver(options).resolve(&store, &mut sink).await;

    assert_eq!(sink.get("secretX"), Some("pinned-value"));
}

#[tokio::test]
async fn filtered_secret_produces_no_writes() {
    let store = MockStore::new("p").with_secret("a", "va").with_secret("b", "vb");
    let mut sink = MemoryConfig::new();

    let options = SyncOptions::new("p").with_filter_fn(|meta| meta.secret_id != "a");
    let summary = resolver(options).resolve(&store, &mut sink).await;

    assert_eq!(summary.loaded, 1);
    assert_eq!(summary.filtered, 1);
    assert_eq!(sink.get("a"), None);
    assert_eq!(sink.get("b"), Some("vb"));
}

#[tokio::test]
async fn custom_mapper_controls_the_target_key() {
    let store = MockStore::new("p").with_secret("token", "tok");
    let mut sink = MemoryConfig::new();

    let options = SyncOptions::new("p").with_map_fn(|meta| format!("Secrets:{}", meta.secret_id));
    resolver(options).resolve(&store, &mut sink).await;

    assert_eq!(sink.get("Secrets:token"), Some("tok"));
}

#[tokio::test]
async fn panicking_mapper_is_confined_to_its_secret() {
    let store = MockStore::new("p").with_secret("good", "v1").with_secret("explodes", "v2");
    let mut sink = MemoryConfig::new();

    let options = SyncOptions::new("p").with_map_fn(|meta| {
        if meta.secret_id == "explodes" {
            panic!("user mapper bug");
        }
        meta.secret_id.clone()
    });
    let summary = resolver(options).resolve(&store, &mut sink).await;

    assert_eq!(summary.loaded, 1);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].0, "explodes");
    assert_eq!(sink.get("good"), Some("v1"));
}

#[tokio::test]
async fn listing_failure_leaves_configuration_untouched() {
    let store = MockStore::new("p").with_secret("db-pass", "s3cr3t").with_failing_listing();
    let mut sink = MemoryConfig::new();
    sink.set("Db:Password", "{GoogleSecret:db-pass}");

    let summary = resolver(SyncOptions::new("p")).resolve(&store, &mut sink).await;

    assert!(summary.enumeration_error.is_some());
    assert_eq!(summary.loaded, 0);
    assert_eq!(sink.get("Db:Password"), Some("{GoogleSecret:db-pass}"));
    assert_eq!(store.access_count(), 0);
}

#[tokio::test]
async fn second_pass_resolves_latest_afresh() {
    // The cache is per pass; a reload observes new "latest" values.
    let mut store = MockStore::new("p").with_secret("db-pass", "first");
    let mut sink = MemoryConfig::new();

    let engine = resolver(SyncOptions::new("p"));
    engine.resolve(&store, &mut sink).await;
    assert_eq!(sink.get("db-pass"), Some("first"));

    store
        .values
        .insert(("projects/p/secrets/db-pass".to_string(), "latest".to_string()), "second".into());
    engine.resolve(&store, &mut sink).await;

    assert_eq!(sink.get("db-pass"), Some("second"));
    assert_eq!(store.access_count(), 2);
}

#[tokio::test]
async fn mapped_key_write_wins_over_placeholder_on_collision() {
    // A placeholder stored under the key the mapper would also produce:
    // both passes write the same key, mapped-key pass last.
    let store = MockStore::new("p")
        .with_secret("db-pass", "latest-value")
        .with_version("db-pass", "1", "old-value");
    let mut sink = MemoryConfig::new();
    sink.set("db-pass", "{GoogleSecret:db-pass:1}");

    resolver(SyncOptions::new("p")).resolve(&store, &mut sink).await;

    assert_eq!(sink.get("db-pass"), Some("latest-value"));
}
