//! GCP Secret Manager store implementation
//!
//! Lists secrets and accesses secret versions in Google Secret Manager.
//! Compiled only with the `gcp` feature.
//!
//! ## Authentication
//!
//! Uses a service account key named by `GOOGLE_APPLICATION_CREDENTIALS`.
//! On GCE/Cloud Run/GKE the ambient service account also works through
//! Application Default Credentials.

use crate::errors::{Error, Result};
use crate::secrets::client::{SecretMetadata, SecretStore};
use crate::secrets::types::SecretString;
use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use google_secretmanager1::{hyper_rustls, hyper_util, SecretManager};

/// GCP Secret Manager store
pub struct GcpSecretStore {
    hub: SecretManager<
        hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>,
    >,
}

impl std::fmt::Debug for GcpSecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GcpSecretStore").field("hub", &"[SecretManager]").finish()
    }
}

impl GcpSecretStore {
    /// Create a new store, building the HTTPS client and authenticator.
    pub async fn new() -> Result<Self> {
        let client =
            hyper_util::client::legacy::Client::builder(hyper_util::rt::TokioExecutor::new())
                .build(
                    hyper_rustls::HttpsConnectorBuilder::new()
                        .with_native_roots()
                        .map_err(|e| {
                            Error::config(format!("Failed to load native TLS roots: {}", e))
                        })?
                        .https_or_http()
                        .enable_http2()
                        .build(),
                );

        let auth = yup_oauth2::ServiceAccountAuthenticator::builder(
            yup_oauth2::read_service_account_key(
                std::env::var("GOOGLE_APPLICATION_CREDENTIALS").unwrap_or_else(|_| "".to_string()),
            )
            .await
            .map_err(|e| {
                Error::config(format!(
                    "Failed to read GCP credentials. Set GOOGLE_APPLICATION_CREDENTIALS or \
                    run on GCP with a service account: {}",
                    e
                ))
            })?,
        )
        .build()
        .await
        .map_err(|e| Error::config(format!("Failed to build GCP authenticator: {}", e)))?;

        let hub = SecretManager::new(client, auth);

        info!("Initialized GCP Secret Manager store");

        Ok(Self { hub })
    }
}

/// Classify a GCP API error by its status text
fn classify_error(reference: &str, error: impl std::fmt::Display) -> Error {
    let err_str = error.to_string();
    if err_str.contains("NOT_FOUND") || err_str.contains("404") {
        Error::not_found(reference)
    } else if err_str.contains("PERMISSION_DENIED") || err_str.contains("403") {
        Error::permission_denied(reference, err_str)
    } else {
        Error::store(format!("'{}': {}", reference, err_str))
    }
}

#[async_trait]
impl SecretStore for GcpSecretStore {
    async fn list_secrets(&self, project: &str, filter: &str) -> Result<Vec<SecretMetadata>> {
        let parent = format!("projects/{}", project);
        let mut secrets = Vec::new();
        let mut page_token: Option<String> = None;

        // One RPC per page of server-defined size
        loop {
            let mut call = self.hub.projects().secrets_list(&parent);
            if !filter.is_empty() {
                call = call.filter(filter);
            }
            if let Some(token) = page_token.as_deref() {
                call = call.page_token(token);
            }

            let (_, response) = call.doit().await.map_err(|e| {
                error!(project = %project, error = %e, "Failed to list secrets");
                classify_error(&parent, e)
            })?;

            for secret in response.secrets.unwrap_or_default() {
                match secret.name {
                    Some(name) => secrets.push(SecretMetadata::new(name)),
                    None => warn!(project = %project, "Skipping listed secret without a name"),
                }
            }

            match response.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!(project = %project, count = secrets.len(), "Listed secrets");
        Ok(secrets)
    }

    async fn access_version(&self, resource_name: &str, version: &str) -> Result<SecretString> {
        let version_name = format!("{}/versions/{}", resource_name, version);

        debug!(version = %version_name, "Accessing secret version");

        let (_, response) = self
            .hub
            .projects()
            .secrets_versions_access(&version_name)
            .doit()
            .await
            .map_err(|e| classify_error(&version_name, e))?;

        let data = response
            .payload
            .and_then(|payload| payload.data)
            .ok_or_else(|| Error::invalid_payload(&version_name, "empty payload"))?;

        if data.is_empty() {
            return Err(Error::invalid_payload(&version_name, "empty payload"));
        }

        let text = String::from_utf8(data)
            .map_err(|e| Error::invalid_payload(&version_name, format!("not UTF-8: {}", e)))?;

        Ok(SecretString::new(text))
    }

    async fn health_check(&self, project: &str) -> Result<()> {
        let parent = format!("projects/{}", project);

        // List with page size 1 to verify connectivity and permissions
        match self.hub.projects().secrets_list(&parent).page_size(1).doit().await {
            Ok(_) => {
                debug!(project = %project, "GCP Secret Manager health check passed");
                Ok(())
            }
            Err(e) => {
                error!(project = %project, error = %e, "GCP Secret Manager health check failed");
                Err(classify_error(&parent, e))
            }
        }
    }
}
