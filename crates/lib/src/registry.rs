//! # Document Registry Client
//!
//! Retrieves a document's binary content and its stored metadata record from
//! the document registry. The registry's API requires an audit-trail identity
//! on every call, so the client takes it at construction time and attaches it
//! unconditionally.

use crate::errors::SuggestError;
use reqwest::Client as ReqwestClient;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// Default per-request timeout for registry calls.
pub const DEFAULT_REGISTRY_TIMEOUT: Duration = Duration::from_secs(30);

/// The audit-trail identity the registry demands on every request.
#[derive(Debug, Clone)]
pub struct AuditIdentity {
    /// Stable identifier of the acting user or system.
    pub user_id: String,
    /// Display name of the actor.
    pub user_representation: String,
    /// Reason recorded in the registry's audit log.
    pub remarks: String,
}

/// The stored document record as returned by the registry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub uuid: Uuid,
    pub bestandsnaam: String,
}

/// A client for the document registry's read endpoints.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    client: ReqwestClient,
    base_url: String,
    api_key: String,
    audit: AuditIdentity,
    timeout: Duration,
}

impl RegistryClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        audit: AuditIdentity,
    ) -> Result<Self, SuggestError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(SuggestError::ClientBuild)?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            audit,
            timeout: DEFAULT_REGISTRY_TIMEOUT,
        })
    }

    /// Overrides the per-request timeout. A hung registry otherwise stalls a
    /// whole generation run.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}{path}", self.base_url))
            .timeout(self.timeout)
            .header("Authorization", format!("Token {}", self.api_key))
            .header("Audit-User-ID", &self.audit.user_id)
            .header("Audit-User-Representation", &self.audit.user_representation)
            .header("Audit-Remarks", &self.audit.remarks)
    }

    /// Fetches the stored metadata record for a document, most importantly
    /// the original filename under which it was uploaded.
    pub async fn get_document(&self, document_id: Uuid) -> Result<DocumentRecord, SuggestError> {
        debug!(%document_id, "Fetching document record from registry");
        let response = self
            .get(&format!("/documenten/{document_id}"))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(SuggestError::Upstream(format!(
                "registry returned {} for document {document_id}",
                response.status()
            )));
        }
        response.json().await.map_err(SuggestError::Decode)
    }

    /// Downloads the binary content of a document.
    pub async fn download(&self, document_id: Uuid) -> Result<Vec<u8>, SuggestError> {
        debug!(%document_id, "Downloading document content from registry");
        let response = self
            .get(&format!("/documenten/{document_id}/download"))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(SuggestError::Upstream(format!(
                "registry download returned {} for document {document_id}",
                response.status()
            )));
        }
        Ok(response.bytes().await?.to_vec())
    }
}
