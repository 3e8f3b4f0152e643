//! # Extraction Service Client
//!
//! Talks to the external AI-backed extraction service: a bounded-timeout
//! health probe that gates whether the feature is offered at all, and the
//! multipart upload that produces a structured metadata payload. The two
//! operations carry separate timeouts since inference is materially slower
//! than a health check.

use crate::{errors::SuggestError, types::ExtractionEnvelope};
use reqwest::{multipart, Client as ReqwestClient};
use std::time::Duration;
use tracing::{debug, warn};

/// Default timeout for the health probe.
pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_secs(30);
/// Default timeout for a generation call.
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(120);

/// A client for the extraction service.
#[derive(Debug, Clone)]
pub struct ExtractionClient {
    client: ReqwestClient,
    base_url: String,
    health_timeout: Duration,
    generation_timeout: Duration,
}

impl ExtractionClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, SuggestError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(SuggestError::ClientBuild)?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            health_timeout: DEFAULT_HEALTH_TIMEOUT,
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
        })
    }

    pub fn with_timeouts(mut self, health: Duration, generation: Duration) -> Self {
        self.health_timeout = health;
        self.generation_timeout = generation;
        self
    }

    /// Probes the extraction service's health endpoint.
    ///
    /// Returns `false` on any non-success status, timeout, or network error;
    /// this method never fails. No retries are made here, callers may re-poll
    /// on their own schedule.
    pub async fn health(&self) -> bool {
        let result = self
            .client
            .get(format!("{}/health", self.base_url))
            .timeout(self.health_timeout)
            .send()
            .await;
        match result {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                warn!(status = %response.status(), "Extraction service health check failed");
                false
            }
            Err(e) => {
                warn!("Extraction service unreachable: {e}");
                false
            }
        }
    }

    /// Uploads a document's binary content and returns the extraction
    /// envelope.
    ///
    /// A `success: false` envelope is returned as `Ok`: it is a normal,
    /// expected outcome whose `error` string belongs to the caller. Only
    /// transport failures (non-2xx, timeout, connection refused) become
    /// errors.
    pub async fn generate_from_file(
        &self,
        content: Vec<u8>,
        filename: &str,
    ) -> Result<ExtractionEnvelope, SuggestError> {
        debug!(filename, size = content.len(), "Uploading document to extraction service");
        let part = multipart::Part::bytes(content).file_name(filename.to_string());
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/generate-from-file", self.base_url))
            .timeout(self.generation_timeout)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SuggestError::Upstream(format!(
                "extraction service returned {}",
                response.status()
            )));
        }

        response.json().await.map_err(SuggestError::Decode)
    }
}
