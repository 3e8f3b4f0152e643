//! # Application State
//!
//! The shared state holds the configuration and, when the extraction service
//! is configured, the composed registry + extraction suggestion source the
//! metadata handlers run against.

use crate::config::AppConfig;
use pubmeta::{AuditIdentity, DirectSuggestionSource, ExtractionClient, RegistryClient};
use std::{sync::Arc, time::Duration};

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration, loaded from `config.yml`.
    pub config: Arc<AppConfig>,
    /// The per-document fetch-then-extract chain. `None` when the extraction
    /// base URL is unconfigured; the metadata endpoints then answer 503.
    pub source: Option<Arc<DirectSuggestionSource>>,
}

/// Builds the shared application state from the configuration.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let source = match config.extraction.base_url.as_deref() {
        Some(base_url) if !base_url.trim().is_empty() => {
            let extraction = ExtractionClient::new(base_url)
                .map_err(|e| anyhow::anyhow!("failed to build extraction client: {e}"))?
                .with_timeouts(
                    Duration::from_secs(config.extraction.health_timeout_secs),
                    Duration::from_secs(config.extraction.generation_timeout_secs),
                );
            let registry = RegistryClient::new(
                &config.registry.base_url,
                &config.registry.api_key,
                AuditIdentity {
                    user_id: config.audit.user_id.clone(),
                    user_representation: config.audit.user_representation.clone(),
                    remarks: config.audit.remarks.clone(),
                },
            )
            .map_err(|e| anyhow::anyhow!("failed to build registry client: {e}"))?
            // The registry fetch is part of the generation stage, so it
            // shares that stage's bound.
            .with_timeout(Duration::from_secs(config.extraction.generation_timeout_secs));
            tracing::info!(extraction = %base_url, "Metadata suggestion source initialized.");
            Some(Arc::new(DirectSuggestionSource::new(registry, extraction)))
        }
        _ => {
            tracing::warn!(
                "No extraction base URL configured; metadata suggestion endpoints will answer 503."
            );
            None
        }
    };

    Ok(AppState {
        config: Arc::new(config),
        source,
    })
}
