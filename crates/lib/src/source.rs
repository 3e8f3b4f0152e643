//! The production [`SuggestionSource`]: the server-side hop that fetches a
//! document from the registry and runs it through the extraction service.

use crate::{
    errors::SuggestError,
    extraction::ExtractionClient,
    registry::RegistryClient,
    suggest::orchestrator::SuggestionSource,
    types::ExtractionEnvelope,
};
use async_trait::async_trait;
use uuid::Uuid;

/// Composes the registry and extraction clients into the per-document
/// fetch-then-extract chain.
#[derive(Debug, Clone)]
pub struct DirectSuggestionSource {
    registry: RegistryClient,
    extraction: ExtractionClient,
}

impl DirectSuggestionSource {
    pub fn new(registry: RegistryClient, extraction: ExtractionClient) -> Self {
        Self {
            registry,
            extraction,
        }
    }
}

#[async_trait]
impl SuggestionSource for DirectSuggestionSource {
    async fn is_available(&self) -> bool {
        self.extraction.health().await
    }

    async fn suggest(&self, document_id: Uuid) -> Result<ExtractionEnvelope, SuggestError> {
        // The record is fetched first for the stored filename; the extraction
        // service uses the extension to pick its parser.
        let record = self.registry.get_document(document_id).await?;
        let content = self.registry.download(document_id).await?;
        self.extraction
            .generate_from_file(content, &record.bestandsnaam)
            .await
    }
}
