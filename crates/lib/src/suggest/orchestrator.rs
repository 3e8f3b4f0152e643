//! # Suggestion Orchestrator
//!
//! Sequences one generation run: per document, fetch-then-extract through a
//! [`SuggestionSource`], then build publication-level suggestions from the
//! main document, document-level suggestions from every successful document,
//! and finally the cross-document keyword aggregate. A per-document failure
//! is logged and skipped; the run only fails when every document failed or
//! zero suggestions came out.
//!
//! Documents are processed strictly sequentially, never in parallel: the main
//! document's result must exist before publication suggestions are built, and
//! the keyword aggregation order must be deterministic.

use crate::{
    errors::SuggestError,
    merge::{self, MergeResult},
    suggest::{aggregate, builder},
    types::{
        AuthorizedVocabularies, DocumentMeta, DocumentSuggestion, ExtractionEnvelope,
        ExtractionPayload, MetadataPreviewData, Publication,
    },
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};
use uuid::Uuid;

/// Default source tag attached to suggested keywords.
pub const DEFAULT_SERVICE_NAME: &str = "document-extraction";

/// The per-document fetch-then-extract hop the orchestrator runs against.
///
/// The production implementation composes the registry and extraction
/// clients; tests substitute a scripted mock.
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    /// Whether the extraction service is currently reachable. Never errors;
    /// gates whether the generation affordance is offered at all.
    async fn is_available(&self) -> bool;

    /// Fetches one document's content and runs it through the extraction
    /// service, returning the envelope. Transport failures are errors; a
    /// `success: false` envelope is a normal result.
    async fn suggest(&self, document_id: Uuid) -> Result<ExtractionEnvelope, SuggestError>;
}

/// Drives generation runs against a [`SuggestionSource`], one at a time.
pub struct SuggestionOrchestrator<S> {
    source: S,
    service_name: String,
    generating: AtomicBool,
}

/// Clears the in-flight flag when dropped, so a run that is cancelled
/// mid-await releases the orchestrator like a completed one.
struct FlightGuard<'a>(&'a AtomicBool);

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl<S: SuggestionSource> SuggestionOrchestrator<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            generating: AtomicBool::new(false),
        }
    }

    /// Overrides the source tag attached to suggested keywords.
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    /// Whether a generation run is currently in flight.
    pub fn is_generating(&self) -> bool {
        self.generating.load(Ordering::SeqCst)
    }

    /// Probes the extraction service. Independent of any running generation.
    pub async fn is_available(&self) -> bool {
        self.source.is_available().await
    }

    /// Runs one generation for a publication and its documents.
    ///
    /// Returns `None` when another run is already in flight: the second
    /// trigger is a no-op, not queued. The `main_document` is authoritative
    /// for publication-level fields; when unspecified the first document is.
    pub async fn try_generate(
        &self,
        publication: &Publication,
        documents: &[DocumentMeta],
        main_document: Option<Uuid>,
        vocabularies: &AuthorizedVocabularies,
    ) -> Option<Result<MetadataPreviewData, SuggestError>> {
        if self.generating.swap(true, Ordering::SeqCst) {
            info!("Generation already in flight; ignoring trigger");
            return None;
        }
        let _guard = FlightGuard(&self.generating);
        let result = self
            .run(publication, documents, main_document, vocabularies)
            .await;
        Some(result)
    }

    async fn run(
        &self,
        publication: &Publication,
        documents: &[DocumentMeta],
        main_document: Option<Uuid>,
        vocabularies: &AuthorizedVocabularies,
    ) -> Result<MetadataPreviewData, SuggestError> {
        let main_document = documents
            .iter()
            .find(|d| Some(d.uuid) == main_document)
            .or_else(|| documents.first())
            .ok_or(SuggestError::NoSuggestions)?;
        info!(
            documents = documents.len(),
            main_document = %main_document.uuid,
            "Starting metadata generation run"
        );

        // Sequential per document: skip failures, keep going.
        let mut successes: Vec<(&DocumentMeta, ExtractionPayload)> = Vec::new();
        let mut last_error: Option<SuggestError> = None;
        for document in documents {
            match self.source.suggest(document.uuid).await {
                Ok(envelope) if envelope.success => match envelope.suggestion {
                    Some(payload) => successes.push((document, payload)),
                    None => {
                        warn!(document = %document.uuid, "Extraction succeeded without a payload; skipping");
                        last_error = Some(SuggestError::Rejected(
                            "extraction service returned no payload".to_string(),
                        ));
                    }
                },
                Ok(envelope) => {
                    let reason = envelope.error.unwrap_or_else(|| "unknown error".to_string());
                    warn!(document = %document.uuid, %reason, "Extraction service rejected document; skipping");
                    last_error = Some(SuggestError::Rejected(reason));
                }
                Err(e) => {
                    warn!(document = %document.uuid, error = %e, "Document extraction failed; skipping");
                    last_error = Some(e);
                }
            }
        }

        if successes.is_empty() {
            return Err(last_error.unwrap_or(SuggestError::NoSuggestions));
        }

        // Publication-level fields come from the main document only. When the
        // main document itself failed, the run continues with document-level
        // suggestions from the others.
        let mut publication_suggestions = successes
            .iter()
            .find(|(document, _)| document.uuid == main_document.uuid)
            .map(|(_, payload)| {
                builder::build_publication_suggestions(
                    payload,
                    publication,
                    vocabularies,
                    &self.service_name,
                )
            })
            .unwrap_or_default();

        let document_suggestions: Vec<DocumentSuggestion> = successes
            .iter()
            .filter_map(|(document, payload)| {
                let fields = builder::build_document_suggestions(payload, document);
                if fields.is_empty() {
                    None
                } else {
                    Some(DocumentSuggestion {
                        document_uuid: document.uuid,
                        document_name: document.bestandsnaam.clone(),
                        fields,
                    })
                }
            })
            .collect();

        // With two or more successful documents the keyword suggestion is
        // recomputed over all of them, replacing the main-document one.
        if successes.len() >= 2 {
            let payloads: Vec<ExtractionPayload> =
                successes.iter().map(|(_, p)| p.clone()).collect();
            let merged = aggregate::aggregate_keywords(&payloads, &self.service_name);
            publication_suggestions.retain(|s| s.field != builder::FIELD_TREFWOORDEN);
            publication_suggestions.extend(builder::keyword_suggestion(&merged, publication));
        }

        if publication_suggestions.is_empty() && document_suggestions.is_empty() {
            return Err(SuggestError::NoSuggestions);
        }

        info!(
            publication_fields = publication_suggestions.len(),
            documents_with_fields = document_suggestions.len(),
            "Metadata generation run finished"
        );
        Ok(MetadataPreviewData {
            publication_suggestions,
            document_suggestions,
            main_document_name: main_document.bestandsnaam.clone(),
        })
    }

    /// Legacy single-document convenience flow: generate suggestions for one
    /// document, auto-select everything, and return the merge result ready
    /// for persistence. Sugar over the preview + merge API.
    ///
    /// Returns `None` when a run is already in flight, like [`try_generate`].
    ///
    /// [`try_generate`]: SuggestionOrchestrator::try_generate
    pub async fn generate_metadata(
        &self,
        publication: &Publication,
        document: &DocumentMeta,
        vocabularies: &AuthorizedVocabularies,
    ) -> Option<Result<MergeResult, SuggestError>> {
        let documents = std::slice::from_ref(document);
        let result = self
            .try_generate(publication, documents, Some(document.uuid), vocabularies)
            .await?;
        Some(result.map(|mut preview| {
            merge::select_all(&mut preview);
            merge::apply_selection(&preview)
        }))
    }
}
