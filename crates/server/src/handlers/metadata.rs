//! # Metadata Route Handlers
//!
//! The backend-for-frontend hop of the suggestion pipeline: a health probe
//! that gates the generation affordance in the UI, and the per-document
//! generation endpoint that fetches the document from the registry and runs
//! it through the extraction service.

use crate::{errors::AppError, state::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use pubmeta::{ExtractionEnvelope, SuggestError, SuggestionSource};
use tracing::info;
use uuid::Uuid;

/// The handler for the root (`/`) endpoint.
pub async fn root() -> &'static str {
    "pubmeta server is running."
}

/// The handler for `GET /api/v1/metadata/health`.
///
/// Answers 200 when the extraction service is healthy, 502 when it is not,
/// and 503 when no extraction service is configured at all.
pub async fn metadata_health_handler(
    State(app_state): State<AppState>,
) -> Result<&'static str, AppError> {
    let source = app_state.source.ok_or(SuggestError::NotConfigured)?;
    if source.is_available().await {
        Ok("OK")
    } else {
        Err(SuggestError::Upstream("extraction service health check failed".to_string()).into())
    }
}

/// The handler for `POST /api/v1/metadata/generate/{document_id}`.
///
/// Returns the extraction envelope verbatim on 200, including envelopes with
/// `success: false`: a declined document is a normal outcome the caller
/// handles per document. Transport failures map to 502, a missing extraction
/// configuration to 503.
pub async fn generate_metadata_handler(
    State(app_state): State<AppState>,
    Path(document_id): Path<Uuid>,
) -> Result<Json<ExtractionEnvelope>, AppError> {
    info!(%document_id, "Received metadata generation request");
    let source = app_state.source.ok_or(SuggestError::NotConfigured)?;
    let envelope = source.suggest(document_id).await?;
    Ok(Json(envelope))
}
