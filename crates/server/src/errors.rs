use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pubmeta::SuggestError;
use serde_json::json;
use tracing::error;

/// A custom error type for the server application.
///
/// Encapsulates the suggestion pipeline's failure classes plus generic
/// internal errors, and converts them into HTTP responses. Raw internal error
/// text only ever reaches the logs, never the caller; the `Rejected` and
/// `NoSuggestions` variants carry their own user-facing reason.
pub enum AppError {
    /// Errors originating from the `pubmeta` pipeline.
    Suggest(SuggestError),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<SuggestError> for AppError {
    fn from(err: SuggestError) -> Self {
        AppError::Suggest(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::Suggest(err) => {
                error!("SuggestError: {:?}", err);
                let status = match err {
                    SuggestError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
                    SuggestError::Upstream(_)
                    | SuggestError::Network(_)
                    | SuggestError::Decode(_)
                    | SuggestError::Rejected(_) => StatusCode::BAD_GATEWAY,
                    SuggestError::NoSuggestions => StatusCode::UNPROCESSABLE_ENTITY,
                    SuggestError::ClientBuild(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.user_message())
            }
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
