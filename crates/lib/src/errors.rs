use thiserror::Error;

/// Failure classes of the suggestion pipeline.
#[derive(Error, Debug)]
pub enum SuggestError {
    /// The extraction service base URL is missing; no network call was made.
    #[error("extraction service is not configured")]
    NotConfigured,
    /// The document registry or the extraction service was reachable but
    /// answered with a non-success status, or timed out.
    #[error("upstream service unavailable: {0}")]
    Upstream(String),
    /// The extraction call succeeded transport-wise but the service declined
    /// the document; carries the upstream's own human-readable reason.
    #[error("extraction service rejected the document: {0}")]
    Rejected(String),
    /// Every document was processed but zero mappable fields were produced.
    #[error("no usable suggestions found")]
    NoSuggestions,
    /// A client-side connection or protocol failure.
    #[error("network request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// The upstream answered 2xx but the body did not match the expected shape.
    #[error("failed to decode upstream response: {0}")]
    Decode(reqwest::Error),
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),
}

impl SuggestError {
    /// The fixed, categorized message shown to the user. Internal error text
    /// stays in the logs; only the `Rejected` variant surfaces the upstream's
    /// own reason, and `NoSuggestions` its distinct outcome.
    pub fn user_message(&self) -> String {
        match self {
            SuggestError::NotConfigured => {
                "The metadata suggestion service is not available.".to_string()
            }
            SuggestError::Rejected(reason) => {
                format!("The extraction service could not process the document: {reason}")
            }
            SuggestError::NoSuggestions => {
                "No usable suggestions were found in the uploaded documents.".to_string()
            }
            SuggestError::Upstream(_) | SuggestError::Network(_) | SuggestError::Decode(_) => {
                "An upstream service is currently unavailable. Please try again later.".to_string()
            }
            SuggestError::ClientBuild(_) => {
                "The metadata suggestion service is misconfigured.".to_string()
            }
        }
    }
}
