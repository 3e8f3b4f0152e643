//! # pubmeta
//!
//! AI-assisted metadata suggestion and selective merge for publication
//! records. Given the documents attached to a publication, this crate
//! extracts structured metadata guesses through an external extraction
//! service, reconciles free-text labels against the caller's authorized
//! controlled vocabularies, aggregates keyword suggestions across documents,
//! and applies only the user-confirmed subset as sparse partial updates.

pub mod errors;
pub mod extraction;
pub mod merge;
pub mod registry;
pub mod source;
pub mod suggest;
pub mod types;

pub use errors::SuggestError;
pub use extraction::ExtractionClient;
pub use merge::{apply_selection, select_all, DocumentUpdate, MergeResult};
pub use registry::{AuditIdentity, RegistryClient};
pub use source::DirectSuggestionSource;
pub use suggest::{SuggestionOrchestrator, SuggestionSource};
pub use types::{
    AuthorizedVocabularies, DocumentMeta, DocumentSuggestion, ExtractionEnvelope,
    ExtractionPayload, FieldSuggestion, MetadataPreviewData, PartialUpdate, Publication,
    SourcedKeyword, VocabularyEntry,
};
