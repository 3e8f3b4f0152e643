//! The suggestion pipeline: field mapping, vocabulary reconciliation,
//! cross-document aggregation, and the orchestrator that sequences them.

pub mod aggregate;
pub mod builder;
pub mod orchestrator;
pub mod vocabulary;

pub use orchestrator::{SuggestionOrchestrator, SuggestionSource};
