//! Core data structures shared across the suggestion pipeline.
//!
//! The extraction payload mirrors what the extraction service returns and is
//! consumed read-only. The suggestion and preview types are the unit of one
//! generation run: built by the orchestrator, reviewed by the user, and then
//! consumed by the merge applier.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

// --- Extraction service payloads (consumed read-only) ---

/// Title candidates extracted from a document.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractionTitles {
    pub official: Option<String>,
    pub short: Option<String>,
}

/// Free-text classification labels extracted from a document.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractionClassification {
    pub categories: Vec<String>,
    pub topics: Vec<String>,
    pub keywords: Vec<String>,
}

/// Validity date range extracted from a document.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractionValidity {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// One handling event found in the document, e.g. a signing or receipt.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HandlingEvent {
    /// The event kind, e.g. `"signing"` or `"receipt"`.
    pub event: String,
    /// Human-readable label as found in the document.
    pub label: String,
    /// ISO date or datetime at which the event took place.
    pub timestamp: String,
}

/// The structured metadata guess returned by the extraction service for a
/// single document.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractionPayload {
    pub titles: ExtractionTitles,
    pub descriptions: Vec<String>,
    pub classification: ExtractionClassification,
    pub validity: ExtractionValidity,
    pub handling: Vec<HandlingEvent>,
    /// Per-field confidence scores reported by the model. Carried through for
    /// display purposes; the pipeline itself does not act on them.
    pub confidence: HashMap<String, f64>,
}

/// The envelope wrapping every response from the extraction service's
/// generation endpoint. `success: false` is a normal outcome (for example an
/// unsupported file or a misconfigured upstream key), not a transport failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractionEnvelope {
    pub success: bool,
    pub suggestion: Option<ExtractionPayload>,
    pub error: Option<String>,
}

// --- Current-state records being enriched ---

/// The publication-level fields the pipeline may suggest values for.
///
/// This is a minimal view of the publication record: only the fields that
/// appear in the field-mapping table, carrying their current values so the
/// default selection can be computed.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Publication {
    pub officiele_titel: String,
    pub verkorte_titel: String,
    pub omschrijving: String,
    pub informatie_categorieen: Vec<Uuid>,
    pub onderwerpen: Vec<Uuid>,
    pub trefwoorden: Vec<String>,
    pub begin_geldigheid: Option<String>,
    pub einde_geldigheid: Option<String>,
}

/// The document-level fields the pipeline may suggest values for.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    pub uuid: Uuid,
    pub bestandsnaam: String,
    #[serde(default)]
    pub ondertekeningsdatum: Option<String>,
    #[serde(default)]
    pub ontvangstdatum: Option<String>,
}

/// One entry of a controlled vocabulary the caller is authorized to use.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyEntry {
    pub uuid: Uuid,
    pub name: String,
}

/// The caller's authorized controlled vocabularies, grouped per target field.
#[derive(Debug, Clone, Default)]
pub struct AuthorizedVocabularies {
    pub categories: Vec<VocabularyEntry>,
    pub topics: Vec<VocabularyEntry>,
}

// --- Suggestions and preview ---

/// A keyword paired with the service that suggested it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourcedKeyword {
    pub keyword: String,
    pub source: String,
}

/// One suggested value for one target field, with the current value and the
/// computed default selection.
///
/// Invariant: `suggested_value` is never null, an empty string, or an empty
/// array; a suggestion with no usable value is never created. `selected` is
/// computed once at construction time and afterwards only changed by explicit
/// user action.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSuggestion {
    pub field: String,
    pub label: String,
    pub current_value: Value,
    pub suggested_value: Value,
    pub selected: bool,
}

/// The suggestions for one document that yielded at least one field.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSuggestion {
    pub document_uuid: Uuid,
    pub document_name: String,
    pub fields: Vec<FieldSuggestion>,
}

/// The complete output of one generation run, handed to the user for review
/// and afterwards to the merge applier. Never persisted as-is.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataPreviewData {
    pub publication_suggestions: Vec<FieldSuggestion>,
    pub document_suggestions: Vec<DocumentSuggestion>,
    pub main_document_name: String,
}

/// A sparse mapping from field name to new value. Only explicitly selected
/// fields ever appear as keys.
pub type PartialUpdate = serde_json::Map<String, Value>;

/// Returns `true` when a JSON value counts as "empty" for the purpose of the
/// default selection and the non-empty suggestion invariant: null, an empty
/// or whitespace-only string, or an empty array.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_value_covers_null_blank_string_and_empty_array() {
        assert!(is_empty_value(&Value::Null));
        assert!(is_empty_value(&json!("")));
        assert!(is_empty_value(&json!("   ")));
        assert!(is_empty_value(&json!([])));
        assert!(!is_empty_value(&json!("Advies")));
        assert!(!is_empty_value(&json!(["a"])));
        assert!(!is_empty_value(&json!(0)));
        assert!(!is_empty_value(&json!(false)));
    }

    #[test]
    fn extraction_envelope_tolerates_missing_fields() {
        let envelope: ExtractionEnvelope = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(envelope.success);
        assert!(envelope.suggestion.is_none());
        assert!(envelope.error.is_none());
    }

    #[test]
    fn extraction_payload_deserializes_nested_shape() {
        let raw = json!({
            "titles": {"official": "Advies inzake bestemmingsplan", "short": "Advies"},
            "descriptions": ["Een advies over het bestemmingsplan."],
            "classification": {
                "categories": ["Adviezen"],
                "topics": [],
                "keywords": ["bestemmingsplan", "horeca"]
            },
            "validity": {"start": "2024-01-01"},
            "handling": [{"event": "signing", "label": "Ondertekend", "timestamp": "2024-01-02T09:30:00Z"}],
            "confidence": {"titles.official": 0.91}
        });
        let payload: ExtractionPayload = serde_json::from_value(raw).unwrap();
        assert_eq!(
            payload.titles.official.as_deref(),
            Some("Advies inzake bestemmingsplan")
        );
        assert_eq!(payload.classification.keywords.len(), 2);
        assert_eq!(payload.handling[0].event, "signing");
        assert!(payload.validity.end.is_none());
    }
}
