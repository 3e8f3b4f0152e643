//! # Field Suggestion Builder
//!
//! Maps one extraction payload onto the fixed field-mapping table, producing
//! publication-level and document-level suggestions. A suggestion is only
//! created when the extracted candidate has a usable value; the default
//! selection is `true` exactly when the target field is currently empty.

use crate::{
    suggest::vocabulary::match_labels,
    types::{
        is_empty_value, AuthorizedVocabularies, DocumentMeta, ExtractionPayload, FieldSuggestion,
        Publication, SourcedKeyword,
    },
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{json, Value};

// Publication-level target fields.
pub const FIELD_OFFICIELE_TITEL: &str = "officieleTitel";
pub const FIELD_VERKORTE_TITEL: &str = "verkorteTitel";
pub const FIELD_OMSCHRIJVING: &str = "omschrijving";
pub const FIELD_INFORMATIE_CATEGORIEEN: &str = "informatieCategorieen";
pub const FIELD_ONDERWERPEN: &str = "onderwerpen";
pub const FIELD_TREFWOORDEN: &str = "trefwoorden";
pub const FIELD_BEGIN_GELDIGHEID: &str = "beginGeldigheid";
pub const FIELD_EINDE_GELDIGHEID: &str = "eindeGeldigheid";

// Document-level target fields.
pub const FIELD_ONDERTEKENINGSDATUM: &str = "ondertekeningsdatum";
pub const FIELD_ONTVANGSTDATUM: &str = "ontvangstdatum";

/// Whether a target field stores a bare date or a full datetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TargetKind {
    Date,
    DateTime,
}

/// Normalizes an extracted temporal value for its target field.
///
/// Date-only values pass through unchanged for date-only targets. Datetime
/// values are truncated to their date for date-only targets and pass through
/// unchanged for datetime targets. A bare date destined for a datetime target
/// is not upgraded: no value, so no suggestion. Unparseable input likewise
/// yields no value.
fn normalize_temporal(raw: &str, target: TargetKind) -> Option<String> {
    let raw = raw.trim();
    if NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_ok() {
        return match target {
            TargetKind::Date => Some(raw.to_string()),
            TargetKind::DateTime => None,
        };
    }
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .ok()?;
    match target {
        TargetKind::Date => Some(date.format("%Y-%m-%d").to_string()),
        TargetKind::DateTime => Some(raw.to_string()),
    }
}

/// Creates a suggestion, upholding the two construction-time invariants:
/// an empty suggested value produces no suggestion at all, and `selected`
/// is computed from the current value exactly once.
fn suggestion(field: &str, label: &str, current: Value, suggested: Value) -> Option<FieldSuggestion> {
    if is_empty_value(&suggested) {
        return None;
    }
    let selected = is_empty_value(&current);
    Some(FieldSuggestion {
        field: field.to_string(),
        label: label.to_string(),
        current_value: current,
        suggested_value: suggested,
        selected,
    })
}

fn optional_text(value: &Option<String>) -> Value {
    match value {
        Some(text) => json!(text),
        None => Value::Null,
    }
}

/// Builds the publication-level suggestions from the main document's payload.
pub fn build_publication_suggestions(
    payload: &ExtractionPayload,
    publication: &Publication,
    vocabularies: &AuthorizedVocabularies,
    source: &str,
) -> Vec<FieldSuggestion> {
    let mut suggestions = Vec::new();

    suggestions.extend(suggestion(
        FIELD_OFFICIELE_TITEL,
        "Officiële titel",
        json!(publication.officiele_titel),
        optional_text(&payload.titles.official),
    ));
    suggestions.extend(suggestion(
        FIELD_VERKORTE_TITEL,
        "Verkorte titel",
        json!(publication.verkorte_titel),
        optional_text(&payload.titles.short),
    ));
    suggestions.extend(suggestion(
        FIELD_OMSCHRIJVING,
        "Omschrijving",
        json!(publication.omschrijving),
        optional_text(&payload.descriptions.first().cloned()),
    ));

    // Free-text labels only become suggestions when at least one resolves to
    // an authorized vocabulary entry; unmatched labels are dropped silently.
    let categories = match_labels(&payload.classification.categories, &vocabularies.categories);
    suggestions.extend(suggestion(
        FIELD_INFORMATIE_CATEGORIEEN,
        "Informatiecategorieën",
        json!(publication.informatie_categorieen),
        json!(categories),
    ));
    let topics = match_labels(&payload.classification.topics, &vocabularies.topics);
    suggestions.extend(suggestion(
        FIELD_ONDERWERPEN,
        "Onderwerpen",
        json!(publication.onderwerpen),
        json!(topics),
    ));

    let keywords: Vec<SourcedKeyword> = payload
        .classification
        .keywords
        .iter()
        .map(|keyword| SourcedKeyword {
            keyword: keyword.clone(),
            source: source.to_string(),
        })
        .collect();
    suggestions.extend(keyword_suggestion(&keywords, publication));

    let begin = payload
        .validity
        .start
        .as_deref()
        .and_then(|raw| normalize_temporal(raw, TargetKind::Date));
    suggestions.extend(suggestion(
        FIELD_BEGIN_GELDIGHEID,
        "Begin geldigheid",
        optional_text(&publication.begin_geldigheid),
        optional_text(&begin),
    ));
    let end = payload
        .validity
        .end
        .as_deref()
        .and_then(|raw| normalize_temporal(raw, TargetKind::Date));
    suggestions.extend(suggestion(
        FIELD_EINDE_GELDIGHEID,
        "Einde geldigheid",
        optional_text(&publication.einde_geldigheid),
        optional_text(&end),
    ));

    suggestions
}

/// Builds the publication-level keyword suggestion from an already sourced
/// keyword list. Also used by the orchestrator to replace the main-document
/// keyword suggestion with the cross-document aggregate.
pub fn keyword_suggestion(
    keywords: &[SourcedKeyword],
    publication: &Publication,
) -> Option<FieldSuggestion> {
    suggestion(
        FIELD_TREFWOORDEN,
        "Trefwoorden",
        json!(publication.trefwoorden),
        json!(keywords),
    )
}

/// Builds the document-level suggestions for one document's payload.
///
/// The signing timestamp targets a date-only field, so datetimes are
/// truncated; the receipt timestamp targets a datetime field, so bare dates
/// are dropped rather than upgraded.
pub fn build_document_suggestions(
    payload: &ExtractionPayload,
    document: &DocumentMeta,
) -> Vec<FieldSuggestion> {
    let mut suggestions = Vec::new();

    let signed = handling_timestamp(payload, "signing")
        .and_then(|raw| normalize_temporal(raw, TargetKind::Date));
    suggestions.extend(suggestion(
        FIELD_ONDERTEKENINGSDATUM,
        "Datum ondertekend",
        optional_text(&document.ondertekeningsdatum),
        optional_text(&signed),
    ));

    let received = handling_timestamp(payload, "receipt")
        .and_then(|raw| normalize_temporal(raw, TargetKind::DateTime));
    suggestions.extend(suggestion(
        FIELD_ONTVANGSTDATUM,
        "Datum ontvangen",
        optional_text(&document.ontvangstdatum),
        optional_text(&received),
    ));

    suggestions
}

fn handling_timestamp<'a>(payload: &'a ExtractionPayload, event: &str) -> Option<&'a str> {
    payload
        .handling
        .iter()
        .find(|h| h.event.eq_ignore_ascii_case(event))
        .map(|h| h.timestamp.as_str())
}
