//! Cross-document keyword aggregation.
//!
//! When a publication has more than one document, the publication-level
//! keyword suggestion is recomputed as the deduplicated union of every
//! document's extracted keywords, replacing the suggestion built from the
//! main document alone.

use crate::types::{ExtractionPayload, SourcedKeyword};
use std::collections::HashSet;

/// Merges the free-text keywords of all successful extraction payloads into
/// one deduplicated list, first-seen-wins, preserving insertion order.
///
/// Each keyword is tagged with the extraction service's name as its source.
pub fn aggregate_keywords(payloads: &[ExtractionPayload], source: &str) -> Vec<SourcedKeyword> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for payload in payloads {
        for keyword in &payload.classification.keywords {
            if seen.insert(keyword.clone()) {
                merged.push(SourcedKeyword {
                    keyword: keyword.clone(),
                    source: source.to_string(),
                });
            }
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload_with_keywords(keywords: &[&str]) -> ExtractionPayload {
        let mut payload = ExtractionPayload::default();
        payload.classification.keywords = keywords.iter().map(|k| k.to_string()).collect();
        payload
    }

    #[test]
    fn deduplicates_across_documents_in_first_seen_order() {
        let payloads = vec![
            payload_with_keywords(&["bestemmingsplan", "horeca"]),
            payload_with_keywords(&["bestemmingsplan", "centrum"]),
        ];

        let merged = aggregate_keywords(&payloads, "document-extraction");

        let keywords: Vec<&str> = merged.iter().map(|k| k.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["bestemmingsplan", "horeca", "centrum"]);
        assert!(merged.iter().all(|k| k.source == "document-extraction"));
    }

    #[test]
    fn aggregation_is_deterministic_for_the_same_input_order() {
        let payloads = vec![
            payload_with_keywords(&["b", "a"]),
            payload_with_keywords(&["c", "a", "b"]),
        ];

        let first = aggregate_keywords(&payloads, "svc");
        let second = aggregate_keywords(&payloads, "svc");

        assert_eq!(first, second);
        let keywords: Vec<&str> = first.iter().map(|k| k.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["b", "a", "c"]);
    }

    #[test]
    fn empty_payload_list_yields_no_keywords() {
        assert!(aggregate_keywords(&[], "svc").is_empty());
    }
}
