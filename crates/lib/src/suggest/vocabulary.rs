//! Reconciles the extraction service's free-text labels against the caller's
//! authorized, UUID-keyed controlled vocabularies.

use crate::types::VocabularyEntry;
use uuid::Uuid;

/// Resolves free-text labels to the UUIDs of authorized vocabulary entries
/// whose display name matches under case-insensitive comparison.
///
/// Labels with no match are silently dropped. The result preserves the order
/// of the input label list, not the vocabulary's order.
pub fn match_labels(labels: &[String], vocabulary: &[VocabularyEntry]) -> Vec<Uuid> {
    labels
        .iter()
        .filter_map(|label| {
            vocabulary
                .iter()
                .find(|entry| entry.name.eq_ignore_ascii_case(label))
                .map(|entry| entry.uuid)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(uuid: &str, name: &str) -> VocabularyEntry {
        VocabularyEntry {
            uuid: Uuid::parse_str(uuid).unwrap(),
            name: name.to_string(),
        }
    }

    #[test]
    fn matches_are_case_insensitive_and_unmatched_labels_are_dropped() {
        let vocabulary = vec![entry("00000000-0000-0000-0000-000000000001", "Adviezen")];
        let labels = vec![
            "adviezen".to_string(),
            "Woo-verzoeken en -besluiten".to_string(),
        ];

        let matched = match_labels(&labels, &vocabulary);

        assert_eq!(matched, vec![vocabulary[0].uuid]);
    }

    #[test]
    fn result_follows_input_label_order() {
        let vocabulary = vec![
            entry("00000000-0000-0000-0000-000000000001", "Adviezen"),
            entry("00000000-0000-0000-0000-000000000002", "Convenanten"),
        ];
        let labels = vec!["Convenanten".to_string(), "Adviezen".to_string()];

        let matched = match_labels(&labels, &vocabulary);

        assert_eq!(matched, vec![vocabulary[1].uuid, vocabulary[0].uuid]);
    }

    #[test]
    fn matching_is_idempotent() {
        let vocabulary = vec![
            entry("00000000-0000-0000-0000-000000000001", "Adviezen"),
            entry("00000000-0000-0000-0000-000000000002", "Convenanten"),
        ];
        let labels = vec!["Adviezen".to_string(), "Onbekend".to_string()];

        let first = match_labels(&labels, &vocabulary);
        let second = match_labels(&labels, &vocabulary);

        assert_eq!(first, second);
    }

    #[test]
    fn empty_inputs_yield_no_matches() {
        assert!(match_labels(&[], &[]).is_empty());
        assert!(match_labels(&["Adviezen".to_string()], &[]).is_empty());
    }
}
