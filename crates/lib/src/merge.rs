//! # Selective Merge
//!
//! Turns a reviewed preview into sparse partial updates. Only fields the user
//! explicitly selected appear in the output, so the merge can never overwrite
//! a field the user did not choose to change, not even with an empty value.

use crate::types::{MetadataPreviewData, PartialUpdate};
use uuid::Uuid;

/// The selected fields for one document, keyed by its registry UUID.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentUpdate {
    pub document_uuid: Uuid,
    pub fields: PartialUpdate,
}

/// The full outcome of applying a reviewed preview: one sparse update for the
/// publication and one per document that had at least one selected field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeResult {
    pub publication: PartialUpdate,
    pub documents: Vec<DocumentUpdate>,
}

impl MergeResult {
    pub fn is_empty(&self) -> bool {
        self.publication.is_empty() && self.documents.is_empty()
    }
}

/// Produces the sparse partial updates for a reviewed preview.
///
/// Unselected fields are absent from the output entirely, never present with
/// a null value. Documents without any selected field get no update at all.
pub fn apply_selection(preview: &MetadataPreviewData) -> MergeResult {
    let mut publication = PartialUpdate::new();
    for field in &preview.publication_suggestions {
        if field.selected {
            publication.insert(field.field.clone(), field.suggested_value.clone());
        }
    }

    let mut documents = Vec::new();
    for document in &preview.document_suggestions {
        let mut fields = PartialUpdate::new();
        for field in &document.fields {
            if field.selected {
                fields.insert(field.field.clone(), field.suggested_value.clone());
            }
        }
        if !fields.is_empty() {
            documents.push(DocumentUpdate {
                document_uuid: document.document_uuid,
                fields,
            });
        }
    }

    MergeResult {
        publication,
        documents,
    }
}

/// Marks every suggestion in the preview as selected. Used by the legacy
/// single-document convenience flow, which applies all suggestions at once.
pub fn select_all(preview: &mut MetadataPreviewData) {
    for field in &mut preview.publication_suggestions {
        field.selected = true;
    }
    for document in &mut preview.document_suggestions {
        for field in &mut document.fields {
            field.selected = true;
        }
    }
}
