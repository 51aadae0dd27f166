//! Document types for the search index.
//!
//! This module defines the document structure that is indexed in the search engine.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Document representation for the search index.
///
/// # Fields
///
/// - `file_name`: Exact-match key copied from the record store
/// - `resume_data`: The cleaned resume, as produced by the normalizer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexedDocument {
    pub file_name: String,
    pub resume_data: Value,
}

impl IndexedDocument {
    /// Create a new document.
    ///
    /// # Example
    ///
    /// ```
    /// use resume_indexer_shared::IndexedDocument;
    /// use serde_json::json;
    ///
    /// let doc = IndexedDocument::new("ann.json", json!({"Name": "Ann"}));
    /// assert_eq!(doc.file_name, "ann.json");
    /// ```
    pub fn new(file_name: impl Into<String>, resume_data: Value) -> Self {
        Self {
            file_name: file_name.into(),
            resume_data,
        }
    }
}
