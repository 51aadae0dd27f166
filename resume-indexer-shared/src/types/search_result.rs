//! Search result types for the resume indexer.

use serde::{Deserialize, Serialize};

use crate::IndexedDocument;

/// Documents returned by a search, in relevance order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SearchResults {
    /// Total number of matching documents.
    /// May be greater than `documents.len()` because only one page is fetched.
    pub total: u64,

    /// The returned page of documents.
    pub documents: Vec<IndexedDocument>,
}

impl SearchResults {
    /// Number of documents in this page.
    pub fn matched(&self) -> usize {
        self.documents.len()
    }
}
