//! Loader module for the resume indexer.
//!
//! Publishes processed documents into the search index one at a time.

use std::sync::Arc;
use tracing::{debug, error, instrument, warn};

use resume_indexer_repository::{BatchOperationSummary, SearchIndexProvider};
use resume_indexer_shared::IndexedDocument;

/// Loader that publishes documents into the search index.
///
/// A failing document never stops the rest of the load. Every outcome ends up in
/// the returned summary.
pub struct SearchLoader {
    provider: Arc<dyn SearchIndexProvider>,
}

impl SearchLoader {
    /// Create a new search loader with the given provider.
    pub fn new(provider: Arc<dyn SearchIndexProvider>) -> Self {
        Self { provider }
    }

    /// Publish documents and return the combined outcome.
    #[instrument(skip(self, documents), fields(document_count = documents.len()))]
    pub async fn load(&self, documents: &[IndexedDocument]) -> BatchOperationSummary {
        let mut summary = BatchOperationSummary::default();

        for document in documents {
            let outcome = self.provider.index_document(document).await;
            if let Err(ref e) = outcome {
                error!(
                    file_name = %document.file_name,
                    error = %e,
                    "Failed to index document"
                );
            }
            summary.record(&document.file_name, outcome);
        }

        if summary.failed > 0 {
            warn!(
                succeeded = summary.succeeded,
                failed = summary.failed,
                "Indexing completed with some failures"
            );
        } else {
            debug!(count = summary.succeeded, "Successfully indexed all documents");
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockSearchProvider;
    use serde_json::json;

    fn documents(names: &[&str]) -> Vec<IndexedDocument> {
        names
            .iter()
            .map(|name| IndexedDocument::new(*name, json!({"Name": name})))
            .collect()
    }

    #[tokio::test]
    async fn test_load_publishes_every_document() {
        let provider = Arc::new(MockSearchProvider::new());
        let loader = SearchLoader::new(provider.clone());

        let summary = loader.load(&documents(&["a.json", "b.json", "c.json"])).await;

        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 3);
        assert_eq!(summary.failed, 0);
        assert_eq!(provider.indexed().await.len(), 3);
    }

    #[tokio::test]
    async fn test_load_collects_failures() {
        let provider = Arc::new(MockSearchProvider::new().failing_on("b.json"));
        let loader = SearchLoader::new(provider.clone());

        let summary = loader.load(&documents(&["a.json", "b.json", "c.json"])).await;

        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        let failed: Vec<_> = summary.failures().map(|r| r.file_name.as_str()).collect();
        assert_eq!(failed, vec!["b.json"]);
        assert_eq!(provider.indexed().await.len(), 2);
    }

    #[tokio::test]
    async fn test_load_empty() {
        let provider = Arc::new(MockSearchProvider::new());
        let loader = SearchLoader::new(provider.clone());

        let summary = loader.load(&[]).await;

        assert_eq!(summary.total, 0);
        assert!(provider.indexed().await.is_empty());
    }
}
