//! Search index service implementation.
//!
//! This module provides the high-level service the HTTP layer uses to query and
//! maintain the resume search index. Publishing documents during a
//! synchronization goes through the provider directly (see the loader in the
//! `resume-indexer` crate).

use std::sync::Arc;

use resume_indexer_shared::{SearchQuery, SearchResults};
use tracing::info;

use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::types::{DeleteOutcome, IndexHealth};

/// The main service for querying and clearing the search index.
///
/// Provides input validation and delegates to a `SearchIndexProvider` for actual
/// backend operations. All operations return `SearchIndexError` for consistent
/// error handling.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use resume_indexer_repository::{IndexConfig, OpenSearchProvider, SearchIndexService};
/// use resume_indexer_shared::SearchQuery;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = OpenSearchProvider::new("http://localhost:9200", IndexConfig::default(), None).await?;
/// let service = SearchIndexService::new(Arc::new(provider));
///
/// let results = service.search(SearchQuery::keywords("rust", Some(3))).await?;
/// println!("{} candidates", results.matched());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SearchIndexService {
    provider: Arc<dyn SearchIndexProvider>,
}

impl SearchIndexService {
    /// Create a new SearchIndexService.
    pub fn new(provider: Arc<dyn SearchIndexProvider>) -> Self {
        Self { provider }
    }

    /// The provider this service delegates to.
    pub fn provider(&self) -> Arc<dyn SearchIndexProvider> {
        Arc::clone(&self.provider)
    }

    /// Report whether the backend answers and whether the index exists.
    pub async fn health(&self) -> Result<IndexHealth, SearchIndexError> {
        if !self.provider.ping().await? {
            return Ok(IndexHealth {
                connected: false,
                index_exists: false,
            });
        }

        let index_exists = self.provider.index_exists().await?;
        Ok(IndexHealth {
            connected: true,
            index_exists,
        })
    }

    /// Run a validated search.
    ///
    /// # Returns
    ///
    /// * `Ok(SearchResults)` - One page of matching documents
    /// * `Err(SearchIndexError::ValidationError)` - If the query text is empty
    /// * `Err(SearchIndexError)` - If the search fails
    pub async fn search(&self, query: SearchQuery) -> Result<SearchResults, SearchIndexError> {
        query.validate().map_err(SearchIndexError::validation)?;
        self.provider.search(&query).await
    }

    /// Clear the search index.
    ///
    /// With `drop_index` the index is deleted together with its mapping; otherwise
    /// every document is removed and the mapping stays. The record store is never
    /// touched, so a full synchronization rebuilds what was removed.
    pub async fn delete_all(&self, drop_index: bool) -> Result<DeleteOutcome, SearchIndexError> {
        let outcome = if drop_index {
            self.provider.delete_index().await?
        } else {
            self.provider.delete_all_documents().await?
        };

        info!(drop_index, outcome = ?outcome, "Search index cleared");
        Ok(outcome)
    }
}
