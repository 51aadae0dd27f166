//! Search index provider trait definition.
//!
//! This module defines the abstract interface for search index operations,
//! allowing for different backend implementations (OpenSearch, Elasticsearch, etc.).

use async_trait::async_trait;
use resume_indexer_shared::{IndexedDocument, SearchQuery, SearchResults};

use crate::errors::SearchIndexError;
use crate::types::DeleteOutcome;

/// Abstracts the underlying search index implementation (OpenSearch, Elasticsearch, etc.).
///
/// Implementations are injected into `SearchIndexService` and the synchronizer's loader
/// to enable dependency injection and easy testing with mock implementations.
///
/// The search index is a derived view of the record store. Nothing in this trait
/// touches the record store, and every destructive operation here can be undone by
/// re-running a full synchronization.
///
/// # Index Initialization
///
/// Call `ensure_index_exists` during application startup (and before republishing)
/// so documents land in an index with the resume mapping rather than a dynamically
/// mapped one.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Ensure the search index exists, creating it with the resume mapping if necessary.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the index was created by this call
    /// * `Ok(false)` - If the index already existed
    /// * `Err(SearchIndexError)` - If the backend could not be reached or creation failed
    async fn ensure_index_exists(&self) -> Result<bool, SearchIndexError>;

    /// Check whether the backend answers.
    ///
    /// Transport failures are reported as `Ok(false)`; only unexpected errors are returned.
    async fn ping(&self) -> Result<bool, SearchIndexError>;

    /// Check whether the configured index exists.
    async fn index_exists(&self) -> Result<bool, SearchIndexError>;

    /// Publish one document.
    ///
    /// Whether this appends a new document or replaces the one keyed by `file_name`
    /// depends on the provider's write mode.
    async fn index_document(&self, document: &IndexedDocument) -> Result<(), SearchIndexError>;

    /// Remove every document while keeping the index and its mapping.
    async fn delete_all_documents(&self) -> Result<DeleteOutcome, SearchIndexError>;

    /// Drop the index together with its mapping.
    async fn delete_index(&self) -> Result<DeleteOutcome, SearchIndexError>;

    /// Run a search and return one page of matching documents.
    async fn search(&self, query: &SearchQuery) -> Result<SearchResults, SearchIndexError>;
}
