//! OpenSearch implementation of the search index provider.
//!
//! This module provides a concrete implementation of `SearchIndexProvider`
//! using OpenSearch as the backend.

mod index_config;
mod provider;
mod queries;

pub use index_config::{get_index_settings, IndexConfig, WriteMode, DEFAULT_INDEX_NAME};
pub use provider::OpenSearchProvider;
pub use queries::{build_search_body, parse_search_response, KEYWORD_FIELDS};
