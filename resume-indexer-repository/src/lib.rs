//! # Resume Indexer Repository
//!
//! This crate provides traits and implementations for interacting with the
//! resume search index. It includes definitions for errors, interfaces, and a
//! concrete implementation for OpenSearch (wire-compatible with the
//! Elasticsearch APIs used here).

pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod service;
pub mod types;

pub use errors::SearchIndexError;
pub use interfaces::SearchIndexProvider;
pub use opensearch::{IndexConfig, OpenSearchProvider, WriteMode};
pub use service::SearchIndexService;
pub use types::{BatchOperationResult, BatchOperationSummary, DeleteOutcome, IndexHealth};
