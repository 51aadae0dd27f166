//! # Resume Indexer
//!
//! Stores uploaded resume JSON documents in PostgreSQL and republishes a cleaned
//! projection of them into OpenSearch for candidate search.
//!
//! ## Architecture
//!
//! The record store is the source of truth; the search index is a derived view
//! that can always be rebuilt from it.
//!
//! 1. **Ingest**: Validates uploads and writes them to the record store
//! 2. **Processor**: Decodes and normalizes stored records into search documents
//! 3. **Loader**: Publishes documents into the search index
//! 4. **Synchronizer**: Coordinates a full republish of the record store
//! 5. **Server**: HTTP surface over all of the above
//!
//! ## Modules
//!
//! - [`config`]: Configuration and dependency initialization
//! - [`ingest`]: Single file and folder uploads
//! - [`processor`]: Transforms raw records into documents
//! - [`loader`]: Indexes documents into OpenSearch
//! - [`synchronizer`]: Rebuilds the index from the record store
//! - [`server`]: Axum routes and handlers
//! - [`errors`]: Error types for the indexer

pub mod config;
pub mod errors;
pub mod ingest;
pub mod loader;
pub mod processor;
pub mod server;
pub mod synchronizer;

#[cfg(test)]
mod mocks;

pub use config::{AppConfig, Dependencies};
pub use errors::IngestError;

use thiserror::Error;

/// Errors that can occur during indexer initialization or execution.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Ingest error.
    #[error("Ingest error: {0}")]
    IngestError(#[from] IngestError),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
