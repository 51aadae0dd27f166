//! Error types for the resume indexer ingest.

use resume_indexer_repository::SearchIndexError;
use resume_store_repository::RecordStoreError;
use thiserror::Error;

/// Errors that can occur while ingesting, synchronizing or searching resumes.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The caller sent something unusable (bad file name, non-object JSON, bad folder).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error from the record store.
    #[error("Record store error: {0}")]
    Store(#[from] RecordStoreError),

    /// Error from the search index.
    #[error("Search index error: {0}")]
    Search(#[from] SearchIndexError),

    /// Error decoding a stored or uploaded document.
    #[error("Decode error: {0}")]
    DecodeError(String),
}

impl IngestError {
    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::DecodeError(msg.into())
    }

    /// Whether the error was caused by the caller rather than a dependency.
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::InvalidInput(_) => true,
            Self::Search(e) => e.is_client_error(),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(err: serde_json::Error) -> Self {
        Self::DecodeError(err.to_string())
    }
}
