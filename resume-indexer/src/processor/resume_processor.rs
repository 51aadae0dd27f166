//! Resume processor implementation.
//!
//! Transforms raw records from the record store into documents for the search index.

use resume_indexer_shared::{IndexedDocument, RawRecord};
use serde_json::Value;
use tracing::debug;

use super::normalizer::normalize;
use crate::errors::IngestError;

/// Processor that turns raw records into search documents.
///
/// The processor is responsible for:
/// - Decoding records whose payload was stored as a serialized JSON string
/// - Cleaning resume objects with [`normalize`]
#[derive(Debug, Default)]
pub struct ResumeProcessor {}

impl ResumeProcessor {
    /// Create a new resume processor.
    pub fn new() -> Self {
        Self {}
    }

    /// Process a single raw record.
    ///
    /// Payloads that are not JSON objects are published as they are.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::DecodeError` when the payload is a string that does
    /// not hold valid JSON.
    pub fn process(&self, record: &RawRecord) -> Result<IndexedDocument, IngestError> {
        let decoded = record.decoded_resume_data().map_err(|e| {
            IngestError::decode(format!("Failed to decode {}: {}", record.file_name, e))
        })?;

        let resume_data = match decoded {
            Value::Object(map) => Value::Object(normalize(map)),
            other => {
                debug!(file_name = %record.file_name, "Resume payload is not an object, skipping normalization");
                other
            }
        };

        Ok(IndexedDocument::new(record.file_name.clone(), resume_data))
    }
}
