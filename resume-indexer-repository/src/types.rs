//! Request and response types for search index operations.

use serde::Serialize;

use crate::errors::SearchIndexError;

/// Result of a batch operation for a single document.
#[derive(Debug, Clone)]
pub struct BatchOperationResult {
    /// The record store key of the document.
    pub file_name: String,
    /// Whether the operation succeeded.
    pub success: bool,
    /// Error if the operation failed.
    pub error: Option<SearchIndexError>,
}

/// Summary of a batch operation containing aggregate statistics and individual results.
///
/// Individual failures are reported here rather than failing the whole batch, so
/// callers can act on partial failures.
#[derive(Debug, Clone, Default)]
pub struct BatchOperationSummary {
    /// Total number of items in the batch.
    pub total: usize,
    /// Number of successful operations.
    pub succeeded: usize,
    /// Number of failed operations.
    pub failed: usize,
    /// Individual results for each item.
    pub results: Vec<BatchOperationResult>,
}

impl BatchOperationSummary {
    /// Record the outcome of one item.
    pub fn record(&mut self, file_name: &str, outcome: Result<(), SearchIndexError>) {
        self.total += 1;
        match outcome {
            Ok(()) => {
                self.succeeded += 1;
                self.results.push(BatchOperationResult {
                    file_name: file_name.to_string(),
                    success: true,
                    error: None,
                });
            }
            Err(e) => {
                self.failed += 1;
                self.results.push(BatchOperationResult {
                    file_name: file_name.to_string(),
                    success: false,
                    error: Some(e),
                });
            }
        }
    }

    /// Iterate over the failed items.
    pub fn failures(&self) -> impl Iterator<Item = &BatchOperationResult> {
        self.results.iter().filter(|r| !r.success)
    }
}

/// Outcome of a destructive operation on the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteOutcome {
    /// The index existed and the operation ran.
    Deleted,
    /// The index did not exist; nothing was done.
    IndexMissing,
}

/// Connectivity report for the search backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexHealth {
    /// Whether the backend answered a ping.
    pub connected: bool,
    /// Whether the configured index exists. Always false when not connected.
    pub index_exists: bool,
}
