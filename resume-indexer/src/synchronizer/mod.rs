//! Index synchronizer.
//!
//! Rebuilds the search index from the record store: every stored resume is
//! decoded, cleaned and republished.

use std::sync::Arc;

use resume_indexer_repository::SearchIndexProvider;
use resume_store_repository::RecordStore;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::errors::IngestError;
use crate::loader::SearchLoader;
use crate::processor::ResumeProcessor;

/// A record that could not be republished.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncFailure {
    pub file_name: String,
    pub error: String,
}

/// Outcome of a full synchronization.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncReport {
    /// Records read from the store.
    pub total: usize,
    /// Documents published successfully.
    pub indexed: usize,
    /// Records that were skipped, with the reason.
    pub failed: Vec<SyncFailure>,
}

/// Republishes every stored record into the search index.
pub struct IndexSynchronizer {
    store: Arc<dyn RecordStore>,
    provider: Arc<dyn SearchIndexProvider>,
    processor: ResumeProcessor,
    loader: SearchLoader,
}

impl IndexSynchronizer {
    /// Create a new synchronizer.
    pub fn new(store: Arc<dyn RecordStore>, provider: Arc<dyn SearchIndexProvider>) -> Self {
        Self {
            store,
            loader: SearchLoader::new(Arc::clone(&provider)),
            provider,
            processor: ResumeProcessor::new(),
        }
    }

    /// Republish every record.
    ///
    /// The store scan completes before the index is contacted. Individual records
    /// that cannot be decoded or published are reported in the result and never
    /// stop the rest of the run; documents already published stay published.
    ///
    /// # Errors
    ///
    /// * `IngestError::Store` - The record store could not be read
    /// * `IngestError::Search` - The index could not be reached or created
    #[instrument(skip(self))]
    pub async fn sync_all(&self) -> Result<SyncReport, IngestError> {
        let records = self.store.fetch_all().await?;

        if records.is_empty() {
            info!("No records to index");
            return Ok(SyncReport::default());
        }

        if self.provider.ensure_index_exists().await? {
            info!("Search index was missing and has been recreated");
        }

        let mut report = SyncReport {
            total: records.len(),
            ..SyncReport::default()
        };

        let mut documents = Vec::with_capacity(records.len());
        for record in &records {
            match self.processor.process(record) {
                Ok(document) => documents.push(document),
                Err(e) => {
                    warn!(file_name = %record.file_name, error = %e, "Skipping record");
                    report.failed.push(SyncFailure {
                        file_name: record.file_name.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        let summary = self.loader.load(&documents).await;
        report.indexed = summary.succeeded;
        report.failed.extend(summary.failures().map(|result| SyncFailure {
            file_name: result.file_name.clone(),
            error: result
                .error
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        }));

        info!(
            total = report.total,
            indexed = report.indexed,
            failed = report.failed.len(),
            "Synchronization finished"
        );

        Ok(report)
    }
}
