// App state for Axum server
use std::sync::Arc;

use resume_indexer_repository::{SearchIndexProvider, SearchIndexService};
use resume_store_repository::RecordStore;

use crate::ingest::IngestGuard;
use crate::synchronizer::IndexSynchronizer;

#[derive(Clone)]
pub struct AppState {
    pub ingest: IngestGuard,
    pub synchronizer: Arc<IndexSynchronizer>,
    pub search: SearchIndexService,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, provider: Arc<dyn SearchIndexProvider>) -> Self {
        Self {
            ingest: IngestGuard::new(Arc::clone(&store)),
            synchronizer: Arc::new(IndexSynchronizer::new(store, Arc::clone(&provider))),
            search: SearchIndexService::new(provider),
        }
    }
}
