//! In-memory stand-ins for the record store and the search index, used by unit tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use resume_indexer_repository::{DeleteOutcome, SearchIndexError, SearchIndexProvider};
use resume_indexer_shared::{IndexedDocument, RawRecord, SearchQuery, SearchResults};
use resume_store_repository::{RecordStore, RecordStoreError};
use serde_json::Value;
use tokio::sync::Mutex;

/// Search provider keeping documents in memory.
pub struct MockSearchProvider {
    documents: Mutex<Vec<IndexedDocument>>,
    index_exists: AtomicBool,
    reachable: bool,
    failing: HashSet<String>,
    ensure_calls: AtomicUsize,
}

impl MockSearchProvider {
    pub fn new() -> Self {
        Self {
            documents: Mutex::new(Vec::new()),
            index_exists: AtomicBool::new(true),
            reachable: true,
            failing: HashSet::new(),
            ensure_calls: AtomicUsize::new(0),
        }
    }

    /// Reject every publish of `file_name`.
    pub fn failing_on(mut self, file_name: &str) -> Self {
        self.failing.insert(file_name.to_string());
        self
    }

    /// Behave as if the backend cannot be reached.
    pub fn unreachable(mut self) -> Self {
        self.reachable = false;
        self
    }

    pub async fn indexed(&self) -> Vec<IndexedDocument> {
        self.documents.lock().await.clone()
    }

    pub fn ensure_calls(&self) -> usize {
        self.ensure_calls.load(Ordering::SeqCst)
    }

    fn check_reachable(&self) -> Result<(), SearchIndexError> {
        if self.reachable {
            Ok(())
        } else {
            Err(SearchIndexError::connection("connection refused"))
        }
    }
}

fn mentions(document: &IndexedDocument, text: &str) -> bool {
    document
        .resume_data
        .to_string()
        .to_lowercase()
        .contains(&text.to_lowercase())
}

#[async_trait]
impl SearchIndexProvider for MockSearchProvider {
    async fn ensure_index_exists(&self) -> Result<bool, SearchIndexError> {
        self.check_reachable()?;
        self.ensure_calls.fetch_add(1, Ordering::SeqCst);
        Ok(!self.index_exists.swap(true, Ordering::SeqCst))
    }

    async fn ping(&self) -> Result<bool, SearchIndexError> {
        Ok(self.reachable)
    }

    async fn index_exists(&self) -> Result<bool, SearchIndexError> {
        self.check_reachable()?;
        Ok(self.index_exists.load(Ordering::SeqCst))
    }

    async fn index_document(&self, document: &IndexedDocument) -> Result<(), SearchIndexError> {
        self.check_reachable()?;
        if self.failing.contains(&document.file_name) {
            return Err(SearchIndexError::index(format!(
                "mapper_parsing_exception for {}",
                document.file_name
            )));
        }
        self.index_exists.store(true, Ordering::SeqCst);
        let mut documents = self.documents.lock().await;
        documents.retain(|d| d.file_name != document.file_name);
        documents.push(document.clone());
        Ok(())
    }

    async fn delete_all_documents(&self) -> Result<DeleteOutcome, SearchIndexError> {
        self.check_reachable()?;
        if !self.index_exists.load(Ordering::SeqCst) {
            return Ok(DeleteOutcome::IndexMissing);
        }
        self.documents.lock().await.clear();
        Ok(DeleteOutcome::Deleted)
    }

    async fn delete_index(&self) -> Result<DeleteOutcome, SearchIndexError> {
        self.check_reachable()?;
        if !self.index_exists.swap(false, Ordering::SeqCst) {
            return Ok(DeleteOutcome::IndexMissing);
        }
        self.documents.lock().await.clear();
        Ok(DeleteOutcome::Deleted)
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResults, SearchIndexError> {
        self.check_reachable()?;
        if !self.index_exists.load(Ordering::SeqCst) {
            return Err(SearchIndexError::index_not_found("resumes"));
        }

        let documents = self.documents.lock().await;
        let matches: Vec<IndexedDocument> = documents
            .iter()
            .filter(|d| match query {
                SearchQuery::MatchAll => true,
                SearchQuery::ByName { name } => d
                    .resume_data
                    .get("Name")
                    .and_then(Value::as_str)
                    .is_some_and(|n| n.eq_ignore_ascii_case(name)),
                SearchQuery::Keywords { keyword, .. } => mentions(d, keyword),
                SearchQuery::Context { prompt } => mentions(d, prompt),
            })
            .cloned()
            .collect();

        Ok(SearchResults {
            total: matches.len() as u64,
            documents: matches,
        })
    }
}

/// Record store keeping rows in memory.
pub struct MockRecordStore {
    records: Mutex<Vec<RawRecord>>,
    available: bool,
    racing: bool,
    rejecting: HashSet<String>,
}

impl MockRecordStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            available: true,
            racing: false,
            rejecting: HashSet::new(),
        }
    }

    pub fn with_records(records: Vec<RawRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::new()
        }
    }

    /// Fail every call as if the database were down.
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// Report names as absent but reject inserts, as when another upload wins the race.
    pub fn racing(mut self) -> Self {
        self.racing = true;
        self
    }

    /// Fail inserts of `file_name` as if the database refused the row.
    pub fn rejecting(mut self, file_name: &str) -> Self {
        self.rejecting.insert(file_name.to_string());
        self
    }

    pub async fn records(&self) -> Vec<RawRecord> {
        self.records.lock().await.clone()
    }

    fn check_available(&self) -> Result<(), RecordStoreError> {
        if self.available {
            Ok(())
        } else {
            Err(RecordStoreError::DatabaseError(sqlx::Error::PoolTimedOut))
        }
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    async fn ensure_schema(&self) -> Result<(), RecordStoreError> {
        self.check_available()
    }

    async fn exists(&self, file_name: &str) -> Result<bool, RecordStoreError> {
        self.check_available()?;
        if self.racing {
            return Ok(false);
        }
        Ok(self
            .records
            .lock()
            .await
            .iter()
            .any(|r| r.file_name == file_name))
    }

    async fn insert(&self, file_name: &str, resume_data: &Value) -> Result<(), RecordStoreError> {
        self.check_available()?;
        if self.racing {
            return Err(RecordStoreError::Conflict(file_name.to_string()));
        }
        if self.rejecting.contains(file_name) {
            return Err(RecordStoreError::DatabaseError(sqlx::Error::Protocol(
                "unsupported Unicode escape sequence".to_string(),
            )));
        }
        let mut records = self.records.lock().await;
        if records.iter().any(|r| r.file_name == file_name) {
            return Err(RecordStoreError::Conflict(file_name.to_string()));
        }
        records.push(RawRecord::new(file_name, resume_data.clone()));
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<RawRecord>, RecordStoreError> {
        self.check_available()?;
        Ok(self.records.lock().await.clone())
    }
}
