//! This module defines the `RecordStore` trait, which provides an interface
//! for interacting with the authoritative store of raw resume documents.
use resume_indexer_shared::RawRecord;
use serde_json::Value;

use crate::errors::RecordStoreError;

/// A trait that defines the interface for interacting with the record store.
///
/// Records are keyed by `file_name`, written once and never updated in place.
/// Implementations acquire a connection for the duration of each call and
/// release it before returning, on success and on failure alike.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Creates the backing table if it does not exist yet.
    async fn ensure_schema(&self) -> Result<(), RecordStoreError>;

    /// Checks whether a record with the given file name exists.
    async fn exists(&self, file_name: &str) -> Result<bool, RecordStoreError>;

    /// Inserts a new record.
    ///
    /// This is an optimistic insert: no existence check is made first. If a record
    /// with the same file name already exists, the store's uniqueness constraint
    /// rejects the write and `RecordStoreError::Conflict` is returned.
    ///
    /// # Arguments
    ///
    /// * `file_name` - The natural key of the record.
    /// * `resume_data` - The uploaded JSON document.
    async fn insert(&self, file_name: &str, resume_data: &Value) -> Result<(), RecordStoreError>;

    /// Returns every record in the store.
    ///
    /// This is a full scan without pagination. Records inserted while the scan is
    /// running may or may not be included.
    async fn fetch_all(&self) -> Result<Vec<RawRecord>, RecordStoreError>;
}
