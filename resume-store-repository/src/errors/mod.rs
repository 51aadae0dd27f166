//! Error types for the record store repository.
//! Consolidates and re-exports error types related to record store operations.
mod record_store;

pub use record_store::RecordStoreError;
