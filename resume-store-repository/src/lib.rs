//! # Resume Store Repository
//! This crate provides traits and implementations for interacting with the
//! record store, the authoritative home of every uploaded resume. It includes
//! definitions for errors, interfaces, and a concrete implementation for
//! PostgreSQL backed by a `JSONB` column.
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod postgres;

pub use config::StoreConfig;
pub use errors::RecordStoreError;
pub use interfaces::RecordStore;
pub use postgres::PostgresRecordStore;
