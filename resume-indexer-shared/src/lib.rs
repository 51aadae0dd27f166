//! # Resume Indexer Shared
//!
//! This crate defines shared data structures used across the resume indexer
//! ecosystem: the raw records kept in the record store, the documents
//! published to the search index, and the search queries and results that
//! travel between the HTTP layer and the search backend.

pub mod types;

pub use types::indexed_document::IndexedDocument;
pub use types::raw_record::RawRecord;
pub use types::search_query::{SearchQuery, CANDIDATE_PAGE_SIZE, MATCH_ALL_PAGE_SIZE};
pub use types::search_result::SearchResults;
