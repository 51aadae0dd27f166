//! This module defines the core data structures and types used across the resume indexer.

pub mod indexed_document;
pub mod raw_record;
pub mod search_query;
pub mod search_result;
