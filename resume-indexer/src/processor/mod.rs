//! Processor module for the resume indexer.
//!
//! Transforms raw records into cleaned search documents.

mod normalizer;
mod resume_processor;

pub use normalizer::{normalize, LIST_FIELDS, NESTED_FIELDS};
pub use resume_processor::ResumeProcessor;
