//! This module defines and re-exports the interfaces for the record store.
//! It serves as a central point for accessing traits related to data interaction.
mod record_store;

pub use record_store::RecordStore;
