//! Saved-ideas history for Lavender Lab.
//!
//! The history is kept in one named slot of a [`KeyValueStore`], the same way
//! a browser keeps it in `localStorage`. [`HistoryStore`] owns the
//! read-modify-write rules; adapters only move strings in and out.

pub mod adapters;
pub mod export;
pub mod store;

pub use adapters::{FileKeyValueStore, InMemoryKeyValueStore};
pub use export::{export_document, export_file_name, PRODUCT_NAME};
pub use store::{HistoryError, HistoryStore, KeyValueStore, HISTORY_SLOT};
