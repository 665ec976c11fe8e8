//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`ingest_from_path`] (from [`source`]) which:
//!
//! - reads a CSV file into an in-memory [`crate::types::DataSet`], typing hinted columns
//! - optionally reports success/failure/alerts to a [`LoadObserver`]
//!
//! The reader-level functions live in [`csv`].

pub mod csv;
pub mod observability;
pub mod source;

pub use observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats, LogObserver};
pub use source::{ingest_from_path, IngestionOptions};
