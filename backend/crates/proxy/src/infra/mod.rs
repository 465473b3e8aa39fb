//! Infrastructure Layer
//!
//! HTTP clients for the upstream origins.

pub mod csv_import;
pub mod forwarder;

pub use csv_import::{CsvImportClient, ImportOutcome};
pub use forwarder::{UpstreamForwarder, UpstreamRequest};
