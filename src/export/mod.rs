//! Export module for cashplan
//!
//! - CSV: tagged transactions (spreadsheet-compatible)
//! - JSON: the full analysis bundle, machine-readable
//! - YAML: the same bundle, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_transactions_csv;
pub use json::{export_json, AnalysisExport, TaggedTransaction, EXPORT_SCHEMA_VERSION};
pub use yaml::export_yaml;
