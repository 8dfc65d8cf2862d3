//! Export module for the archive
//!
//! Machine-readable forms of the grouped approvals:
//! - CSV: one row per archived course (spreadsheet-compatible)
//! - JSON: criteria and courses per category, with justification text

pub mod csv;
pub mod json;

pub use csv::export_approvals_csv;
pub use json::{export_archive_json, ArchiveExport, EXPORT_SCHEMA_VERSION};
