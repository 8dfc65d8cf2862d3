//! Reports module for the archive
//!
//! Provides the HTML archive document and a terminal summary of the
//! approvals it covers.

pub mod archive;
pub mod summary;

pub use archive::{course_anchor, status_html, Archive};
pub use summary::{SummaryReport, SummaryRow};
