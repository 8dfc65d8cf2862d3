//! Storage layer for the archive
//!
//! Read-only access to the two source databases: the current course catalog
//! and the curriculum workflow history. Each repository owns one SQLite
//! connection; the pipeline never holds more than these two.

pub mod catalog;
pub mod curriculum;
pub mod schema;

pub use catalog::CatalogRepository;
pub use curriculum::CurriculumRepository;

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{Connection, OpenFlags};

use crate::error::{ArchiveError, ArchiveResult};

/// Open a database location read-only
///
/// The location is a filesystem path or an SQLite `file:` URI.
pub fn open_read_only(location: &str) -> ArchiveResult<Connection> {
    if !location.starts_with("file:") && !Path::new(location).exists() {
        return Err(ArchiveError::database_not_found(location));
    }

    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(location, flags)
        .map_err(|e| ArchiveError::Database(format!("Failed to open {}: {}", location, e)))?;

    tracing::debug!(location, "opened database read-only");
    Ok(conn)
}

/// Parse a stored date, tolerating a trailing time component
pub(crate) fn parse_date(raw: &str) -> ArchiveResult<NaiveDate> {
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|e| ArchiveError::Database(format!("Invalid date '{}': {}", raw, e)))
}
