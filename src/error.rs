//! Custom error types for the Pathways archive
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for archive operations
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File or stream I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Connection or query failures against a source database
    #[error("Database error: {0}")]
    Database(String),

    /// Malformed serialized justification payload
    #[error("Decode error at byte {offset}: {message}")]
    Decode { offset: usize, message: String },

    /// A criterion every category depends on is missing from the criteria table
    #[error("Required criterion missing: {0}")]
    MissingCriterion(String),

    /// No approval events fall inside the archive's scope
    #[error("No approved proposals found; nothing to archive")]
    EmptyArchive,

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },
}

impl ArchiveError {
    /// Create a decode error at a byte offset
    pub fn decode(offset: usize, message: impl Into<String>) -> Self {
        Self::Decode {
            offset,
            message: message.into(),
        }
    }

    /// Create a "not found" error for database files
    pub fn database_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Database",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a payload decode error
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

impl From<std::io::Error> for ArchiveError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ArchiveError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<rusqlite::Error> for ArchiveError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<csv::Error> for ArchiveError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for archive operations
pub type ArchiveResult<T> = Result<T, ArchiveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ArchiveError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = ArchiveError::database_not_found("curric.db");
        assert_eq!(err.to_string(), "Database not found: curric.db");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_decode_error() {
        let err = ArchiveError::decode(7, "expected ';'");
        assert_eq!(err.to_string(), "Decode error at byte 7: expected ';'");
        assert!(err.is_decode());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let archive_err: ArchiveError = io_err.into();
        assert!(matches!(archive_err, ArchiveError::Io(_)));
    }

    #[test]
    fn test_from_rusqlite_error() {
        let err: ArchiveError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, ArchiveError::Database(_)));
    }
}
