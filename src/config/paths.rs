//! Path management for the archive generator
//!
//! ## Path Resolution Order
//!
//! 1. `PATHWAYS_ARCHIVE_CONFIG_DIR` environment variable (if set)
//! 2. The platform configuration directory reported by `directories`
//!    (e.g. `~/.config/pathways-archive` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::ArchiveError;

/// Environment variable that overrides the configuration directory
pub const CONFIG_DIR_ENV: &str = "PATHWAYS_ARCHIVE_CONFIG_DIR";

/// Manages all paths used by the archive generator
#[derive(Debug, Clone)]
pub struct ArchivePaths {
    /// Base directory for configuration
    base_dir: PathBuf,
}

impl ArchivePaths {
    /// Create a new ArchivePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and no
    /// override is set.
    pub fn new() -> Result<Self, ArchiveError> {
        let base_dir = if let Ok(custom) = std::env::var(CONFIG_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create ArchivePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the configuration directory exists
    pub fn ensure_directories(&self) -> Result<(), ArchiveError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ArchiveError::Io(format!("Failed to create config directory: {}", e)))
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, ArchiveError> {
    ProjectDirs::from("edu", "qc", "pathways-archive")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| ArchiveError::Config("Could not determine home directory".into()))
}
