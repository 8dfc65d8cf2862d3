//! User settings for the archive generator
//!
//! Holds the source database locations and the few institution-specific
//! knobs the pipeline consults.

use serde::{Deserialize, Serialize};

use super::paths::ArchivePaths;
use crate::error::ArchiveError;
use crate::models::DesignationRule;

/// Settings for an archive run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Location of the current course catalog database
    #[serde(default = "default_catalog_db")]
    pub catalog_db: String,

    /// Location of the curriculum workflow/history database
    #[serde(default = "default_curriculum_db")]
    pub curriculum_db: String,

    /// Institution filter for catalog rows (case-insensitive substring)
    #[serde(default = "default_institution")]
    pub institution: String,

    /// Only proposals with a larger id count toward the title date range
    #[serde(default = "default_date_range_min_proposal")]
    pub date_range_min_proposal: i64,

    /// How wrapped designation codes are reduced to their inner code
    #[serde(default)]
    pub designation: DesignationRule,
}

fn default_schema_version() -> u32 {
    1
}

fn default_catalog_db() -> String {
    "cuny_curriculum.db".to_string()
}

fn default_curriculum_db() -> String {
    "curric.db".to_string()
}

fn default_institution() -> String {
    "qns".to_string()
}

fn default_date_range_min_proposal() -> i64 {
    160
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            catalog_db: default_catalog_db(),
            curriculum_db: default_curriculum_db(),
            institution: default_institution(),
            date_range_min_proposal: default_date_range_min_proposal(),
            designation: DesignationRule::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &ArchivePaths) -> Result<Self, ArchiveError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| ArchiveError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ArchiveError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ArchivePaths) -> Result<(), ArchiveError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ArchiveError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ArchiveError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Apply command-line overrides on top of the persisted settings
    pub fn with_overrides(
        mut self,
        catalog_db: Option<String>,
        curriculum_db: Option<String>,
        institution: Option<String>,
    ) -> Self {
        if let Some(path) = catalog_db {
            self.catalog_db = path;
        }
        if let Some(path) = curriculum_db {
            self.curriculum_db = path;
        }
        if let Some(inst) = institution {
            self.institution = inst;
        }
        self
    }
}
