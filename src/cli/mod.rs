//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the pipeline.

pub mod export;
pub mod generate;
pub mod report;

pub use export::{handle_export_command, ExportFormat};
pub use generate::handle_generate_command;
pub use report::handle_summary_command;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::config::Settings;
use crate::error::{ArchiveError, ArchiveResult};
use crate::reports::Archive;
use crate::storage::{CatalogRepository, CurriculumRepository};

/// Open both databases and run every stage up to rendering
pub fn load_archive(settings: &Settings) -> ArchiveResult<Archive> {
    let catalog = CatalogRepository::open(&settings.catalog_db)?;
    let curriculum = CurriculumRepository::open(&settings.curriculum_db)?;
    Archive::generate(&catalog, &curriculum, settings)
}

/// A buffered writer to `path`, or to standard output when no path is given
pub(crate) fn output_writer(path: Option<&Path>) -> ArchiveResult<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                ArchiveError::Io(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}
