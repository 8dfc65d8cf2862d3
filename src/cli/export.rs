//! CLI command for data export
//!
//! Writes the grouped approvals in a machine-readable format.

use std::io::Write;
use std::path::PathBuf;

use clap::ValueEnum;

use crate::config::Settings;
use crate::error::ArchiveResult;
use crate::export::{export_approvals_csv, export_archive_json};

use super::{load_archive, output_writer};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// One row per archived course
    Csv,
    /// Criteria and courses per category, with justification text
    Json,
}

/// Handle the export command
pub fn handle_export_command(
    settings: &Settings,
    format: ExportFormat,
    output: Option<PathBuf>,
    pretty: bool,
) -> ArchiveResult<()> {
    let archive = load_archive(settings)?;
    let mut writer = output_writer(output.as_deref())?;

    match format {
        ExportFormat::Csv => export_approvals_csv(&archive, &mut writer)?,
        ExportFormat::Json => export_archive_json(&archive, &mut writer, pretty)?,
    }
    writer.flush()?;

    if let Some(path) = output {
        eprintln!("Archive exported to: {}", path.display());
    }
    Ok(())
}
