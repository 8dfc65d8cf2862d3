//! CLI command for generating the archive document

use std::io::Write;
use std::path::PathBuf;

use crate::config::Settings;
use crate::error::ArchiveResult;

use super::{load_archive, output_writer};

/// Generate the HTML archive to `output` (standard output when `None`)
pub fn handle_generate_command(settings: &Settings, output: Option<PathBuf>) -> ArchiveResult<()> {
    let archive = load_archive(settings)?;

    let mut writer = output_writer(output.as_deref())?;
    archive.render(&mut writer)?;
    writer.flush()?;

    if let Some(path) = output {
        tracing::info!(path = %path.display(), "archive written");
    }
    Ok(())
}
