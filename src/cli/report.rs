//! CLI command for the approval summary

use crate::config::Settings;
use crate::error::ArchiveResult;
use crate::reports::SummaryReport;

use super::load_archive;

/// Print per-category approval counts
pub fn handle_summary_command(settings: &Settings) -> ArchiveResult<()> {
    let archive = load_archive(settings)?;
    let report = SummaryReport::generate(&archive);

    println!(
        "Approvals {} through {}",
        archive.date_range.earliest_label(),
        archive.date_range.latest_label()
    );
    println!();
    print!("{}", report.format_terminal());
    Ok(())
}
