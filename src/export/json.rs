//! JSON Export functionality
//!
//! Exports the grouped archive (criteria and approved courses per category)
//! with schema versioning.

use crate::error::ArchiveResult;
use crate::models::{Category, Criterion, DateRange, Justifications};
use crate::reports::Archive;
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full archive export structure
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Application version that created the export
    pub app_version: String,

    /// Span of effective dates covered
    pub date_range: DateRange,

    /// Categories in document order
    pub categories: Vec<CategoryExport>,

    /// Entries grouped under proposal types outside the taxonomy
    pub unexpected: Vec<UnexpectedEntry>,

    /// Proposals dropped for undecodable payloads
    pub skipped_proposals: Vec<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryExport {
    pub code: String,
    pub name: String,
    pub group: String,
    pub criteria: Vec<Criterion>,
    pub courses: Vec<CourseExport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseExport {
    pub course: String,
    pub proposal: i64,
    pub effective_date: NaiveDate,
    pub catalog_status: String,
    pub justifications: Justifications,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnexpectedEntry {
    pub proposal_type: String,
    pub course: String,
    pub proposal: i64,
}

impl ArchiveExport {
    /// Build the export from a loaded archive
    pub fn from_archive(archive: &Archive) -> Self {
        let categories = Category::ALL
            .iter()
            .map(|category| CategoryExport {
                code: category.code().to_string(),
                name: archive.type_name(*category).to_string(),
                group: category.group().name().to_string(),
                criteria: archive.taxonomy().criteria_for(*category).to_vec(),
                courses: archive
                    .index()
                    .courses(*category)
                    .map(|(course, proposal)| CourseExport {
                        course: course.to_string(),
                        proposal: proposal.proposal,
                        effective_date: proposal.effective_date,
                        catalog_status: archive.status(course).label(),
                        justifications: proposal.justifications.clone(),
                    })
                    .collect(),
            })
            .collect();

        let unexpected = archive
            .index()
            .iter()
            .filter(|(proposal_type, _, _)| proposal_type.category().is_none())
            .map(|(proposal_type, course, proposal)| UnexpectedEntry {
                proposal_type: proposal_type.code().to_string(),
                course: course.to_string(),
                proposal: proposal.proposal,
            })
            .collect();

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            date_range: archive.date_range,
            categories,
            unexpected,
            skipped_proposals: archive.index().skipped().to_vec(),
        }
    }
}

/// Export the archive to JSON
pub fn export_archive_json<W: Write>(
    archive: &Archive,
    writer: &mut W,
    pretty: bool,
) -> ArchiveResult<()> {
    let export = ArchiveExport::from_archive(archive);
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)?;
    } else {
        serde_json::to_writer(&mut *writer, &export)?;
    }
    writeln!(writer)?;
    Ok(())
}
