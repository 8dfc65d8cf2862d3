//! CSV Export functionality
//!
//! One row per archived course: the index of the archive without the
//! justification text.

use crate::error::ArchiveResult;
use crate::reports::Archive;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct ApprovalRecord<'a> {
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Course")]
    course: &'a str,
    #[serde(rename = "Proposal")]
    proposal: i64,
    #[serde(rename = "Effective Date")]
    effective_date: String,
    #[serde(rename = "Catalog Status")]
    catalog_status: String,
    #[serde(rename = "Justifications")]
    justification_count: usize,
}

/// Export every grouped approval to CSV, including unexpected proposal types
pub fn export_approvals_csv<W: Write>(archive: &Archive, writer: &mut W) -> ArchiveResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for (proposal_type, course, proposal) in archive.index().iter() {
        csv_writer.serialize(ApprovalRecord {
            category: proposal_type.code(),
            course,
            proposal: proposal.proposal,
            effective_date: proposal.effective_date.to_string(),
            catalog_status: archive.status(course).label(),
            justification_count: proposal.justifications.len(),
        })?;
    }

    csv_writer
        .flush()
        .map_err(|e| crate::error::ArchiveError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApprovalEvent, CatalogCourse, Criterion, DateRange, DesignationRule};
    use crate::services::{ApprovalSource, ProposalIndex, Taxonomy};
    use crate::storage::fixtures::payload;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    #[test]
    fn test_export_rows() {
        let criteria: Vec<Criterion> = ["FCC-1", "FCC-2", "FCC-3", "QC-1", "QC-2"]
            .iter()
            .map(|a| Criterion {
                abbr: a.to_string(),
                prompt: String::new(),
            })
            .collect();

        let mut index = ProposalIndex::new();
        index.extend(
            ApprovalSource::Ccrc,
            vec![ApprovalEvent {
                proposal: 42,
                course: "MATH 141W".into(),
                proposal_type: "MQR".into(),
                effective_date: NaiveDate::from_ymd_opt(2013, 12, 2).unwrap(),
                payload: payload("MQ-1", "Quantitative, reasoning"),
            }],
        );

        let mut catalog = HashMap::new();
        catalog.insert(
            "MATH 141".to_string(),
            CatalogCourse {
                title: "Calculus, Part I".into(),
                is_active: true,
                designation: "RMQR".into(),
                ..Default::default()
            },
        );

        let archive = Archive::new(
            DateRange {
                earliest: NaiveDate::from_ymd_opt(2013, 12, 2).unwrap(),
                latest: NaiveDate::from_ymd_opt(2013, 12, 2).unwrap(),
            },
            HashMap::new(),
            Taxonomy::build(&criteria).unwrap(),
            index,
            catalog,
            DesignationRule::default(),
        );

        let mut buffer = Vec::new();
        export_approvals_csv(&archive, &mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(
            lines[0],
            "Category,Course,Proposal,Effective Date,Catalog Status,Justifications"
        );
        assert_eq!(
            lines[1],
            r#"MQR,MATH 141W,42,2013-12-02,"Calculus, Part I [MQ]",1"#
        );
    }
}
