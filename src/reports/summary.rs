//! Approval summary
//!
//! Per-category counts of archived courses and the span of their approval
//! dates, for a quick check of a database before generating the document.

use chrono::NaiveDate;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{CatalogStatus, Category};

use super::archive::Archive;

/// One category's line in the summary
#[derive(Debug, Clone, Tabled)]
pub struct SummaryRow {
    #[tabled(rename = "Group")]
    pub group: String,
    #[tabled(rename = "Code")]
    pub code: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Approved")]
    pub approved: usize,
    #[tabled(rename = "Inactive")]
    pub inactive: usize,
    #[tabled(rename = "Not Found")]
    pub not_found: usize,
    #[tabled(rename = "First Approval")]
    pub first: String,
    #[tabled(rename = "Last Approval")]
    pub last: String,
}

/// Summary across all categories
#[derive(Debug, Clone)]
pub struct SummaryReport {
    pub rows: Vec<SummaryRow>,
    /// Grouped entries whose type is outside the taxonomy
    pub unexpected: usize,
    /// Proposals dropped for undecodable payloads
    pub skipped: usize,
}

impl SummaryReport {
    pub fn generate(archive: &Archive) -> Self {
        let index = archive.index();
        let rows: Vec<SummaryRow> = Category::ALL
            .iter()
            .map(|category| {
                let mut inactive = 0;
                let mut not_found = 0;
                let mut first: Option<NaiveDate> = None;
                let mut last: Option<NaiveDate> = None;
                for (course, proposal) in index.courses(*category) {
                    match archive.status(course) {
                        CatalogStatus::Inactive => inactive += 1,
                        CatalogStatus::NotFound => not_found += 1,
                        CatalogStatus::Active { .. } => {}
                    }
                    let date = proposal.effective_date;
                    first = Some(first.map_or(date, |d| d.min(date)));
                    last = Some(last.map_or(date, |d| d.max(date)));
                }
                SummaryRow {
                    group: category.group().name().to_string(),
                    code: category.code().to_string(),
                    name: archive.type_name(*category).to_string(),
                    approved: index.course_count(*category),
                    inactive,
                    not_found,
                    first: first.map_or_else(|| "-".to_string(), |d| d.to_string()),
                    last: last.map_or_else(|| "-".to_string(), |d| d.to_string()),
                }
            })
            .collect();

        let known: usize = rows.iter().map(|r| r.approved).sum();
        Self {
            rows,
            unexpected: index.len() - known,
            skipped: index.skipped().len(),
        }
    }

    /// Total approved courses across the taxonomy
    pub fn total_approved(&self) -> usize {
        self.rows.iter().map(|r| r.approved).sum()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = Table::new(&self.rows).with(Style::modern()).to_string();
        output.push('\n');
        output.push_str(&format!("Total approved courses: {}\n", self.total_approved()));
        if self.unexpected > 0 {
            output.push_str(&format!(
                "Entries with unexpected proposal types: {}\n",
                self.unexpected
            ));
        }
        if self.skipped > 0 {
            output.push_str(&format!(
                "Proposals skipped (undecodable justifications): {}\n",
                self.skipped
            ));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApprovalEvent, CatalogCourse, Criterion, DateRange, DesignationRule};
    use crate::services::{ApprovalSource, ProposalIndex, Taxonomy};
    use crate::storage::fixtures::payload;
    use std::collections::HashMap;

    fn event(proposal: i64, course: &str, proposal_type: &str, day: u32) -> ApprovalEvent {
        ApprovalEvent {
            proposal,
            course: course.into(),
            proposal_type: proposal_type.into(),
            effective_date: NaiveDate::from_ymd_opt(2013, 4, day).unwrap(),
            payload: payload("QC-1", "text"),
        }
    }

    fn archive() -> Archive {
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
            vec![
                event(1, "ENGL 110", "EC-1", 3),
                event(2, "ENGL 120", "EC-1", 9),
                event(3, "MATH 10", "GEN", 1),
            ],
        );

        let mut catalog = HashMap::new();
        catalog.insert(
            "ENGL 110".to_string(),
            CatalogCourse {
                title: "College Writing".into(),
                is_active: true,
                ..Default::default()
            },
        );

        Archive::new(
            DateRange {
                earliest: NaiveDate::from_ymd_opt(2013, 4, 3).unwrap(),
                latest: NaiveDate::from_ymd_opt(2013, 4, 9).unwrap(),
            },
            HashMap::new(),
            Taxonomy::build(&criteria).unwrap(),
            index,
            catalog,
            DesignationRule::default(),
        )
    }

    #[test]
    fn test_counts_and_dates() {
        let report = SummaryReport::generate(&archive());
        assert_eq!(report.rows.len(), 13);

        let ec1 = &report.rows[0];
        assert_eq!(ec1.code, "EC-1");
        assert_eq!(ec1.approved, 2);
        assert_eq!(ec1.not_found, 1);
        assert_eq!(ec1.first, "2013-04-03");
        assert_eq!(ec1.last, "2013-04-09");

        let syn = &report.rows[12];
        assert_eq!(syn.approved, 0);
        assert_eq!(syn.first, "-");

        assert_eq!(report.total_approved(), 2);
        assert_eq!(report.unexpected, 1);
    }

    #[test]
    fn test_format_terminal() {
        let output = SummaryReport::generate(&archive()).format_terminal();
        assert!(output.contains("EC-1"));
        assert!(output.contains("Total approved courses: 2"));
        assert!(output.contains("unexpected proposal types: 1"));
    }
}
