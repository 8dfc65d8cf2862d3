//! Curriculum workflow repository
//!
//! Reads proposal types, review criteria, and the approval history of the
//! retired proposal system.

use std::collections::HashMap;

use rusqlite::{params_from_iter, Connection, Row};

use crate::error::{ArchiveError, ArchiveResult};
use crate::models::{ApprovalEvent, Category, Criterion, DateRange};

/// Agency that approves Common Core (Required and Flexible) proposals
pub const CCRC: &str = "CCRC";
/// Agency that approves College Option proposals
pub const SENATE: &str = "Senate";
/// The only action that puts an event in scope
pub const APPROVE: &str = "Approve";

/// Read-only access to the curriculum database
pub struct CurriculumRepository {
    conn: Connection,
}

/// `?first, ?first+1, ...` placeholders for the College Option type codes
fn college_option_placeholders(first: usize) -> String {
    (0..college_option_codes().count())
        .map(|i| format!("?{}", first + i))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Codes of the Senate-approved categories
fn college_option_codes() -> impl Iterator<Item = &'static str> {
    Category::ALL
        .iter()
        .filter(|c| c.is_college_option())
        .map(|c| c.code())
}

impl CurriculumRepository {
    /// Open the curriculum database read-only
    pub fn open(location: &str) -> ArchiveResult<Self> {
        Ok(Self::from_connection(super::open_read_only(location)?))
    }

    /// Wrap an existing connection
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Earliest and latest effective dates of in-scope approvals among
    /// proposals numbered above `min_proposal`
    ///
    /// Returns `None` when no event qualifies.
    pub fn date_range(&self, min_proposal: i64) -> ArchiveResult<Option<DateRange>> {
        let sql = format!(
            r#"
            SELECT min("effective date"), max("effective date")
              FROM events_view
             WHERE proposal > ?1
               AND ((agency = '{ccrc}' AND action = '{approve}')
                    OR (type IN ({types}) AND agency = '{senate}' AND action = '{approve}'))
            "#,
            ccrc = CCRC,
            senate = SENATE,
            approve = APPROVE,
            types = college_option_placeholders(2),
        );

        let mut params: Vec<rusqlite::types::Value> = vec![min_proposal.into()];
        params.extend(college_option_codes().map(|c| c.to_string().into()));

        let (earliest, latest): (Option<String>, Option<String>) = self
            .conn
            .query_row(&sql, params_from_iter(params), |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .map_err(|e| ArchiveError::Database(format!("Failed to query date range: {}", e)))?;

        match (earliest, latest) {
            (Some(earliest), Some(latest)) => Ok(Some(DateRange {
                earliest: super::parse_date(&earliest)?,
                latest: super::parse_date(&latest)?,
            })),
            _ => Ok(None),
        }
    }

    /// Full names of the given categories
    ///
    /// Categories missing from `proposal_types` are absent from the result.
    pub fn proposal_type_names(
        &self,
        categories: &[Category],
    ) -> ArchiveResult<HashMap<Category, String>> {
        if categories.is_empty() {
            return Ok(HashMap::new());
        }

        let placeholders = (1..=categories.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT abbr, full_name FROM proposal_types WHERE abbr IN ({})",
            placeholders
        );

        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| ArchiveError::Database(format!("Failed to prepare type query: {}", e)))?;
        let rows = stmt
            .query_map(params_from_iter(categories.iter().map(|c| c.code())), |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(|e| ArchiveError::Database(format!("Failed to query proposal types: {}", e)))?;

        let mut names = HashMap::new();
        for row in rows {
            let (abbr, full_name) = row.map_err(|e| {
                ArchiveError::Database(format!("Failed to read proposal type row: {}", e))
            })?;
            if let Some(category) = Category::from_code(&abbr) {
                names.insert(category, full_name);
            }
        }
        Ok(names)
    }

    /// All review criteria ordered by abbreviation, excluding bookkeeping rows
    pub fn criteria(&self) -> ArchiveResult<Vec<Criterion>> {
        let mut stmt = self
            .conn
            .prepare("SELECT abbr, full_text FROM criteria ORDER BY abbr")
            .map_err(|e| {
                ArchiveError::Database(format!("Failed to prepare criteria query: {}", e))
            })?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(|e| ArchiveError::Database(format!("Failed to query criteria: {}", e)))?;

        let mut criteria = Vec::new();
        for row in rows {
            let (abbr, full_text) = row.map_err(|e| {
                ArchiveError::Database(format!("Failed to read criterion row: {}", e))
            })?;
            if Criterion::is_administrative(&abbr) {
                continue;
            }
            criteria.push(Criterion::from_full_text(abbr, &full_text));
        }

        tracing::debug!(count = criteria.len(), "loaded criteria");
        Ok(criteria)
    }

    /// Common Core proposals approved by CCRC, ordered by proposal
    pub fn ccrc_approvals(&self) -> ArchiveResult<Vec<ApprovalEvent>> {
        let sql = format!(
            r#"
            SELECT e.proposal, e.course, e.type, e."effective date", p.justifications
              FROM events_view e
              JOIN proposals p ON p.id = e.proposal
             WHERE e.agency = '{ccrc}'
               AND e.action = '{approve}'
             ORDER BY e.proposal
            "#,
            ccrc = CCRC,
            approve = APPROVE,
        );
        self.approval_events(&sql, Vec::new())
    }

    /// College Option proposals approved by the Senate, ordered by proposal
    pub fn senate_college_option_approvals(&self) -> ArchiveResult<Vec<ApprovalEvent>> {
        let sql = format!(
            r#"
            SELECT e.proposal, e.course, e.type, e."effective date", p.justifications
              FROM events_view e
              JOIN proposals p ON p.id = e.proposal
             WHERE e.type IN ({types})
               AND e.agency = '{senate}'
               AND e.action = '{approve}'
             ORDER BY e.proposal
            "#,
            types = college_option_placeholders(1),
            senate = SENATE,
            approve = APPROVE,
        );
        self.approval_events(&sql, college_option_codes().collect())
    }

    fn approval_events(&self, sql: &str, params: Vec<&str>) -> ArchiveResult<Vec<ApprovalEvent>> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| ArchiveError::Database(format!("Failed to prepare event query: {}", e)))?;
        let rows = stmt
            .query_map(params_from_iter(params), raw_event)
            .map_err(|e| ArchiveError::Database(format!("Failed to query events: {}", e)))?;

        let mut events = Vec::new();
        for row in rows {
            let (proposal, course, proposal_type, date, payload) = row.map_err(|e| {
                ArchiveError::Database(format!("Failed to read event row: {}", e))
            })?;
            events.push(ApprovalEvent {
                proposal,
                course,
                proposal_type,
                effective_date: super::parse_date(&date)?,
                payload,
            });
        }

        tracing::debug!(count = events.len(), "loaded approval events");
        Ok(events)
    }
}

type RawEvent = (i64, String, String, String, String);

fn raw_event(row: &Row<'_>) -> rusqlite::Result<RawEvent> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
}
