//! Course catalog repository
//!
//! Loads the current catalog entry of every course at one institution.

use std::collections::HashMap;

use rusqlite::{params, Connection};

use crate::error::{ArchiveError, ArchiveResult};
use crate::models::CatalogCourse;

/// Read-only access to the `cuny_courses` table
pub struct CatalogRepository {
    conn: Connection,
}

impl CatalogRepository {
    /// Open the catalog database read-only
    pub fn open(location: &str) -> ArchiveResult<Self> {
        Ok(Self::from_connection(super::open_read_only(location)?))
    }

    /// Wrap an existing connection
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Load every course whose institution contains `institution`
    /// (case-insensitive), keyed by "DISCIPLINE NUMBER"
    pub fn load_courses(&self, institution: &str) -> ArchiveResult<HashMap<String, CatalogCourse>> {
        let mut stmt = self
            .conn
            .prepare(
                r#"
                SELECT discipline || ' ' || catalog_number AS course,
                       title,
                       course_status = 'A' AS is_active,
                       designation,
                       attributes
                  FROM cuny_courses
                 WHERE lower(institution) LIKE '%' || lower(?1) || '%'
                "#,
            )
            .map_err(|e| {
                ArchiveError::Database(format!("Failed to prepare catalog query: {}", e))
            })?;

        let rows = stmt
            .query_map(params![institution], |row| {
                let course: String = row.get(0)?;
                let attributes: Option<String> = row.get(4)?;
                let info = CatalogCourse {
                    title: row.get(1)?,
                    is_active: row.get::<_, Option<bool>>(2)?.unwrap_or(false),
                    designation: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                    ..Default::default()
                }
                .with_attributes(attributes.as_deref().unwrap_or(""));
                Ok((course, info))
            })
            .map_err(|e| ArchiveError::Database(format!("Failed to query catalog: {}", e)))?;

        let mut courses = HashMap::new();
        for row in rows {
            let (course, info) = row
                .map_err(|e| ArchiveError::Database(format!("Failed to read catalog row: {}", e)))?;
            courses.insert(course, info);
        }

        tracing::debug!(count = courses.len(), institution, "loaded catalog courses");
        Ok(courses)
    }
}
