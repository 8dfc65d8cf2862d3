//! Shared fixture databases for the command-line tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use rusqlite::{params, Connection};
use tempfile::TempDir;

use pathways_archive::storage::schema::{CATALOG_SCHEMA, CURRICULUM_SCHEMA};

/// A temp directory holding a catalog database, a curriculum database,
/// and an isolated config directory
pub struct TestEnv {
    tmp: TempDir,
    pub catalog: PathBuf,
    pub curriculum: PathBuf,
}

impl TestEnv {
    /// Populated databases covering both approval bodies
    pub fn new() -> Self {
        let env = Self::empty();
        env.populate();
        env
    }

    /// Databases with the schema but no rows
    pub fn empty() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let catalog = tmp.path().join("catalog.db");
        let curriculum = tmp.path().join("curriculum.db");

        Connection::open(&catalog)
            .expect("create catalog db")
            .execute_batch(CATALOG_SCHEMA)
            .expect("catalog schema");
        Connection::open(&curriculum)
            .expect("create curriculum db")
            .execute_batch(CURRICULUM_SCHEMA)
            .expect("curriculum schema");

        Self {
            tmp,
            catalog,
            curriculum,
        }
    }

    pub fn dir(&self) -> &Path {
        self.tmp.path()
    }

    /// The binary pointed at this environment's databases
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("pathways-archive").expect("binary built");
        cmd.env("PATHWAYS_ARCHIVE_CONFIG_DIR", self.tmp.path().join("config"))
            .env("PATHWAYS_CATALOG_DB", &self.catalog)
            .env("PATHWAYS_CURRICULUM_DB", &self.curriculum)
            .env_remove("RUST_LOG");
        cmd
    }

    fn populate(&self) {
        let catalog = Connection::open(&self.catalog).unwrap();
        for (discipline, number, title, status, designation, attributes) in [
            ("ENGL", "110", "College Writing I", "A", "RECR", "WRIC"),
            ("PHIL", "104", "Introduction to Ethics", "A", "RCER", "QNSLIT WRIC"),
            ("HIST", "101", "Ancient Worlds", "I", "FWGR", ""),
        ] {
            catalog
                .execute(
                    "INSERT INTO cuny_courses VALUES ('QNS01', ?1, ?2, ?3, ?4, ?5, ?6)",
                    params![discipline, number, title, status, designation, attributes],
                )
                .unwrap();
        }

        let curriculum = Connection::open(&self.curriculum).unwrap();
        curriculum
            .execute_batch(
                r#"
                INSERT INTO proposal_types VALUES ('EC-1', 'English Composition I');
                INSERT INTO proposal_types VALUES ('CE', 'Creative Expression');
                INSERT INTO proposal_types VALUES ('WCGI', 'World Cultures and Global Issues');
                INSERT INTO proposal_types VALUES ('LIT', 'Literature');
                INSERT INTO criteria VALUES ('QC-1', 'QC-1: Address how the course meets the goals of a liberal arts education.');
                INSERT INTO criteria VALUES ('QC-2', 'QC-2: Describe the  course''s contribution.');
                INSERT INTO criteria VALUES ('FCC-1', 'FCC-1: Gather and interpret evidence.');
                INSERT INTO criteria VALUES ('FCC-2', 'FCC-2: Evaluate evidence critically.');
                INSERT INTO criteria VALUES ('FCC-3', 'FCC-3: Produce well-reasoned arguments.');
                INSERT INTO criteria VALUES ('CE-1', 'CE-1: Appreciate the creative process.');
                INSERT INTO criteria VALUES ('LIT-1', 'LIT-1: Read literary texts closely.');
                INSERT INTO criteria VALUES ('Admin', 'Admin: bookkeeping row');
                "#,
            )
            .unwrap();

        for (proposal, course, kind, date, agency, payload) in [
            (201, "ENGL 110", "EC-1", "2013-03-01", "CCRC", payload("QC-1", "Writing practice.")),
            (202, "PHIL 104W", "CE", "2013-09-15", "CCRC", payload("CE-1", "Studio work.")),
            (203, "HIST 101", "WCGI", "2014-02-01", "CCRC", payload("QC-2", "Global sources.")),
            (204, "PHYS 999", "CE", "2014-05-01", "CCRC", payload("QC-1", "Acoustics.")),
            (205, "PHIL 104W", "LIT", "2015-01-10", "Senate", payload("LIT-1", "Close reading.")),
        ] {
            add_event(&curriculum, proposal, course, kind, date, agency, &payload);
        }
    }
}

/// Insert one approved proposal event
pub fn add_event(
    conn: &Connection,
    proposal: i64,
    course: &str,
    kind: &str,
    date: &str,
    agency: &str,
    payload: &str,
) {
    conn.execute(
        "INSERT OR REPLACE INTO proposals (id, justifications) VALUES (?1, ?2)",
        params![proposal, payload],
    )
    .unwrap();
    conn.execute(
        r#"INSERT INTO events_view (proposal, course, type, "effective date", agency, action)
           VALUES (?1, ?2, ?3, ?4, ?5, 'Approve')"#,
        params![proposal, course, kind, date, agency],
    )
    .unwrap();
}

/// A one-field serialized justification payload
pub fn payload(abbr: &str, text: &str) -> String {
    format!(
        "a:1:{{s:{}:\"{}\";s:{}:\"{}\";}}",
        abbr.len(),
        abbr,
        text.len(),
        text
    )
}
