//! Table layouts the repositories read from
//!
//! These mirror the preserved legacy databases. They are never applied to
//! the source databases (which are opened read-only); they exist to build
//! fixture databases with the same shape.

/// Current CUNY course catalog
pub const CATALOG_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS cuny_courses (
    institution    TEXT NOT NULL,
    discipline     TEXT NOT NULL,
    catalog_number TEXT NOT NULL,
    title          TEXT NOT NULL,
    course_status  TEXT,
    designation    TEXT,
    attributes     TEXT
);
"#;

/// Curriculum workflow history
pub const CURRICULUM_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS proposal_types (
    abbr      TEXT PRIMARY KEY,
    full_name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS criteria (
    abbr      TEXT PRIMARY KEY,
    full_text TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS proposals (
    id             INTEGER PRIMARY KEY,
    justifications TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS events_view (
    proposal         INTEGER NOT NULL,
    course           TEXT NOT NULL,
    type             TEXT NOT NULL,
    "effective date" TEXT NOT NULL,
    agency           TEXT NOT NULL,
    action           TEXT NOT NULL
);
"#;
