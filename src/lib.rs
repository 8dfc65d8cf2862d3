//! Pathways Archive - static archive of approved general-education proposals
//!
//! This library reads the preserved databases of the retired Queens College
//! Pathways proposal system and renders an HTML archive of every approved
//! proposal, grouped by category, with the justification text submitted for
//! each review criterion and the course's current catalog standing.
//!
//! # Architecture
//!
//! The crate is a linear pipeline:
//!
//! - `storage`: read-only SQLite access to the catalog and curriculum databases
//! - `codec`: decoder for the legacy serialized justification payloads
//! - `services`: criteria taxonomy and proposal grouping
//! - `reports`: the HTML archive document and a terminal summary
//! - `export`: CSV and JSON forms of the grouped approvals
//! - `config`: settings and path management
//! - `cli`: command handlers used by the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use pathways_archive::config::Settings;
//!
//! let archive = pathways_archive::cli::load_archive(&Settings::default())?;
//! archive.render(&mut std::io::stdout())?;
//! ```

pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ArchiveError, ArchiveResult};
