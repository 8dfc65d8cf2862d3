//! Core data models for the archive
//!
//! This module contains the data structures of the proposal archive:
//! categories, criteria, catalog courses, and approval events.

pub mod approval;
pub mod category;
pub mod course;
pub mod criterion;

pub use approval::{ApprovalEvent, ApprovedProposal, DateRange, Justifications};
pub use category::{Category, CategoryGroup, ProposalType};
pub use course::{catalog_key, CatalogCourse, CatalogStatus, CourseFlag, DesignationRule};
pub use criterion::Criterion;
