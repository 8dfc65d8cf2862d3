//! Pipeline services
//!
//! The transform stages between loading rows and rendering output:
//! criteria assembly and proposal grouping.

pub mod grouping;
pub mod taxonomy;

pub use grouping::{ApprovalSource, ProposalIndex};
pub use taxonomy::{assign, Assignment, Taxonomy};
