//! Proposal grouping
//!
//! Buckets approved proposals by proposal type and then by course. The index
//! is built once from the two approval queries and handed to the renderers.

use std::collections::BTreeMap;

use crate::codec::php::decode_justifications;
use crate::error::ArchiveResult;
use crate::models::{ApprovalEvent, ApprovedProposal, Category, ProposalType};
use crate::storage::CurriculumRepository;

/// GEOL 77 was recorded as both REV-U and SW; REV-U is not a category
const TYPE_CORRECTIONS: [(&str, &str); 1] = [("REV-U", "SW")];

/// Approved proposals keyed by proposal type, then course
#[derive(Debug, Clone, Default)]
pub struct ProposalIndex {
    by_type: BTreeMap<ProposalType, BTreeMap<String, ApprovedProposal>>,
    skipped: Vec<i64>,
}

/// Which query an event came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalSource {
    /// Common Core approvals by CCRC; historical type corrections apply
    Ccrc,
    /// College Option approvals by the Senate
    Senate,
}

impl ProposalIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run both approval queries and group their rows
    pub fn collect(repo: &CurriculumRepository) -> ArchiveResult<Self> {
        let mut index = Self::new();
        index.extend(ApprovalSource::Ccrc, repo.ccrc_approvals()?);
        index.extend(ApprovalSource::Senate, repo.senate_college_option_approvals()?);
        tracing::info!(
            courses = index.len(),
            skipped = index.skipped.len(),
            "grouped approved proposals"
        );
        Ok(index)
    }

    /// Group a batch of events; a later event for the same type and course
    /// replaces the earlier one
    pub fn extend(
        &mut self,
        source: ApprovalSource,
        events: impl IntoIterator<Item = ApprovalEvent>,
    ) {
        for event in events {
            self.add(source, event);
        }
    }

    fn add(&mut self, source: ApprovalSource, event: ApprovalEvent) {
        let code = match source {
            ApprovalSource::Ccrc => corrected_type(&event.proposal_type),
            ApprovalSource::Senate => event.proposal_type.as_str(),
        };
        let proposal_type = ProposalType::parse(code);
        if proposal_type.category().is_none() {
            tracing::warn!(
                proposal = event.proposal,
                course = %event.course,
                proposal_type = %proposal_type,
                "unexpected proposal type"
            );
        }

        let justifications = match decode_justifications(&event.payload) {
            Ok(justifications) => justifications,
            Err(e) => {
                tracing::warn!(
                    proposal = event.proposal,
                    error = %e,
                    "skipping undecodable justifications"
                );
                self.skipped.push(event.proposal);
                return;
            }
        };

        let courses = self.by_type.entry(proposal_type).or_default();
        let replaced = courses.insert(
            event.course.clone(),
            ApprovedProposal {
                proposal: event.proposal,
                effective_date: event.effective_date,
                justifications,
            },
        );
        if let Some(previous) = replaced {
            if previous.proposal != event.proposal {
                tracing::info!(
                    course = %event.course,
                    previous = previous.proposal,
                    current = event.proposal,
                    "later approval supersedes earlier one"
                );
            }
        }
    }

    /// Courses approved under a category, alphabetically
    pub fn courses(&self, category: Category) -> impl Iterator<Item = (&str, &ApprovedProposal)> {
        self.by_type
            .get(&ProposalType::Known(category))
            .into_iter()
            .flat_map(|courses| courses.iter().map(|(k, v)| (k.as_str(), v)))
    }

    pub fn course_count(&self, category: Category) -> usize {
        self.by_type
            .get(&ProposalType::Known(category))
            .map_or(0, BTreeMap::len)
    }

    /// Every grouped entry, including unknown proposal types
    pub fn iter(&self) -> impl Iterator<Item = (&ProposalType, &str, &ApprovedProposal)> {
        self.by_type.iter().flat_map(|(proposal_type, courses)| {
            courses
                .iter()
                .map(move |(course, proposal)| (proposal_type, course.as_str(), proposal))
        })
    }

    /// Total grouped entries
    pub fn len(&self) -> usize {
        self.by_type.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Proposals whose payload could not be decoded
    pub fn skipped(&self) -> &[i64] {
        &self.skipped
    }
}

fn corrected_type(code: &str) -> &str {
    TYPE_CORRECTIONS
        .iter()
        .find(|(from, _)| *from == code)
        .map(|(_, to)| *to)
        .unwrap_or(code)
}
