//! Category/criteria assembly
//!
//! Attaches review criteria to each proposal category. Every category starts
//! with the universal criteria; the rest are assigned by abbreviation prefix.

use std::collections::BTreeMap;

use crate::error::{ArchiveError, ArchiveResult};
use crate::models::{Category, CategoryGroup, Criterion};

/// Criteria every general-education proposal must address
pub const UNIVERSAL_CRITERIA: [&str; 2] = ["QC-1", "QC-2"];

/// Criteria every Flexible Core proposal must also address
pub const FLEXIBLE_CORE_CRITERIA: [&str; 3] = ["FCC-1", "FCC-2", "FCC-3"];

/// Prefix rules, evaluated in order; the first match wins.
///
/// `CW-` deliberately excludes the `CW2-n` criteria, which duplicate `CW-n`.
pub const PREFIX_RULES: [(&str, Category); 13] = [
    ("EC", Category::Ec1),
    ("CW-", Category::Ec2),
    ("MQ", Category::Mqr),
    ("LP", Category::Lps),
    ("WG", Category::Wcgi),
    ("US", Category::Used),
    ("CE", Category::Ce),
    ("IS", Category::Is),
    ("SW", Category::Sw),
    ("LI", Category::Lit),
    ("LA", Category::Lang),
    ("SC", Category::Sci),
    ("SY", Category::Syn),
];

/// Where a criterion lands in the taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignment {
    Category(Category),
    Unassigned,
}

/// Classify a criterion abbreviation by prefix
pub fn assign(abbr: &str) -> Assignment {
    PREFIX_RULES
        .iter()
        .find(|(prefix, _)| abbr.starts_with(prefix))
        .map(|(_, category)| Assignment::Category(*category))
        .unwrap_or(Assignment::Unassigned)
}

/// Ordered criteria per category
#[derive(Debug, Clone)]
pub struct Taxonomy {
    criteria: BTreeMap<Category, Vec<Criterion>>,
}

impl Taxonomy {
    /// Build the taxonomy from the full criteria list (in load order)
    ///
    /// Fails if a universal criterion is missing.
    pub fn build(all_criteria: &[Criterion]) -> ArchiveResult<Self> {
        let lookup = |abbr: &str| -> ArchiveResult<Criterion> {
            all_criteria
                .iter()
                .find(|c| c.abbr == abbr)
                .cloned()
                .ok_or_else(|| ArchiveError::MissingCriterion(abbr.to_string()))
        };

        let universal = UNIVERSAL_CRITERIA
            .iter()
            .map(|abbr| lookup(abbr))
            .collect::<ArchiveResult<Vec<_>>>()?;
        let flexible = FLEXIBLE_CORE_CRITERIA
            .iter()
            .map(|abbr| lookup(abbr))
            .collect::<ArchiveResult<Vec<_>>>()?;

        let mut criteria = BTreeMap::new();
        for category in Category::ALL {
            let mut initial = universal.clone();
            if category.group() == CategoryGroup::FlexibleCore {
                initial.extend(flexible.iter().cloned());
            }
            criteria.insert(category, initial);
        }

        let mut taxonomy = Self { criteria };
        for criterion in all_criteria {
            if let Assignment::Category(category) = assign(&criterion.abbr) {
                taxonomy.insert(category, criterion.clone());
            }
        }
        Ok(taxonomy)
    }

    /// Insert or replace in place, keeping first-insertion order
    fn insert(&mut self, category: Category, criterion: Criterion) {
        let list = self.criteria.entry(category).or_default();
        match list.iter_mut().find(|c| c.abbr == criterion.abbr) {
            Some(existing) => *existing = criterion,
            None => list.push(criterion),
        }
    }

    /// The criteria attached to a category, in display order
    pub fn criteria_for(&self, category: Category) -> &[Criterion] {
        self.criteria
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criterion(abbr: &str) -> Criterion {
        Criterion {
            abbr: abbr.into(),
            prompt: format!("prompt for {}", abbr),
        }
    }

    fn sample() -> Vec<Criterion> {
        let mut abbrs = vec![
            "CE-1", "CW-1", "CW2-1", "EC-1", "FCC-1", "FCC-2", "FCC-3", "IS-1", "LA-1", "LI-1",
            "LP-1", "MQ-1", "QC-1", "QC-2", "SC-1", "SW-1", "SY-1", "US-1", "WG-1", "ZZ-9",
        ];
        abbrs.sort();
        abbrs.into_iter().map(criterion).collect()
    }

    fn abbrs(taxonomy: &Taxonomy, category: Category) -> Vec<&str> {
        taxonomy
            .criteria_for(category)
            .iter()
            .map(|c| c.abbr.as_str())
            .collect()
    }

    #[test]
    fn test_assign_rules() {
        assert_eq!(assign("EC-3"), Assignment::Category(Category::Ec1));
        assert_eq!(assign("CW-2"), Assignment::Category(Category::Ec2));
        assert_eq!(assign("CW2-2"), Assignment::Unassigned);
        assert_eq!(assign("SY-1"), Assignment::Category(Category::Syn));
        assert_eq!(assign("QC-1"), Assignment::Unassigned);
        assert_eq!(assign("FCC-1"), Assignment::Unassigned);
        assert_eq!(assign("ec-1"), Assignment::Unassigned);
    }

    #[test]
    fn test_universal_criteria_first() {
        let taxonomy = Taxonomy::build(&sample()).unwrap();

        assert_eq!(abbrs(&taxonomy, Category::Ec1), vec!["QC-1", "QC-2", "EC-1"]);
        assert_eq!(abbrs(&taxonomy, Category::Ec2), vec!["QC-1", "QC-2", "CW-1"]);
        assert_eq!(
            abbrs(&taxonomy, Category::Ce),
            vec!["QC-1", "QC-2", "FCC-1", "FCC-2", "FCC-3", "CE-1"]
        );
        assert_eq!(abbrs(&taxonomy, Category::Lit), vec!["QC-1", "QC-2", "LI-1"]);
    }

    #[test]
    fn test_each_prefixed_criterion_assigned_once() {
        let all = sample();
        let taxonomy = Taxonomy::build(&all).unwrap();

        for criterion in &all {
            let universal = UNIVERSAL_CRITERIA.contains(&criterion.abbr.as_str())
                || FLEXIBLE_CORE_CRITERIA.contains(&criterion.abbr.as_str());
            if universal {
                continue;
            }
            let holders = Category::ALL
                .iter()
                .filter(|c| abbrs(&taxonomy, **c).contains(&criterion.abbr.as_str()))
                .count();
            match assign(&criterion.abbr) {
                Assignment::Category(_) => assert_eq!(holders, 1, "{}", criterion.abbr),
                Assignment::Unassigned => assert_eq!(holders, 0, "{}", criterion.abbr),
            }
        }
    }

    #[test]
    fn test_missing_universal_criterion() {
        let without_qc2: Vec<_> = sample().into_iter().filter(|c| c.abbr != "QC-2").collect();
        let err = Taxonomy::build(&without_qc2).unwrap_err();
        assert!(matches!(err, ArchiveError::MissingCriterion(ref a) if a == "QC-2"));
    }

    #[test]
    fn test_scan_order_preserved() {
        let mut all = sample();
        all.push(criterion("EC-2"));
        all.push(criterion("EC-10"));
        let taxonomy = Taxonomy::build(&all).unwrap();
        assert_eq!(
            abbrs(&taxonomy, Category::Ec1),
            vec!["QC-1", "QC-2", "EC-1", "EC-2", "EC-10"]
        );
    }
}
