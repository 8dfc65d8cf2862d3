//! Approval events and the proposals they approve

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Field name → justification text, in the order the proposal stored them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Justifications(Vec<(String, String)>);

impl Justifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry; an existing key keeps its position and takes the new text
    pub fn insert(&mut self, abbr: impl Into<String>, text: impl Into<String>) {
        let abbr = abbr.into();
        let text = text.into();
        match self.0.iter_mut().find(|(k, _)| *k == abbr) {
            Some(entry) => entry.1 = text,
            None => self.0.push((abbr, text)),
        }
    }

    pub fn get(&self, abbr: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == abbr)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for Justifications {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (k, v) in iter {
            out.insert(k, v);
        }
        out
    }
}

impl Serialize for Justifications {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// A row of the approval history joined with its proposal's payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalEvent {
    pub proposal: i64,
    pub course: String,
    pub proposal_type: String,
    pub effective_date: NaiveDate,
    /// Serialized justification blob, still encoded
    pub payload: String,
}

/// The archived form of an approved proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApprovedProposal {
    pub proposal: i64,
    pub effective_date: NaiveDate,
    pub justifications: Justifications,
}

/// Earliest and latest effective dates covered by the archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
}

impl DateRange {
    /// Format a date the way the title block shows it, e.g. "May, 2015"
    pub fn month_year(date: NaiveDate) -> String {
        date.format("%B, %Y").to_string()
    }

    pub fn earliest_label(&self) -> String {
        Self::month_year(self.earliest)
    }

    pub fn latest_label(&self) -> String {
        Self::month_year(self.latest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_preserves_order() {
        let mut j = Justifications::new();
        j.insert("QC-1", "first");
        j.insert("CE-1", "second");
        j.insert("QC-1", "replaced");

        let keys: Vec<_> = j.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["QC-1", "CE-1"]);
        assert_eq!(j.get("QC-1"), Some("replaced"));
        assert_eq!(j.len(), 2);
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let j: Justifications = vec![
            ("Z".to_string(), "last letter".to_string()),
            ("A".to_string(), "first letter".to_string()),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&j).unwrap();
        assert_eq!(json, r#"{"Z":"last letter","A":"first letter"}"#);
    }

    #[test]
    fn test_month_year() {
        let range = DateRange {
            earliest: NaiveDate::from_ymd_opt(2012, 9, 1).unwrap(),
            latest: NaiveDate::from_ymd_opt(2019, 5, 24).unwrap(),
        };
        assert_eq!(range.earliest_label(), "September, 2012");
        assert_eq!(range.latest_label(), "May, 2019");
    }
}
