//! Catalog course model
//!
//! A course as it currently appears in the CUNY catalog, and the status
//! annotation the archive shows next to each approved course.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Attribute flags carried by a catalog course, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseFlag {
    /// Writing intensive
    Wric,
    /// College Option literature
    Lit,
    /// College Option language
    Lang,
    /// College Option science
    Sci,
    /// College Option synthesis
    Syn,
}

impl CourseFlag {
    pub const ALL: [CourseFlag; 5] = [
        CourseFlag::Wric,
        CourseFlag::Lit,
        CourseFlag::Lang,
        CourseFlag::Sci,
        CourseFlag::Syn,
    ];

    /// The keyword shown in the archive's tag bracket
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Wric => "WRIC",
            Self::Lit => "LIT",
            Self::Lang => "LANG",
            Self::Sci => "SCI",
            Self::Syn => "SYN",
        }
    }

    /// The token searched for in the catalog's free-text attribute column
    pub fn attribute_pattern(self) -> &'static str {
        match self {
            Self::Wric => "WRIC",
            Self::Lit => "QNSLIT",
            Self::Lang => "QNSLANG",
            Self::Sci => "QNSSCI",
            Self::Syn => "QNSSYN",
        }
    }
}

/// A course in the current catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogCourse {
    pub title: String,
    pub is_active: bool,
    pub designation: String,
    pub is_wric: bool,
    pub is_lit: bool,
    pub is_lang: bool,
    pub is_sci: bool,
    pub is_syn: bool,
}

impl CatalogCourse {
    /// Build the flag set from a raw attribute string (case-insensitive match)
    pub fn with_attributes(mut self, attributes: &str) -> Self {
        let upper = attributes.to_uppercase();
        for flag in CourseFlag::ALL {
            let present = upper.contains(flag.attribute_pattern());
            match flag {
                CourseFlag::Wric => self.is_wric = present,
                CourseFlag::Lit => self.is_lit = present,
                CourseFlag::Lang => self.is_lang = present,
                CourseFlag::Sci => self.is_sci = present,
                CourseFlag::Syn => self.is_syn = present,
            }
        }
        self
    }

    pub fn has_flag(&self, flag: CourseFlag) -> bool {
        match flag {
            CourseFlag::Wric => self.is_wric,
            CourseFlag::Lit => self.is_lit,
            CourseFlag::Lang => self.is_lang,
            CourseFlag::Sci => self.is_sci,
            CourseFlag::Syn => self.is_syn,
        }
    }

    /// Flags that are set, in display order
    pub fn flags(&self) -> impl Iterator<Item = CourseFlag> + '_ {
        CourseFlag::ALL
            .into_iter()
            .filter(move |f| self.has_flag(*f))
    }
}

/// Reduces a wrapped designation code to the inner category code
///
/// Designations such as `RLPR` or `FCER` wrap a two-letter area code between
/// a group letter and a trailing marker. When a designation of at least three
/// characters starts with one of `leading` and ends with one of `trailing`,
/// the code at character positions 1..3 is surfaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignationRule {
    pub leading: Vec<char>,
    pub trailing: Vec<char>,
}

impl Default for DesignationRule {
    fn default() -> Self {
        Self {
            leading: vec!['R', 'F'],
            trailing: vec!['R'],
        }
    }
}

impl DesignationRule {
    pub fn normalize(&self, designation: &str) -> String {
        let chars: Vec<char> = designation.chars().collect();
        match (chars.first(), chars.last()) {
            (Some(first), Some(last))
                if chars.len() >= 3
                    && self.leading.contains(first)
                    && self.trailing.contains(last) =>
            {
                chars[1..3].iter().collect()
            }
            _ => designation.to_string(),
        }
    }
}

/// Strip the trailing `W` (writing) and `H` (honors) variant letters from a
/// course identifier to get its catalog key
pub fn catalog_key(course: &str) -> &str {
    course.trim_end_matches(&['W', 'H'][..])
}

/// Current catalog standing of an approved course
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogStatus {
    NotFound,
    Inactive,
    Active { title: String, tags: Vec<String> },
}

impl CatalogStatus {
    /// Look up a course (by its variant-stripped key) in the catalog
    pub fn lookup(
        catalog: &HashMap<String, CatalogCourse>,
        course: &str,
        rule: &DesignationRule,
    ) -> Self {
        match catalog.get(catalog_key(course)) {
            None => Self::NotFound,
            Some(info) if !info.is_active => Self::Inactive,
            Some(info) => {
                let mut tags = Vec::new();
                let designation = rule.normalize(&info.designation);
                if !designation.is_empty() {
                    tags.push(designation);
                }
                tags.extend(info.flags().map(|f| f.keyword().to_string()));
                Self::Active {
                    title: info.title.clone(),
                    tags,
                }
            }
        }
    }

    /// Short plain-text label used by exports and summaries
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CatalogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "Not Found"),
            Self::Inactive => write!(f, "Currently Inactive"),
            Self::Active { title, tags } => write!(f, "{} [{}]", title, tags.join(" ")),
        }
    }
}
