//! Proposal categories and their groups
//!
//! The general-education taxonomy is fixed: thirteen categories split across
//! the Required Core, the Flexible Core, and the College Option.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three top-level category groups, in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CategoryGroup {
    RequiredCore,
    FlexibleCore,
    CollegeOption,
}

impl CategoryGroup {
    /// All groups in document order
    pub const ALL: [CategoryGroup; 3] = [
        CategoryGroup::RequiredCore,
        CategoryGroup::FlexibleCore,
        CategoryGroup::CollegeOption,
    ];

    /// Human-readable group name
    pub fn name(self) -> &'static str {
        match self {
            Self::RequiredCore => "Required Core",
            Self::FlexibleCore => "Flexible Core",
            Self::CollegeOption => "College Option",
        }
    }

    /// Categories belonging to this group, in declaration order
    pub fn categories(self) -> &'static [Category] {
        match self {
            Self::RequiredCore => &[Category::Ec1, Category::Ec2, Category::Mqr, Category::Lps],
            Self::FlexibleCore => &[
                Category::Used,
                Category::Wcgi,
                Category::Ce,
                Category::Is,
                Category::Sw,
            ],
            Self::CollegeOption => &[Category::Lit, Category::Lang, Category::Sci, Category::Syn],
        }
    }
}

impl fmt::Display for CategoryGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A proposal category
///
/// Variant order is document order, so `Ord` sorts categories the way the
/// archive presents them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    // Required Core
    Ec1,
    Ec2,
    Mqr,
    Lps,
    // Flexible Core
    Used,
    Wcgi,
    Ce,
    Is,
    Sw,
    // College Option
    Lit,
    Lang,
    Sci,
    Syn,
}

impl Category {
    /// All categories in document order
    pub const ALL: [Category; 13] = [
        Category::Ec1,
        Category::Ec2,
        Category::Mqr,
        Category::Lps,
        Category::Used,
        Category::Wcgi,
        Category::Ce,
        Category::Is,
        Category::Sw,
        Category::Lit,
        Category::Lang,
        Category::Sci,
        Category::Syn,
    ];

    /// The abbreviation used by the curriculum database
    pub fn code(self) -> &'static str {
        match self {
            Self::Ec1 => "EC-1",
            Self::Ec2 => "EC-2",
            Self::Mqr => "MQR",
            Self::Lps => "LPS",
            Self::Used => "USED",
            Self::Wcgi => "WCGI",
            Self::Ce => "CE",
            Self::Is => "IS",
            Self::Sw => "SW",
            Self::Lit => "LIT",
            Self::Lang => "LANG",
            Self::Sci => "SCI",
            Self::Syn => "SYN",
        }
    }

    /// Parse a database abbreviation
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    /// The group this category belongs to
    pub fn group(self) -> CategoryGroup {
        match self {
            Self::Ec1 | Self::Ec2 | Self::Mqr | Self::Lps => CategoryGroup::RequiredCore,
            Self::Used | Self::Wcgi | Self::Ce | Self::Is | Self::Sw => {
                CategoryGroup::FlexibleCore
            }
            Self::Lit | Self::Lang | Self::Sci | Self::Syn => CategoryGroup::CollegeOption,
        }
    }

    /// Check if this category is approved by the Senate rather than CCRC
    pub fn is_college_option(self) -> bool {
        self.group() == CategoryGroup::CollegeOption
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// The type code carried by an approval event
///
/// Codes outside the fixed taxonomy are kept rather than dropped so the
/// anomaly stays visible in exports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProposalType {
    Known(Category),
    Unknown(String),
}

impl ProposalType {
    /// Classify a raw type code
    pub fn parse(code: &str) -> Self {
        match Category::from_code(code) {
            Some(category) => Self::Known(category),
            None => Self::Unknown(code.to_string()),
        }
    }

    /// The raw code
    pub fn code(&self) -> &str {
        match self {
            Self::Known(category) => category.code(),
            Self::Unknown(code) => code,
        }
    }

    pub fn category(&self) -> Option<Category> {
        match self {
            Self::Known(category) => Some(*category),
            Self::Unknown(_) => None,
        }
    }
}

impl fmt::Display for ProposalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
