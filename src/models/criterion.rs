//! Review criteria (prompts)

use serde::{Deserialize, Serialize};

/// Abbreviation prefixes of bookkeeping rows in the criteria table that are
/// not review prompts
const ADMINISTRATIVE_PREFIXES: [&str; 4] = ["admin", "fix", "new", "rev"];

/// A named requirement a proposal must justify satisfying
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub abbr: String,
    pub prompt: String,
}

impl Criterion {
    /// Build a criterion from the stored full text, dropping its leading
    /// `LABEL:` and collapsing doubled spaces
    pub fn from_full_text(abbr: impl Into<String>, full_text: &str) -> Self {
        let body = match full_text.split_once(':') {
            Some((_, rest)) => rest,
            None => full_text,
        };
        Self {
            abbr: abbr.into(),
            prompt: body.trim().replace("  ", " "),
        }
    }

    /// Check whether an abbreviation names a bookkeeping row rather than a prompt
    pub fn is_administrative(abbr: &str) -> bool {
        let lower = abbr.to_lowercase();
        ADMINISTRATIVE_PREFIXES
            .iter()
            .any(|prefix| lower.starts_with(prefix))
    }
}
