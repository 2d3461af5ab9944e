//! Structured names, the full-name parser and first-name equivalences.
//!
//! CHANGELOG:
//! - 01/11/2026 - Initial module structure

pub mod equivalence;
pub mod parser;

pub use equivalence::{EquivalenceExpander, NameEquivalence};
pub use parser::{DefaultParser, NameParser};

use serde::{Deserialize, Serialize};

use crate::store::Record;

/// A structured person-name query.
///
/// Blank parts are stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameQuery {
    pub first: Option<String>,
    pub middle: Option<String>,
    pub last: Option<String>,
    pub suffix: Option<String>,
}

impl NameQuery {
    pub fn new(
        first: Option<&str>,
        middle: Option<&str>,
        last: Option<&str>,
        suffix: Option<&str>,
    ) -> Self {
        Self {
            first: non_blank(first),
            middle: non_blank(middle),
            last: non_blank(last),
            suffix: non_blank(suffix),
        }
    }

    /// Copy of this query with another first name.
    pub fn with_first(&self, first: &str) -> Self {
        Self {
            first: non_blank(Some(first)),
            ..self.clone()
        }
    }

    /// Both parts required for a match attempt are present.
    pub fn is_matchable(&self) -> bool {
        self.first.is_some() && self.last.is_some()
    }
}

/// Exposes the query under the short field names (`first`, `middle`, ...).
impl Record for NameQuery {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "first" => self.first.as_deref(),
            "middle" => self.middle.as_deref(),
            "last" => self.last.as_deref(),
            "suffix" => self.suffix.as_deref(),
            _ => None,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
