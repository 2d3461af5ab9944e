//! Column mapping and match options.
//!
//! CHANGELOG:
//! - 01/11/2026 - Initial implementation

use serde::{Deserialize, Serialize};

/// Maps the logical name parts onto record store field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub first: String,
    pub middle: String,
    pub last: String,
    pub suffix: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            first: "first".to_string(),
            middle: "middle".to_string(),
            last: "last".to_string(),
            suffix: "suffix".to_string(),
        }
    }
}

impl ColumnMapping {
    /// Field names in first/middle/last/suffix order.
    pub fn columns(&self) -> [&str; 4] {
        [&self.first, &self.middle, &self.last, &self.suffix]
    }
}

/// Engine-wide match options, fixed at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Return first/last/suffix candidates without looking at middle names.
    pub skip_match_middle_name: bool,
    /// Ignore suffixes, e.g. when the store has no suffix column.
    pub skip_match_suffix: bool,
}

/// Per-call options; never stored on the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallOptions {
    /// Retry with first-name equivalences when nothing matches.
    pub recursive: bool,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self { recursive: true }
    }
}

impl CallOptions {
    pub fn no_expansion() -> Self {
        Self { recursive: false }
    }
}

/// Which field names a name representation uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameStyle {
    /// `first`, `middle`, `last`, `suffix`
    Short,
    /// `firstname`, `middlename`, `lastname`, `suffix`
    Long,
}

impl NameStyle {
    pub fn first(self) -> &'static str {
        match self {
            NameStyle::Short => "first",
            NameStyle::Long => "firstname",
        }
    }

    pub fn middle(self) -> &'static str {
        match self {
            NameStyle::Short => "middle",
            NameStyle::Long => "middlename",
        }
    }

    pub fn last(self) -> &'static str {
        match self {
            NameStyle::Short => "last",
            NameStyle::Long => "lastname",
        }
    }

    pub fn suffix(self) -> &'static str {
        "suffix"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_mapping_gets_defaults() {
        let mapping: ColumnMapping = serde_json::from_str(r#"{"first": "given_name"}"#).unwrap();
        assert_eq!(mapping.first, "given_name");
        assert_eq!(mapping.last, "last");
        assert_eq!(mapping.columns(), ["given_name", "middle", "last", "suffix"]);
    }

    #[test]
    fn test_options_defaults() {
        let options: MatchOptions = serde_json::from_str(r#"{"skip_match_suffix": true}"#).unwrap();
        assert!(options.skip_match_suffix);
        assert!(!options.skip_match_middle_name);
        assert!(CallOptions::default().recursive);
    }

    #[test]
    fn test_style_fields() {
        assert_eq!(NameStyle::Long.first(), "firstname");
        assert_eq!(NameStyle::Short.last(), "last");
        assert_eq!(NameStyle::Long.suffix(), "suffix");
    }
}
