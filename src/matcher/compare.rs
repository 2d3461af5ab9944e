//! Pairwise name comparison.
//!
//! CHANGELOG:
//! - 01/13/2026 - First names accept contractions (Wm / William), no nickname expansion
//! - 01/12/2026 - First names fall back to equivalences
//! - 01/11/2026 - Initial implementation

use super::abbrev::{abbr_match, contraction_match};
use super::options::{MatchOptions, NameStyle};
use crate::store::Record;

/// Dot-, case- and whitespace-insensitive equality; `None` equals blank.
pub fn compare_without_dot(a: Option<&str>, b: Option<&str>) -> bool {
    fn normalize(s: Option<&str>) -> String {
        s.unwrap_or("").replace('.', "").to_lowercase().trim().to_string()
    }
    normalize(a) == normalize(b)
}

/// `None`, empty or whitespace only.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Compares two structured names under the engine's options.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameComparator {
    options: MatchOptions,
}

impl NameComparator {
    pub fn new(options: MatchOptions) -> Self {
        Self { options }
    }

    /// True when `a` and `b` name the same person.
    pub fn names_match(
        &self,
        a: &dyn Record,
        style_a: NameStyle,
        b: &dyn Record,
        style_b: NameStyle,
    ) -> bool {
        let (Some(f1), Some(l1)) = (present(a.field(style_a.first())), present(a.field(style_a.last())))
        else {
            return false;
        };
        let (Some(f2), Some(l2)) = (present(b.field(style_b.first())), present(b.field(style_b.last())))
        else {
            return false;
        };

        if l1.trim().to_lowercase() != l2.trim().to_lowercase() {
            return false;
        }

        if !self.options.skip_match_suffix {
            let s1 = present(a.field(style_a.suffix()));
            let s2 = present(b.field(style_b.suffix()));
            if s1.is_some() && s2.is_some() && !compare_without_dot(s1, s2) {
                return false;
            }
        }

        if !self.first_names_match(f1, f2) {
            return false;
        }

        match (
            present(a.field(style_a.middle())),
            present(b.field(style_b.middle())),
        ) {
            (Some(m1), Some(m2)) => abbr_match(m1, m2) || abbr_match(m2, m1),
            _ => true,
        }
    }

    /// Nicknames are not first-name matches here; only abbreviations and
    /// contractions are.
    fn first_names_match(&self, f1: &str, f2: &str) -> bool {
        abbr_match(f1, f2)
            || abbr_match(f2, f1)
            || contraction_match(f1, f2)
            || contraction_match(f2, f1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::NameQuery;
    use crate::store::PersonRecord;

    fn short(first: &str, middle: Option<&str>, last: &str, suffix: Option<&str>) -> NameQuery {
        NameQuery::new(Some(first), middle, Some(last), suffix)
    }

    #[test]
    fn test_compare_without_dot() {
        assert!(compare_without_dot(Some("Jr."), Some("jr")));
        assert!(compare_without_dot(Some(" J. R. "), Some("j r")));
        assert!(compare_without_dot(None, Some("  ")));
        assert!(compare_without_dot(None, None));
        assert!(!compare_without_dot(Some("Jr"), None));
    }

    #[test]
    fn test_wm_matches_william() {
        let cmp = NameComparator::new(MatchOptions::default());
        let n1 = short("Wm", None, "Clark", None);
        let n2 = short("William", Some("Henry"), "Clark", None);
        assert!(cmp.names_match(&n1, NameStyle::Short, &n2, NameStyle::Short));
        assert!(cmp.names_match(&n2, NameStyle::Short, &n1, NameStyle::Short));
    }

    #[test]
    fn test_nicknames_do_not_match() {
        let cmp = NameComparator::default();
        let bob = short("Bob", None, "Smith", None);
        let robert = short("Robert", None, "Smith", None);
        assert!(!cmp.names_match(&bob, NameStyle::Short, &robert, NameStyle::Short));
        assert!(!cmp.names_match(&robert, NameStyle::Short, &bob, NameStyle::Short));
        assert!(!cmp.names_match(
            &short("Liam", None, "Clark", None),
            NameStyle::Short,
            &short("William", None, "Clark", None),
            NameStyle::Short
        ));
    }

    #[test]
    fn test_initial_first_name_either_direction() {
        let cmp = NameComparator::new(MatchOptions::default());
        let n1 = short("J.", Some("R"), "Smith", None);
        let n2 = short("John", Some("Robert"), "smith ", None);
        assert!(cmp.names_match(&n1, NameStyle::Short, &n2, NameStyle::Short));
        assert!(cmp.names_match(&n2, NameStyle::Short, &n1, NameStyle::Short));
    }

    #[test]
    fn test_different_last_or_first() {
        let cmp = NameComparator::new(MatchOptions::default());
        let n1 = short("John", None, "Smith", None);
        assert!(!cmp.names_match(&n1, NameStyle::Short, &short("John", None, "Smyth", None), NameStyle::Short));
        assert!(!cmp.names_match(&n1, NameStyle::Short, &short("Jack", None, "Smith", None), NameStyle::Short));
    }

    #[test]
    fn test_missing_first_or_last() {
        let cmp = NameComparator::new(MatchOptions::default());
        let full = short("John", None, "Smith", None);
        let no_first = NameQuery::new(None, None, Some("Smith"), None);
        assert!(!cmp.names_match(&full, NameStyle::Short, &no_first, NameStyle::Short));
    }

    #[test]
    fn test_suffix_rules() {
        let n1 = short("John", None, "Smith", Some("Jr."));
        let n2 = short("John", None, "Smith", Some("Sr"));
        let n3 = short("John", None, "Smith", None);

        let cmp = NameComparator::new(MatchOptions::default());
        assert!(!cmp.names_match(&n1, NameStyle::Short, &n2, NameStyle::Short));
        assert!(cmp.names_match(&n1, NameStyle::Short, &n3, NameStyle::Short));
        assert!(cmp.names_match(&n1, NameStyle::Short, &short("John", None, "Smith", Some("JR")), NameStyle::Short));

        let skip = MatchOptions {
            skip_match_suffix: true,
            ..MatchOptions::default()
        };
        let cmp = NameComparator::new(skip);
        assert!(cmp.names_match(&n1, NameStyle::Short, &n2, NameStyle::Short));
    }

    #[test]
    fn test_middle_names() {
        let cmp = NameComparator::new(MatchOptions::default());
        let n1 = short("John", Some("Zoellner Miller"), "Smith", None);
        assert!(cmp.names_match(&n1, NameStyle::Short, &short("John", Some("Z. M."), "Smith", None), NameStyle::Short));
        assert!(!cmp.names_match(&n1, NameStyle::Short, &short("John", Some("Paul"), "Smith", None), NameStyle::Short));
    }

    #[test]
    fn test_long_style_record() {
        let cmp = NameComparator::new(MatchOptions::default());
        let record = PersonRecord::new()
            .with("firstname", Some("Ada"))
            .with("middlename", None)
            .with("lastname", Some("Lovelace"));
        let query = short("A", Some("King"), "Lovelace", None);
        assert!(cmp.names_match(&record, NameStyle::Long, &query, NameStyle::Short));
        assert!(!cmp.names_match(&record, NameStyle::Short, &query, NameStyle::Short));
    }
}
