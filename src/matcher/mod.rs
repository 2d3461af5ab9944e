//! Name matching: abbreviation patterns, pairwise comparison and the
//! cascading match engine.
//!
//! CHANGELOG:
//! - 01/11/2026 - Initial module structure

pub mod abbrev;
pub mod compare;
pub mod engine;
pub mod options;

pub use abbrev::{abbr_match, contraction_match, AbbreviationPattern};
pub use compare::NameComparator;
pub use engine::MatchEngine;
pub use options::{CallOptions, ColumnMapping, MatchOptions, NameStyle};
