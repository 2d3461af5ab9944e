//! namematch library
//!
//! Cascading person-name matching over pluggable record stores, plus the
//! modules shared by the CLI, daemon and client binaries.
//!
//! CHANGELOG:
//! - 01/12/2026 - Daemon and record commands
//! - 01/11/2026 - Initial library structure

pub mod commands;
pub mod config;
pub mod daemon;
pub mod db;
pub mod error;
pub mod matcher;
pub mod names;
pub mod output;
pub mod store;

pub use error::{MatchError, Result, StoreError};
pub use matcher::{abbr_match, CallOptions, ColumnMapping, MatchEngine, MatchOptions, NameStyle};
pub use names::{DefaultParser, EquivalenceExpander, NameEquivalence, NameParser, NameQuery};
pub use store::{MemoryStore, PersonRecord, Record, RecordStore};
pub use db::SqliteStore;
