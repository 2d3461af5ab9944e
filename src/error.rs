//! Error types for the matcher and the record stores.
//!
//! CHANGELOG:
//! - 01/12/2026 - Split store errors out of MatchError
//! - 01/11/2026 - Initial error types

use thiserror::Error;

/// Errors raised by the matcher.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Positional name arguments were neither a full name nor four parts.
    #[error("invalid number of name arguments: expected 1 or 4, got {0}")]
    InvalidArity(usize),

    /// A pattern was requested for a string with no name tokens.
    #[error("name is empty")]
    EmptyName,

    #[error("invalid abbreviation pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The record store failed; passed through unmodified.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors raised by record stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("invalid match pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The store cannot evaluate raw, store-specific conditions.
    #[error("store does not support raw conditions: {0}")]
    UnsupportedCondition(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid records JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = MatchError> = std::result::Result<T, E>;
