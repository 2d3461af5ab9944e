//! Command implementations.
//!
//! CHANGELOG:
//! - 01/11/2026 - Initial module structure

pub mod matching;
pub mod records;
