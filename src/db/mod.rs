//! SQLite storage for person records.
//!
//! CHANGELOG:
//! - 01/11/2026 - Initial module structure

pub mod connection;
pub mod queries;
pub mod store;

pub use store::SqliteStore;
