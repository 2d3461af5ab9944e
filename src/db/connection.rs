//! SQLite connection management for the people database.
//!
//! CHANGELOG:
//! - 01/12/2026 - REGEXP backed by the regex crate
//! - 01/11/2026 - Adapted from the Messages.db connection helper

use regex::Regex;
use rusqlite::functions::FunctionFlags;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, Error, OpenFlags};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::StoreError;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Default people database path.
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("namematch")
        .join("people.db")
}

/// Open (creating if needed) a read-write connection with REGEXP registered.
pub fn open_db(path: impl AsRef<Path>) -> Result<Connection, StoreError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let conn = Connection::open(path)?;
    add_regexp_function(&conn)?;
    Ok(conn)
}

/// Open a read-only connection with REGEXP registered.
pub fn open_db_read_only(path: impl AsRef<Path>) -> Result<Connection, StoreError> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    add_regexp_function(&conn)?;
    Ok(conn)
}

/// Register `regexp(pattern, text)`, which SQLite calls for `text REGEXP pattern`.
///
/// The compiled pattern is cached per statement. NULL text never matches.
pub fn add_regexp_function(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "regexp",
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let regex: Arc<Regex> = ctx.get_or_create_aux(0, |vr| -> Result<_, BoxError> {
                Ok(Regex::new(vr.as_str()?)?)
            })?;
            let is_match = match ctx.get_raw(1) {
                ValueRef::Null => false,
                value => {
                    let text = value.as_str().map_err(|e| Error::UserFunctionError(e.into()))?;
                    regex.is_match(text)
                }
            };
            Ok(is_match)
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_db_path() {
        let path = default_db_path();
        assert!(path.ends_with("namematch/people.db"));
    }

    #[test]
    fn test_regexp_function() {
        let conn = Connection::open_in_memory().unwrap();
        add_regexp_function(&conn).unwrap();

        let hit: bool = conn
            .query_row("SELECT 'J.' REGEXP '(?i)^j([.]?)$'", [], |row| row.get(0))
            .unwrap();
        assert!(hit);

        let miss: bool = conn
            .query_row("SELECT 'Jack' REGEXP '(?i)^j([.]?)$'", [], |row| row.get(0))
            .unwrap();
        assert!(!miss);

        let null: bool = conn
            .query_row("SELECT NULL REGEXP '^a$'", [], |row| row.get(0))
            .unwrap();
        assert!(!null);
    }

    #[test]
    fn test_open_db_creates_file() {
        let dir = std::env::temp_dir().join(format!("namematch-test-{}", std::process::id()));
        let path = dir.join("people.db");
        let conn = open_db(&path).unwrap();
        conn.execute_batch("CREATE TABLE t (x TEXT)").unwrap();
        drop(conn);
        assert!(path.exists());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
