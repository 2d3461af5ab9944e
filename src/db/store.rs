//! SQLite-backed record store.
//!
//! CHANGELOG:
//! - 01/13/2026 - Keep "id" columns that are not the rowid
//! - 01/12/2026 - Inserts and table creation for the CLI
//! - 01/11/2026 - Initial implementation

use rusqlite::types::ValueRef;
use rusqlite::{params_from_iter, Connection};
use std::path::Path;
use tracing::trace;

use super::{connection, queries};
use crate::error::StoreError;
use crate::matcher::ColumnMapping;
use crate::store::{PersonRecord, Predicate, RecordStore};

/// A table of person records in a SQLite database.
pub struct SqliteStore {
    conn: Connection,
    table: String,
}

impl SqliteStore {
    /// Wrap an open connection; registers REGEXP on it.
    pub fn new(conn: Connection, table: impl Into<String>) -> Result<Self, StoreError> {
        connection::add_regexp_function(&conn)?;
        Ok(Self {
            conn,
            table: table.into(),
        })
    }

    /// Open (creating if needed) the database at `path`.
    pub fn open(path: impl AsRef<Path>, table: impl Into<String>) -> Result<Self, StoreError> {
        Ok(Self {
            conn: connection::open_db(path)?,
            table: table.into(),
        })
    }

    pub fn open_read_only(path: impl AsRef<Path>, table: impl Into<String>) -> Result<Self, StoreError> {
        Ok(Self {
            conn: connection::open_db_read_only(path)?,
            table: table.into(),
        })
    }

    pub fn in_memory(table: impl Into<String>) -> Result<Self, StoreError> {
        Self::new(Connection::open_in_memory()?, table)
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Create the table with one TEXT column per mapped name part.
    pub fn create_table(&self, mapping: &ColumnMapping) -> Result<(), StoreError> {
        let sql = queries::create_table_sql(&self.table, &mapping.columns());
        self.conn.execute_batch(&sql)?;
        Ok(())
    }

    /// Insert a record; returns the new rowid. `record.id` is ignored.
    pub fn insert(&self, record: &PersonRecord) -> Result<i64, StoreError> {
        let columns: Vec<&str> = record.fields.keys().map(String::as_str).collect();
        let sql = queries::insert_sql(&self.table, &columns);
        let values = record.fields.values().map(|v| v.as_deref());
        self.conn.execute(&sql, params_from_iter(values))?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert many records in one transaction; returns how many were added.
    pub fn insert_all(&mut self, records: &[PersonRecord]) -> Result<usize, StoreError> {
        let tx = self.conn.transaction()?;
        for record in records {
            let columns: Vec<&str> = record.fields.keys().map(String::as_str).collect();
            let sql = queries::insert_sql(&self.table, &columns);
            tx.execute(&sql, params_from_iter(record.fields.values().map(|v| v.as_deref())))?;
        }
        tx.commit()?;
        Ok(records.len())
    }

    /// Every record in the table, in rowid order.
    pub fn all(&self) -> Result<Vec<PersonRecord>, StoreError> {
        self.query_all(&Predicate::new())
    }
}

impl RecordStore for SqliteStore {
    type Record = PersonRecord;

    fn query_all(&self, predicate: &Predicate) -> Result<Vec<PersonRecord>, StoreError> {
        let rendered = queries::render_where(predicate);
        let sql = queries::select_sql(&self.table, &rendered.sql);
        trace!(sql = sql.as_str(), params = ?rendered.params, "query");

        let mut stmt = self.conn.prepare(&sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let rows = stmt.query_map(params_from_iter(rendered.params.iter()), |row| {
            let mut record = PersonRecord::new();
            for (i, name) in columns.iter().enumerate() {
                let value = row.get_ref(i)?;
                if name == queries::ROWID_ALIAS {
                    if let ValueRef::Integer(id) = value {
                        record.id = Some(id);
                    }
                    continue;
                }
                // An INTEGER PRIMARY KEY "id" aliases the rowid already in `record.id`.
                if name == "id" && is_rowid_alias(value, record.id) {
                    continue;
                }
                record.fields.insert(name.clone(), text_value(value));
            }
            Ok(record)
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }
}

fn is_rowid_alias(value: ValueRef<'_>, rowid: Option<i64>) -> bool {
    matches!((value, rowid), (ValueRef::Integer(v), Some(id)) if v == id)
}

fn text_value(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null | ValueRef::Blob(_) => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(t) => Some(String::from_utf8_lossy(t).into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{MatchEngine, MatchOptions};
    use crate::names::{NameEquivalence, NameQuery};
    use crate::store::{Clause, Record};

    fn person(first: &str, middle: Option<&str>, last: &str, suffix: Option<&str>) -> PersonRecord {
        PersonRecord::new()
            .with("first", Some(first))
            .with("middle", middle)
            .with("last", Some(last))
            .with("suffix", suffix)
    }

    fn store() -> SqliteStore {
        let mut store = SqliteStore::in_memory("people").unwrap();
        store.create_table(&ColumnMapping::default()).unwrap();
        store
            .insert_all(&[
                person("Robert", Some("James"), "Smith", None),
                person("R.", None, "Smith", Some("Jr.")),
                person("Rachel", None, "Smith", None),
                person("Robert", None, "smith", None),
            ])
            .unwrap();
        store
    }

    #[test]
    fn test_insert_and_all() {
        let store = store();
        let all = store.all().unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].id, Some(1));
        assert_eq!(all[0].field("first"), Some("Robert"));
        assert_eq!(all[1].field("middle"), None);
        assert_eq!(all[1].field("suffix"), Some("Jr."));
    }

    #[test]
    fn test_id_column_kept_when_not_rowid() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE members (id TEXT, first TEXT, last TEXT);
             INSERT INTO members VALUES ('A-17', 'Ann', 'Lee');",
        )
        .unwrap();
        let members = SqliteStore::new(conn, "members").unwrap();
        let all = members.all().unwrap();
        assert_eq!(all[0].id, Some(1));
        assert_eq!(all[0].field("id"), Some("A-17"));
        assert_eq!(all[0].field("first"), Some("Ann"));

        // create_table's INTEGER PRIMARY KEY is the rowid itself.
        assert_eq!(store().all().unwrap()[0].field("id"), None);
    }

    #[test]
    fn test_query_with_regexp() {
        let store = store();
        let predicate = Predicate::new()
            .and(Clause::AnyOf(vec![
                Clause::equals("first", "Robert"),
                Clause::matches("first", "(?i)^R([.]?)$"),
            ]))
            .and(Clause::equals("last", "Smith"));
        let ids: Vec<_> = store.query_all(&predicate).unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![Some(1), Some(2)]);
    }

    #[test]
    fn test_raw_condition() {
        let store = store();
        let predicate = Predicate::new()
            .with_condition(Some("suffix IS NOT NULL"))
            .and(Clause::equals("last", "Smith"));
        let ids: Vec<_> = store.query_all(&predicate).unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![Some(2)]);
    }

    #[test]
    fn test_bad_condition_is_store_error() {
        let store = store();
        let predicate = Predicate::new().with_condition(Some("no_such_column = 1"));
        assert!(matches!(store.query_all(&predicate), Err(StoreError::Sqlite(_))));
    }

    #[test]
    fn test_engine_over_sqlite() {
        let engine = MatchEngine::new(store())
            .with_expander(NameEquivalence::new(vec![vec!["Robert".into(), "Bob".into()]]));

        let found = engine
            .get_matches(&NameQuery::new(Some("Bob"), Some("J"), Some("Smith"), None))
            .unwrap();
        let ids: Vec<_> = found.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![Some(1)]);

        let found = engine
            .get_matches(&NameQuery::new(Some("Robert"), None, Some("Smith"), Some("Jr")))
            .unwrap();
        let ids: Vec<_> = found.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![Some(2)]);
    }

    #[test]
    fn test_engine_condition_over_sqlite() {
        let mut engine = MatchEngine::new(store()).with_options(MatchOptions {
            skip_match_suffix: true,
            ..MatchOptions::default()
        });
        engine.set_condition(Some("middle IS NULL".to_string()));
        let found = engine
            .get_matches(&NameQuery::new(Some("Robert"), None, Some("Smith"), None))
            .unwrap();
        let ids: Vec<_> = found.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![Some(2)]);
    }
}
