//! In-memory record store, loadable from JSON.
//!
//! CHANGELOG:
//! - 01/12/2026 - Regex clauses compiled once per query
//! - 01/11/2026 - Initial implementation

use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use super::{Clause, PersonRecord, Predicate, Record, RecordStore};
use crate::error::StoreError;

/// Wrapper for records files with a "records" key.
#[derive(Debug, Deserialize)]
struct RecordsFile {
    records: Vec<PersonRecord>,
}

/// Holds person records in a Vec and evaluates predicates in process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<PersonRecord>,
}

impl MemoryStore {
    pub fn new(records: Vec<PersonRecord>) -> Self {
        Self { records }
    }

    /// Load records from a JSON file.
    ///
    /// Supports both formats:
    /// - `{"records": [...]}`
    /// - `[...]` (flat array)
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, StoreError> {
        if let Ok(wrapper) = serde_json::from_str::<RecordsFile>(content) {
            return Ok(Self::new(wrapper.records));
        }

        let records: Vec<PersonRecord> = serde_json::from_str(content)?;
        Ok(Self::new(records))
    }

    pub fn all(&self) -> &[PersonRecord] {
        &self.records
    }

    pub fn push(&mut self, record: PersonRecord) {
        self.records.push(record);
    }
}

impl RecordStore for MemoryStore {
    type Record = PersonRecord;

    fn query_all(&self, predicate: &Predicate) -> Result<Vec<PersonRecord>, StoreError> {
        if let Some(condition) = &predicate.condition {
            return Err(StoreError::UnsupportedCondition(condition.clone()));
        }

        let mut patterns = HashMap::new();
        compile_patterns(&predicate.clauses, &mut patterns)?;

        Ok(self
            .records
            .iter()
            .filter(|r| predicate.clauses.iter().all(|c| eval(c, *r, &patterns)))
            .cloned()
            .collect())
    }
}

fn compile_patterns<'a>(
    clauses: &'a [Clause],
    patterns: &mut HashMap<&'a str, Regex>,
) -> Result<(), StoreError> {
    for clause in clauses {
        match clause {
            Clause::Matches { pattern, .. } => {
                if !patterns.contains_key(pattern.as_str()) {
                    patterns.insert(pattern.as_str(), Regex::new(pattern)?);
                }
            }
            Clause::AnyOf(inner) => compile_patterns(inner, patterns)?,
            Clause::Equals { .. } => {}
        }
    }
    Ok(())
}

fn eval(clause: &Clause, record: &PersonRecord, patterns: &HashMap<&str, Regex>) -> bool {
    match clause {
        Clause::Equals { field, value } => record.field(field) == Some(value.as_str()),
        Clause::Matches { field, pattern } => match (record.field(field), patterns.get(pattern.as_str())) {
            (Some(text), Some(re)) => re.is_match(text),
            _ => false,
        },
        Clause::AnyOf(inner) => inner.iter().any(|c| eval(c, record, patterns)),
    }
}
