//! Record store contract: records, predicates and the store trait.
//!
//! CHANGELOG:
//! - 01/13/2026 - PersonRecord keeps an own "id" field on output
//! - 01/12/2026 - Added AnyOf clause for first-name retrieval
//! - 01/11/2026 - Initial module structure

pub mod memory;

pub use memory::MemoryStore;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::error::StoreError;

/// Read access to the named fields of a person record.
pub trait Record {
    /// Value of `name`, or `None` when the field is missing or null.
    fn field(&self, name: &str) -> Option<&str>;
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> Option<&str> {
        (**self).field(name)
    }
}

/// A collection of person records that can be queried by predicate.
pub trait RecordStore {
    type Record: Record;

    /// Return every record satisfying `predicate`, in the store's native order.
    fn query_all(&self, predicate: &Predicate) -> Result<Vec<Self::Record>, StoreError>;
}

impl<S: RecordStore + ?Sized> RecordStore for &S {
    type Record = S::Record;

    fn query_all(&self, predicate: &Predicate) -> Result<Vec<Self::Record>, StoreError> {
        (**self).query_all(predicate)
    }
}

/// One condition on a record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// Case-sensitive equality.
    Equals { field: String, value: String },
    /// Regular expression match; the pattern carries its own anchors and flags.
    Matches { field: String, pattern: String },
    /// At least one of the inner clauses holds.
    AnyOf(Vec<Clause>),
}

impl Clause {
    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Clause::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn matches(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Clause::Matches {
            field: field.into(),
            pattern: pattern.into(),
        }
    }
}

/// Conjunction of clauses plus an optional raw, store-specific condition.
///
/// The raw condition is ANDed in first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    pub condition: Option<String>,
    pub clauses: Vec<Clause>,
}

impl Predicate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_condition(mut self, condition: Option<&str>) -> Self {
        self.condition = condition.map(String::from);
        self
    }

    pub fn and(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }
}

/// A person record as held by the shipped stores.
///
/// Serializes as one flat object. `id` is the store id unless the record
/// has its own `id` field, which then takes the key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PersonRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Option<String>>,
}

impl PersonRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter.
    pub fn with(mut self, name: &str, value: Option<&str>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: Option<&str>) {
        self.fields.insert(name.to_string(), value.map(String::from));
    }
}

impl Serialize for PersonRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let id = self.id.filter(|_| !self.fields.contains_key("id"));
        let mut map = serializer.serialize_map(Some(self.fields.len() + usize::from(id.is_some())))?;
        if let Some(id) = id {
            map.serialize_entry("id", &id)?;
        }
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl Record for PersonRecord {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|v| v.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_record_json() {
        let record: PersonRecord =
            serde_json::from_str(r#"{"id": 7, "first": "Ada", "middle": null}"#).unwrap();
        assert_eq!(record.id, Some(7));
        assert_eq!(record.field("first"), Some("Ada"));
        assert_eq!(record.field("middle"), None);
        assert_eq!(record.field("suffix"), None);
    }

    #[test]
    fn test_person_record_serializes_flat() {
        let record = PersonRecord::new().with("first", Some("Ada")).with("middle", None);
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            serde_json::json!({"first": "Ada", "middle": null})
        );

        let mut record = record;
        record.id = Some(3);
        assert_eq!(serde_json::to_value(&record).unwrap()["id"], 3);

        // An own "id" field is not shadowed by the store id.
        record.set("id", Some("A-17"));
        let text = serde_json::to_string(&record).unwrap();
        assert_eq!(text.matches("\"id\"").count(), 1);
        assert!(text.contains("\"A-17\""));
    }

    #[test]
    fn test_predicate_builder() {
        let predicate = Predicate::new()
            .with_condition(Some("batch = 3"))
            .and(Clause::equals("last", "Lee"));
        assert_eq!(predicate.condition.as_deref(), Some("batch = 3"));
        assert_eq!(predicate.clauses, vec![Clause::equals("last", "Lee")]);
    }
}
