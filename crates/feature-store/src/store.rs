//! The record store contract and the in-memory backend.

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

use features_protocol::Record;

use crate::predicate::Predicate;

/// Errors surfaced by a record store backend.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The named collection is not registered with the store.
    #[error("collection not found: {0}")]
    CollectionNotFound(String),

    /// A backend-specific failure.
    #[error("store error: {0}")]
    Backend(String),
}

/// Persistence contract used by the query pipeline.
///
/// Predicates combine as a conjunction; an empty slice matches every
/// record in the collection.
pub trait RecordStore: Send + Sync {
    /// Fetch every record of `collection` matching all `predicates`.
    fn query(&self, collection: &str, predicates: &[Predicate]) -> Result<Vec<Record>, StoreError>;

    /// Count records of `collection` matching all `predicates`.
    fn count(&self, collection: &str, predicates: &[Predicate]) -> Result<usize, StoreError> {
        Ok(self.query(collection, predicates)?.len())
    }

    /// Insert records into `collection`, skipping records whose `id` is
    /// already present. Returns the number actually inserted.
    fn insert_many(&self, collection: &str, records: Vec<Record>) -> Result<usize, StoreError>;
}

/// In-memory store keyed by collection name.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Record>>>,
}

impl MemoryStore {
    /// Create an empty store with no registered collections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collection, seeding it with the given records.
    pub fn with_collection(self, name: impl Into<String>, records: Vec<Record>) -> Self {
        self.collections
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(name.into(), records);
        self
    }

    /// Register an empty collection if it is not present yet.
    pub fn register(&self, name: &str) {
        self.collections
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .entry(name.to_string())
            .or_default();
    }
}

impl RecordStore for MemoryStore {
    fn query(&self, collection: &str, predicates: &[Predicate]) -> Result<Vec<Record>, StoreError> {
        let collections = self.collections.read().unwrap_or_else(|e| e.into_inner());
        let records = collections
            .get(collection)
            .ok_or_else(|| StoreError::CollectionNotFound(collection.to_string()))?;

        Ok(records
            .iter()
            .filter(|record| predicates.iter().all(|p| p.matches(record)))
            .cloned()
            .collect())
    }

    fn insert_many(&self, collection: &str, records: Vec<Record>) -> Result<usize, StoreError> {
        let mut collections = self.collections.write().unwrap_or_else(|e| e.into_inner());
        let existing = collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::CollectionNotFound(collection.to_string()))?;

        let mut inserted = 0;
        for record in records {
            let duplicate = record
                .get("id")
                .map(|id| existing.iter().any(|r| r.get("id") == Some(id)))
                .unwrap_or(false);
            if duplicate {
                continue;
            }
            existing.push(record);
            inserted += 1;
        }
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use features_protocol::params::{FilterOp, FilterValue};
    use serde_json::{json, Value};

    fn rec(id: i64, province: &str) -> Record {
        match json!({"id": id, "province": province}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn store() -> MemoryStore {
        MemoryStore::new().with_collection(
            "sensors",
            vec![rec(1, "SO"), rec(2, "MI"), rec(3, "SO")],
        )
    }

    #[test]
    fn test_query_no_predicates_returns_all() {
        let records = store().query("sensors", &[]).unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_query_filters_conjunction() {
        let predicates = vec![
            Predicate::Field {
                path: "province".to_string(),
                op: FilterOp::Eq,
                value: FilterValue::Text("SO".to_string()),
            },
            Predicate::Field {
                path: "id".to_string(),
                op: FilterOp::Gt,
                value: FilterValue::Text("1".to_string()),
            },
        ];
        let records = store().query("sensors", &predicates).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["id"], 3);
    }

    #[test]
    fn test_unknown_collection() {
        assert_eq!(
            store().query("nope", &[]),
            Err(StoreError::CollectionNotFound("nope".to_string()))
        );
    }

    #[test]
    fn test_count_matches_query() {
        let predicates = vec![Predicate::Field {
            path: "province".to_string(),
            op: FilterOp::Eq,
            value: FilterValue::Text("SO".to_string()),
        }];
        assert_eq!(store().count("sensors", &predicates).unwrap(), 2);
    }

    #[test]
    fn test_insert_many_skips_existing_ids() {
        let s = store();
        let inserted = s
            .insert_many("sensors", vec![rec(3, "BG"), rec(4, "BG")])
            .unwrap();
        assert_eq!(inserted, 1);
        assert_eq!(s.query("sensors", &[]).unwrap().len(), 4);
    }

    #[test]
    fn test_insert_into_unknown_collection() {
        assert!(store().insert_many("nope", vec![rec(1, "SO")]).is_err());
    }

    #[test]
    fn test_register_is_idempotent() {
        let s = store();
        s.register("sensors");
        assert_eq!(s.query("sensors", &[]).unwrap().len(), 3);
        s.register("fresh");
        assert_eq!(s.query("fresh", &[]).unwrap().len(), 0);
    }
}
