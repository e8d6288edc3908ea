//! Keyed in-memory record collections.
//!
//! `RecordStore<T>` stands in for the hosted document database: records are
//! keyed by id, listed in id order, and every mutation either applies fully
//! or fails without touching the collection.

use crate::error::{Result, StoreError};
use crate::types::Record;
use std::collections::BTreeMap;

/// A collection of records of one kind, keyed by id.
#[derive(Debug, Clone)]
pub struct RecordStore<T: Record> {
    records: BTreeMap<String, T>,
}

impl<T: Record> RecordStore<T> {
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }

    /// Build a store from records, rejecting duplicate ids.
    pub fn from_records(records: impl IntoIterator<Item = T>) -> Result<Self> {
        let mut store = Self::new();
        for record in records {
            store.insert(record)?;
        }
        Ok(store)
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Snapshot of every record, in id order.
    pub fn list(&self) -> Vec<T> {
        self.records.values().cloned().collect()
    }

    /// Iterate records in id order without cloning.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.values()
    }

    /// Insert a new record. Fails if the id is already taken.
    pub fn insert(&mut self, record: T) -> Result<()> {
        if record.id().trim().is_empty() {
            return Err(StoreError::InvalidValue {
                field: "id".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.records.contains_key(record.id()) {
            return Err(StoreError::Duplicate {
                entity: T::ENTITY,
                id: record.id().to_string(),
            });
        }
        self.records.insert(record.id().to_string(), record);
        Ok(())
    }

    /// Replace an existing record. Fails if the id is unknown.
    pub fn update(&mut self, record: T) -> Result<()> {
        match self.records.get_mut(record.id()) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(StoreError::NotFound {
                entity: T::ENTITY,
                id: record.id().to_string(),
            }),
        }
    }

    /// Remove a record, returning it.
    pub fn delete(&mut self, id: &str) -> Result<T> {
        self.records.remove(id).ok_or_else(|| StoreError::NotFound {
            entity: T::ENTITY,
            id: id.to_string(),
        })
    }
}

impl<T: Record> Default for RecordStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
