//! The history store contract and an in-memory implementation.

use crate::core::HistoryRecord;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors reported by a history store.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("History store unavailable: {0}")]
    Unavailable(String),

    #[error("History store corrupted: {0}")]
    Corrupted(String),
}

/// Asynchronous persistence of history records.
///
/// `load` returns every persisted record, fully materialized. Ordering is
/// defined by the implementation.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Persist one or more records.
    async fn save(&self, records: &[HistoryRecord]) -> Result<(), StoreError>;

    /// Load all persisted records.
    async fn load(&self) -> Result<Vec<HistoryRecord>, StoreError>;
}

/// A record as held by [`MemoryHistoryStore`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Identity assigned by the store
    pub id: u64,
    /// When the record was saved
    pub saved_at: DateTime<Utc>,
    pub record: HistoryRecord,
}

#[derive(Debug, Default)]
struct Table {
    next_id: u64,
    rows: BTreeMap<u64, StoredRecord>,
}

impl Table {
    fn insert(&mut self, record: HistoryRecord, saved_at: DateTime<Utc>) {
        self.next_id += 1;
        let id = self.next_id;
        self.upsert(StoredRecord {
            id,
            saved_at,
            record,
        });
    }

    fn upsert(&mut self, stored: StoredRecord) {
        self.next_id = self.next_id.max(stored.id);
        self.rows.insert(stored.id, stored);
    }
}

/// In-memory history store.
///
/// Each saved record gets an auto-incremented identity; records load in
/// identity order. Writing a record whose identity already exists replaces
/// it.
///
/// # Example
///
/// ```rust
/// use calcmind::core::{Expression, HistoryRecord};
/// use calcmind::effects::{HistoryStore, MemoryHistoryStore};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let store = MemoryHistoryStore::new();
/// let record = HistoryRecord::new(Expression::from_value(4), 4);
///
/// store.save(&[record.clone()]).await.unwrap();
///
/// assert_eq!(store.load().await.unwrap(), vec![record]);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    table: RwLock<Table>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records, in order.
    pub fn with_records(records: impl IntoIterator<Item = HistoryRecord>) -> Self {
        let mut table = Table::default();
        let now = Utc::now();
        for record in records {
            table.insert(record, now);
        }
        Self {
            table: RwLock::new(table),
        }
    }

    /// Write a stored record, replacing any record with the same identity.
    pub async fn upsert(&self, stored: StoredRecord) {
        self.table.write().await.upsert(stored);
    }

    /// All stored rows with their identities and timestamps.
    pub async fn entries(&self) -> Vec<StoredRecord> {
        self.table.read().await.rows.values().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.table.read().await.rows.is_empty()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn save(&self, records: &[HistoryRecord]) -> Result<(), StoreError> {
        let saved_at = Utc::now();
        let mut table = self.table.write().await;
        for record in records {
            table.insert(record.clone(), saved_at);
        }
        Ok(())
    }

    async fn load(&self) -> Result<Vec<HistoryRecord>, StoreError> {
        let table = self.table.read().await;
        Ok(table.rows.values().map(|row| row.record.clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Operator::*;
    use crate::expression;

    fn record(result: i64) -> HistoryRecord {
        HistoryRecord::new(expression![result], result)
    }

    #[tokio::test]
    async fn new_store_is_empty() {
        let store = MemoryHistoryStore::new();
        assert!(store.is_empty().await);
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_appends_in_order() {
        let store = MemoryHistoryStore::new();
        store.save(&[record(1)]).await.unwrap();
        store.save(&[record(2), record(3)]).await.unwrap();

        assert_eq!(
            store.load().await.unwrap(),
            vec![record(1), record(2), record(3)]
        );
    }

    #[tokio::test]
    async fn identities_are_assigned_sequentially() {
        let store = MemoryHistoryStore::new();
        store.save(&[record(1), record(2)]).await.unwrap();

        let ids: Vec<u64> = store.entries().await.iter().map(|row| row.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn upsert_replaces_on_identity_conflict() {
        let store = MemoryHistoryStore::with_records([record(1), record(2)]);
        let replacement = HistoryRecord::new(expression![1, Plus, 32], 33);

        store
            .upsert(StoredRecord {
                id: 1,
                saved_at: Utc::now(),
                record: replacement.clone(),
            })
            .await;

        assert_eq!(store.len().await, 2);
        assert_eq!(store.load().await.unwrap(), vec![replacement, record(2)]);
    }

    #[tokio::test]
    async fn ids_continue_after_upsert() {
        let store = MemoryHistoryStore::new();
        store
            .upsert(StoredRecord {
                id: 10,
                saved_at: Utc::now(),
                record: record(10),
            })
            .await;
        store.save(&[record(11)]).await.unwrap();

        let ids: Vec<u64> = store.entries().await.iter().map(|row| row.id).collect();
        assert_eq!(ids, vec![10, 11]);
    }

    #[test]
    fn stored_record_serializes_correctly() {
        let stored = StoredRecord {
            id: 7,
            saved_at: Utc::now(),
            record: record(7),
        };
        let json = serde_json::to_string(&stored).unwrap();
        let deserialized: StoredRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(stored, deserialized);
    }
}
