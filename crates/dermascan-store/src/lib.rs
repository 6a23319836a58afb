//! SQLite-backed storage for prediction history.
//!
//! Thin adapter over a `predictions` table keyed by record id. Records are
//! append-only: the adapter exposes `create` and `list_all`, nothing else.
//! No internal retries; failures surface as [`StoreError`] and retry policy
//! belongs to the operator.

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection};
use thiserror::Error;
use tracing::info;

use dermascan_core::{PredictionRecord, Verdict};

/// Errors from history store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Lock error")]
    Lock,
    #[error("Io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Corrupt record: unknown verdict label {0:?}")]
    CorruptLabel(String),
}

/// Storage interface used by the prediction pipeline.
///
/// [`HistoryStore`] is the production implementation; the trait exists so
/// the pipeline takes the store as an injected dependency, same as the
/// classifier.
pub trait PredictionStore: Send + Sync {
    /// Inserts a new prediction record.
    fn create(&self, record: &PredictionRecord) -> Result<(), StoreError>;

    /// Returns every stored record. No ordering contract.
    fn list_all(&self) -> Result<Vec<PredictionRecord>, StoreError>;
}

/// SQLite-backed prediction history store.
pub struct HistoryStore {
    conn: Mutex<Connection>,
}

impl HistoryStore {
    /// Opens (or creates) the store at the given database path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(&path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        info!("History store initialized at {}", path.as_ref().display());
        Ok(store)
    }

    /// Creates an in-memory store (for testing).
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS predictions (
                id TEXT PRIMARY KEY,
                result TEXT NOT NULL,
                suggestion TEXT NOT NULL,
                created_at TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Inserts a new prediction record.
    ///
    /// Ids are freshly generated per prediction; inserting the same id twice
    /// violates the primary key and surfaces as [`StoreError::Database`].
    pub fn create(&self, record: &PredictionRecord) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;
        conn.execute(
            "INSERT INTO predictions (id, result, suggestion, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                record.id,
                record.result.as_label(),
                record.suggestion,
                record.created_at
            ],
        )?;
        Ok(())
    }

    /// Returns every stored record. No ordering contract.
    pub fn list_all(&self) -> Result<Vec<PredictionRecord>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;
        let mut stmt =
            conn.prepare("SELECT id, result, suggestion, created_at FROM predictions")?;

        let rows = stmt.query_map([], |row| {
            let id: String = row.get(0)?;
            let label: String = row.get(1)?;
            let suggestion: String = row.get(2)?;
            let created_at: String = row.get(3)?;
            Ok((id, label, suggestion, created_at))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, label, suggestion, created_at) = row?;
            let result =
                Verdict::from_label(&label).ok_or_else(|| StoreError::CorruptLabel(label))?;
            records.push(PredictionRecord {
                id,
                result,
                suggestion,
                created_at,
            });
        }
        Ok(records)
    }
}

impl PredictionStore for HistoryStore {
    fn create(&self, record: &PredictionRecord) -> Result<(), StoreError> {
        HistoryStore::create(self, record)
    }

    fn list_all(&self) -> Result<Vec<PredictionRecord>, StoreError> {
        HistoryStore::list_all(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_then_list_round_trips() {
        let store = HistoryStore::in_memory().unwrap();

        let record = PredictionRecord::new(Verdict::Cancer);
        store.create(&record).unwrap();

        let records = store.list_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, record.id);
        assert_eq!(records[0].result, Verdict::Cancer);
        assert_eq!(records[0].suggestion, record.suggestion);
        assert_eq!(records[0].created_at, record.created_at);
    }

    #[test]
    fn usable_as_a_trait_object() {
        let store: Box<dyn PredictionStore> = Box::new(HistoryStore::in_memory().unwrap());

        let record = PredictionRecord::new(Verdict::Cancer);
        store.create(&record).unwrap();
        assert_eq!(store.list_all().unwrap().len(), 1);
    }

    #[test]
    fn empty_store_lists_nothing() {
        let store = HistoryStore::in_memory().unwrap();
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let store = HistoryStore::in_memory().unwrap();

        let record = PredictionRecord::new(Verdict::NonCancer);
        store.create(&record).unwrap();

        let err = store.create(&record).unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));
        assert_eq!(store.list_all().unwrap().len(), 1);
    }

    #[test]
    fn stores_multiple_records() {
        let store = HistoryStore::in_memory().unwrap();

        for _ in 0..5 {
            store.create(&PredictionRecord::new(Verdict::NonCancer)).unwrap();
        }
        store.create(&PredictionRecord::new(Verdict::Cancer)).unwrap();

        let records = store.list_all().unwrap();
        assert_eq!(records.len(), 6);
        assert_eq!(
            records.iter().filter(|r| r.result == Verdict::Cancer).count(),
            1
        );
    }
}
