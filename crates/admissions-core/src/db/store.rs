//! [`RecordStore`] backed by the local SQLite database.

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{Database, DbError, DbResult};
use crate::submit::{
    AdmissionRecord, ConsultationRecord, RecordStore, StoreError, StoreResult, Table,
};

impl From<DbError> for StoreError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::Constraint(message) => StoreError::Rejected {
                status: None,
                message,
            },
            DbError::Json(e) => StoreError::Serialization(e),
            other => StoreError::Database(other.to_string()),
        }
    }
}

/// Thread-safe SQLite record store.
pub struct SqliteStore {
    db: Mutex<Database>,
}

impl SqliteStore {
    pub fn new(db: Database) -> Self {
        Self { db: Mutex::new(db) }
    }

    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        Ok(Self::new(Database::open(path)?))
    }

    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::new(Database::open_in_memory()?))
    }

    /// Run a read against the underlying database.
    pub fn with_db<T>(&self, f: impl FnOnce(&Database) -> DbResult<T>) -> StoreResult<T> {
        let db = self
            .db
            .lock()
            .map_err(|e| StoreError::Database(format!("Lock poisoned: {}", e)))?;
        Ok(f(&*db)?)
    }

    fn insert_row(&self, table: Table, row: Value) -> StoreResult<Value> {
        match table {
            Table::Patients => {
                let record: AdmissionRecord = serde_json::from_value(row)?;
                let stored = self.with_db(|db| db.insert_admission(&record))?;
                Ok(serde_json::to_value(stored)?)
            }
            Table::Consultations => {
                let record: ConsultationRecord = serde_json::from_value(row)?;
                let stored = self.with_db(|db| db.insert_consultation(&record))?;
                Ok(serde_json::to_value(stored)?)
            }
        }
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn insert(&self, table: Table, row: Value) -> StoreResult<Value> {
        self.insert_row(table, row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_returns_row_with_id() {
        let store = SqliteStore::open_in_memory().unwrap();
        let row = json!({
            "mrn": "C-5",
            "patient_name": "Grace Hopper",
            "age": 85,
            "gender": "Female",
            "requesting_department": "Emergency",
            "patient_location": "Bay 4",
            "consultation_specialty": "Neurology",
            "status": "Active",
            "created_at": "2024-03-09T14:30:00.000Z",
            "updated_at": "2024-03-09T14:30:00.000Z"
        });

        let inserted = futures::executor::block_on(store.insert(Table::Consultations, row)).unwrap();
        assert_eq!(inserted["mrn"], "C-5");
        assert_eq!(inserted["status"], "Active");
        assert!(inserted["id"].as_str().is_some());

        let count = store.with_db(|db| Ok(db.list_consultations()?.len())).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_malformed_row_is_serialization_error() {
        let store = SqliteStore::open_in_memory().unwrap();
        let err = futures::executor::block_on(store.insert(Table::Patients, json!({"mrn": 1})))
            .unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
