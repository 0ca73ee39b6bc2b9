//! Record store seam: the backend a submitted draft is inserted into.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use strum::{AsRefStr, Display};
use thiserror::Error;

use crate::models::FormMode;

/// Remote resources a submission can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Table {
    Patients,
    Consultations,
}

impl Table {
    /// Table written for a given form mode.
    pub fn for_mode(mode: FormMode) -> Self {
        match mode {
            FormMode::Admission => Table::Patients,
            FormMode::Consultation => Table::Consultations,
        }
    }
}

/// Insert failure. Callers treat every variant as one generic failure.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Insert rejected by backend ({status:?}): {message}")]
    Rejected { status: Option<u16>, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Generic "insert one row, return the inserted row" backend.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert `row` (a JSON object) into `table`.
    async fn insert(&self, table: Table, row: Value) -> StoreResult<Value>;
}

#[async_trait]
impl<S: RecordStore + ?Sized> RecordStore for Arc<S> {
    async fn insert(&self, table: Table, row: Value) -> StoreResult<Value> {
        (**self).insert(table, row).await
    }
}
