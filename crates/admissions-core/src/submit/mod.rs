//! Submission gateway: one insert per submit, outcome carries the redirect or message.

mod payload;
mod session;
mod store;

pub use payload::*;
pub use session::*;
pub use store::*;

use chrono::Utc;
use log::{error, info};
use serde_json::Value;
use thiserror::Error;

use crate::form::AdmissionForm;
use crate::models::FormMode;

/// Navigation targets the form can redirect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Dashboard => "/dashboard",
        }
    }
}

/// Successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Submitted {
    pub mode: FormMode,
    pub table: Table,
    /// Row as echoed by the backend
    pub row: Value,
    pub message: &'static str,
    pub redirect: Route,
}

/// Failed submission. The form is left as it was.
#[derive(Error, Debug)]
#[error("{message}: {source}")]
pub struct SubmitFailure {
    pub mode: FormMode,
    pub message: &'static str,
    #[source]
    pub source: StoreError,
}

pub type SubmitResult = Result<Submitted, SubmitFailure>;

/// Turns the active draft into one insert against a [`RecordStore`].
pub struct SubmissionGateway<S> {
    store: S,
}

impl<S: RecordStore> SubmissionGateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Insert the active draft with status "Active" and creation/update timestamps.
    ///
    /// No validation and no retry; exactly one insert is attempted.
    pub async fn submit(&self, form: &AdmissionForm) -> SubmitResult {
        let mode = form.mode();
        let fail = |source: StoreError| {
            error!("Error submitting {} form: {}", mode, source);
            SubmitFailure {
                mode,
                message: mode.failure_message(),
                source,
            }
        };

        let (table, row) = build_payload(form, Utc::now()).map_err(&fail)?;
        let inserted = self.store.insert(table, row).await.map_err(&fail)?;

        let id = match inserted.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(id) => id.to_string(),
            None => "(no id)".to_string(),
        };
        info!("Inserted {} row {}", table, id);

        Ok(Submitted {
            mode,
            table,
            row: inserted,
            message: mode.success_message(),
            redirect: Route::Dashboard,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FieldInput;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct EchoStore {
        calls: Mutex<Vec<(Table, Value)>>,
        reject: bool,
    }

    #[async_trait]
    impl RecordStore for EchoStore {
        async fn insert(&self, table: Table, row: Value) -> StoreResult<Value> {
            self.calls.lock().unwrap().push((table, row.clone()));
            if self.reject {
                return Err(StoreError::Rejected {
                    status: Some(409),
                    message: "duplicate key".into(),
                });
            }
            Ok(row)
        }
    }

    #[tokio::test]
    async fn test_submit_admission() {
        let gateway = SubmissionGateway::new(EchoStore::default());
        let mut form = AdmissionForm::new();
        form.update_field("mrn", FieldInput::Value("123".into()))
            .unwrap();

        let submitted = gateway.submit(&form).await.unwrap();
        assert_eq!(submitted.table, Table::Patients);
        assert_eq!(submitted.message, "Patient admitted successfully");
        assert_eq!(submitted.redirect.path(), "/dashboard");
        assert_eq!(submitted.row["mrn"], "123");

        let calls = gateway.store().calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_failure_message() {
        let gateway = SubmissionGateway::new(EchoStore {
            reject: true,
            ..Default::default()
        });
        let mut form = AdmissionForm::new();
        form.set_mode(FormMode::Consultation);

        let failure = gateway.submit(&form).await.unwrap_err();
        assert_eq!(failure.mode, FormMode::Consultation);
        assert_eq!(failure.message, "Failed to submit consultation request");
        assert!(matches!(failure.source, StoreError::Rejected { status: Some(409), .. }));
    }
}
