//! Submission gateway and form session integration tests.

use std::sync::{Arc, Mutex};

use admissions_core::form::FieldInput;
use admissions_core::models::FormMode;
use admissions_core::submit::{
    FormSession, Navigator, Notifier, RecordStore, Route, StoreError, StoreResult, Table,
};
use admissions_core::SqliteStore;
use async_trait::async_trait;
use serde_json::Value;

#[derive(Default)]
struct RecordingShell {
    toasts: Mutex<Vec<(bool, String)>>,
    routes: Mutex<Vec<Route>>,
}

impl Notifier for RecordingShell {
    fn success(&self, message: &str) {
        self.toasts.lock().unwrap().push((true, message.to_string()));
    }

    fn error(&self, message: &str) {
        self.toasts.lock().unwrap().push((false, message.to_string()));
    }
}

impl Navigator for RecordingShell {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

/// Records every insert; optionally fails them all.
#[derive(Default)]
struct RecordingStore {
    inserts: Mutex<Vec<(Table, Value)>>,
    fail: bool,
}

#[async_trait]
impl RecordStore for RecordingStore {
    async fn insert(&self, table: Table, row: Value) -> StoreResult<Value> {
        self.inserts.lock().unwrap().push((table, row.clone()));
        if self.fail {
            return Err(StoreError::Transport("connection reset".into()));
        }
        Ok(row)
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn session<S: RecordStore>(store: S) -> (FormSession<S>, Arc<RecordingShell>) {
    let shell = Arc::new(RecordingShell::default());
    let session = FormSession::new(store, shell.clone(), shell.clone());
    (session, shell)
}

fn fill_admission<S: RecordStore>(session: &mut FormSession<S>) {
    for (name, value) in [
        ("mrn", "4471"),
        ("patient_name", "Rosalind Franklin"),
        ("age", "37"),
        ("gender", "Female"),
        ("admission_date", "2024-03-09"),
        ("shift_type", "Evening"),
        ("assigned_doctor", "Dr. Wilkins"),
        ("specialty", "Respiratory Medicine"),
        ("diagnosis", "Suspected pulmonary embolism"),
    ] {
        session
            .update_field(name, FieldInput::Value(value.to_string()))
            .unwrap();
    }
}

#[tokio::test]
async fn test_admission_submit_inserts_once_and_navigates() {
    init_logging();
    let (mut session, shell) = session(Arc::new(RecordingStore::default()));
    fill_admission(&mut session);
    assert!(session.form().constraint_violations().is_empty());

    let submitted = session.submit().await.unwrap();
    assert_eq!(submitted.table, Table::Patients);

    let inserts = session.gateway().store().inserts.lock().unwrap();
    assert_eq!(inserts.len(), 1);
    let (table, row) = &inserts[0];
    assert_eq!(*table, Table::Patients);
    assert_eq!(row["patient_status"], "Active");
    assert_eq!(row["created_at"], row["updated_at"]);
    assert_eq!(row["admission_time"], "15:00");
    assert_eq!(row["age"], 37);

    assert_eq!(
        *shell.toasts.lock().unwrap(),
        vec![(true, "Patient admitted successfully".to_string())]
    );
    assert_eq!(*shell.routes.lock().unwrap(), vec![Route::Dashboard]);
}

#[tokio::test]
async fn test_consultation_submit_targets_consultations() {
    init_logging();
    let (mut session, shell) = session(Arc::new(RecordingStore::default()));
    session.set_mode(FormMode::Consultation);
    session
        .update_field("mrn", FieldInput::Value("C-88".into()))
        .unwrap();

    session.submit().await.unwrap();

    let inserts = session.gateway().store().inserts.lock().unwrap();
    assert_eq!(inserts[0].0, Table::Consultations);
    assert_eq!(inserts[0].1["status"], "Active");
    assert_eq!(inserts[0].1["mrn"], "C-88");
    assert_eq!(
        shell.toasts.lock().unwrap()[0].1,
        "Consultation request submitted successfully"
    );
}

#[tokio::test]
async fn test_failed_insert_keeps_draft_and_stays() {
    init_logging();
    let store = Arc::new(RecordingStore {
        fail: true,
        ..Default::default()
    });
    let (mut session, shell) = session(store);
    fill_admission(&mut session);
    let before = session.form().clone();

    let failure = session.submit().await.unwrap_err();
    assert_eq!(failure.message, "Failed to admit patient");
    assert!(matches!(failure.source, StoreError::Transport(_)));

    assert_eq!(session.form(), &before);
    assert!(shell.routes.lock().unwrap().is_empty());
    assert_eq!(
        *shell.toasts.lock().unwrap(),
        vec![(false, "Failed to admit patient".to_string())]
    );
    assert_eq!(session.gateway().store().inserts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_double_submit_inserts_twice() {
    init_logging();
    let (mut session, _shell) = session(Arc::new(RecordingStore::default()));
    fill_admission(&mut session);

    session.submit().await.unwrap();
    session.submit().await.unwrap();
    assert_eq!(session.gateway().store().inserts.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_sqlite_backed_session() {
    init_logging();
    let (mut session, shell) = session(SqliteStore::open_in_memory().unwrap());
    fill_admission(&mut session);

    let submitted = session.submit().await.unwrap();
    let id = submitted.row["id"].as_str().unwrap().to_string();

    let stored = session
        .gateway()
        .store()
        .with_db(|db| db.get_admission(&id))
        .unwrap()
        .unwrap();
    assert_eq!(stored.record.draft.patient_name, "Rosalind Franklin");
    assert_eq!(stored.record.created_at, stored.record.updated_at);
    assert_eq!(*shell.routes.lock().unwrap(), vec![Route::Dashboard]);
}

#[tokio::test]
async fn test_sqlite_rejection_surfaces_failure() {
    init_logging();
    let (mut session, shell) = session(SqliteStore::open_in_memory().unwrap());
    session.set_mode(FormMode::Consultation);
    session
        .update_field("age", FieldInput::Value("151".into()))
        .unwrap();

    let failure = session.submit().await.unwrap_err();
    assert!(matches!(failure.source, StoreError::Rejected { status: None, .. }));
    assert_eq!(
        shell.toasts.lock().unwrap()[0],
        (false, "Failed to submit consultation request".to_string())
    );
    assert!(shell.routes.lock().unwrap().is_empty());
}

#[test]
fn test_cancel_navigates_without_insert() {
    let (session, shell) = session(Arc::new(RecordingStore::default()));
    session.cancel();
    assert_eq!(*shell.routes.lock().unwrap(), vec![Route::Dashboard]);
    assert!(session.gateway().store().inserts.lock().unwrap().is_empty());
}
