//! Admissions Core Library
//!
//! Intake form for hospital admissions: collects either a new patient admission or a
//! new consultation request and writes exactly one row per submit.
//!
//! # Architecture
//!
//! ```text
//!   input events ──► AdmissionForm ──────────────┐
//!   (mode switch,     ├─ AdmissionDraft          │ active draft
//!    field edit,      └─ ConsultationDraft       ▼
//!    checkbox)                          SubmissionGateway
//!                                  draft + status + timestamps
//!                                                │ one insert
//!                                                ▼
//!                                    RecordStore (patients | consultations)
//!                                       ├─ SqliteStore (local)
//!                                       └─ RestStore   (admissions-rest crate)
//!                                                │
//!                              ┌─────────────────┴─────────────────┐
//!                              ▼                                   ▼
//!                   success: notify + /dashboard         failure: notify, keep drafts
//! ```
//!
//! # Modules
//!
//! - [`models`]: Drafts, option catalogs (genders, specialties, shifts), form mode
//! - [`form`]: Form controller, edit intents, field descriptors
//! - [`submit`]: Insert payloads, record store seam, gateway and form session
//! - [`db`]: SQLite record store

pub mod db;
pub mod form;
pub mod models;
pub mod submit;

// Re-export commonly used types
pub use db::{Database, SqliteStore};
pub use form::{AdmissionForm, FieldInput, FormError, FormIntent};
pub use models::{AdmissionDraft, ConsultationDraft, FormMode, Gender, Specialty};
pub use submit::{
    FormSession, Navigator, Notifier, RecordStore, Route, StoreError, SubmissionGateway,
    SubmitFailure, Submitted, Table,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::str::FromStr;
use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum AdmissionsError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<db::DbError> for AdmissionsError {
    fn from(e: db::DbError) -> Self {
        AdmissionsError::DatabaseError(e.to_string())
    }
}

impl From<FormError> for AdmissionsError {
    fn from(e: FormError) -> Self {
        AdmissionsError::InvalidInput(e.to_string())
    }
}

impl From<StoreError> for AdmissionsError {
    fn from(e: StoreError) -> Self {
        AdmissionsError::DatabaseError(e.to_string())
    }
}

impl From<serde_json::Error> for AdmissionsError {
    fn from(e: serde_json::Error) -> Self {
        AdmissionsError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for AdmissionsError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        AdmissionsError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open a form backed by the SQLite database at the given path.
#[uniffi::export]
pub fn open_form(path: String) -> Result<Arc<AdmissionFormHandle>, AdmissionsError> {
    let store = SqliteStore::open(&path)?;
    Ok(Arc::new(AdmissionFormHandle::new(store)))
}

/// Open a form backed by an in-memory database (for testing).
#[uniffi::export]
pub fn open_form_in_memory() -> Result<Arc<AdmissionFormHandle>, AdmissionsError> {
    let store = SqliteStore::open_in_memory()?;
    Ok(Arc::new(AdmissionFormHandle::new(store)))
}

// =========================================================================
// Main API Object
// =========================================================================

/// One mounted intake form for a native shell.
#[derive(uniffi::Object)]
pub struct AdmissionFormHandle {
    form: Mutex<AdmissionForm>,
    gateway: SubmissionGateway<SqliteStore>,
}

impl AdmissionFormHandle {
    fn new(store: SqliteStore) -> Self {
        Self {
            form: Mutex::new(AdmissionForm::new()),
            gateway: SubmissionGateway::new(store),
        }
    }
}

#[uniffi::export]
impl AdmissionFormHandle {
    // =========================================================================
    // Form State
    // =========================================================================

    /// Switch between "admission" and "consultation".
    pub fn set_mode(&self, mode: String) -> Result<(), AdmissionsError> {
        let mode = FormMode::from_str(&mode)
            .map_err(|_| AdmissionsError::InvalidInput(format!("Unknown form mode: {}", mode)))?;
        self.form.lock()?.set_mode(mode);
        Ok(())
    }

    pub fn mode(&self) -> Result<String, AdmissionsError> {
        Ok(self.form.lock()?.mode().to_string())
    }

    /// Edit a text, number, date, select, or textarea field of the active draft.
    pub fn update_field(&self, name: String, value: String) -> Result<(), AdmissionsError> {
        self.form
            .lock()?
            .update_field(&name, FieldInput::Value(value))?;
        Ok(())
    }

    /// Edit a checkbox field of the active draft.
    pub fn set_checked(&self, name: String, checked: bool) -> Result<(), AdmissionsError> {
        self.form
            .lock()?
            .update_field(&name, FieldInput::Checked(checked))?;
        Ok(())
    }

    pub fn admission(&self) -> Result<FfiAdmissionDraft, AdmissionsError> {
        Ok(self.form.lock()?.admission().clone().into())
    }

    pub fn consultation(&self) -> Result<FfiConsultationDraft, AdmissionsError> {
        Ok(self.form.lock()?.consultation().clone().into())
    }

    // =========================================================================
    // Presentation
    // =========================================================================

    pub fn title(&self) -> Result<String, AdmissionsError> {
        Ok(self.form.lock()?.mode().title().to_string())
    }

    pub fn submit_label(&self) -> Result<String, AdmissionsError> {
        Ok(self.form.lock()?.mode().submit_label().to_string())
    }

    /// Shifts offered for the current weekend flag.
    pub fn shift_options(&self) -> Result<Vec<FfiShift>, AdmissionsError> {
        let form = self.form.lock()?;
        Ok(form
            .shift_options()
            .iter()
            .map(|shift| FfiShift {
                name: shift.name.to_string(),
                start_time: shift.start_time.to_string(),
            })
            .collect())
    }

    pub fn specialty_options(&self) -> Vec<String> {
        Specialty::options().iter().map(|s| s.to_string()).collect()
    }

    pub fn gender_options(&self) -> Vec<String> {
        Gender::options().iter().map(|g| g.to_string()).collect()
    }

    /// Input-level rule violations of the active draft.
    pub fn constraint_violations(&self) -> Result<Vec<FfiConstraintViolation>, AdmissionsError> {
        let form = self.form.lock()?;
        Ok(form
            .constraint_violations()
            .into_iter()
            .map(|v| FfiConstraintViolation {
                field: v.field.to_string(),
                message: v.message,
            })
            .collect())
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// Insert the active draft. Blocks until the store answers.
    pub fn submit(&self) -> Result<FfiSubmitOutcome, AdmissionsError> {
        let form = self.form.lock()?;
        let outcome = match futures::executor::block_on(self.gateway.submit(&form)) {
            Ok(submitted) => FfiSubmitOutcome {
                success: true,
                message: submitted.message.to_string(),
                redirect: Some(submitted.redirect.path().to_string()),
                row_json: Some(serde_json::to_string(&submitted.row)?),
            },
            Err(failure) => FfiSubmitOutcome {
                success: false,
                message: failure.message.to_string(),
                redirect: None,
                row_json: None,
            },
        };
        Ok(outcome)
    }

    /// Route to navigate to when the user cancels.
    pub fn cancel(&self) -> String {
        Route::Dashboard.path().to_string()
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe admission draft.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAdmissionDraft {
    pub mrn: String,
    pub patient_name: String,
    pub age: u8,
    pub gender: Option<String>,
    pub admission_date: String,
    pub admission_time: String,
    pub shift_type: String,
    pub is_weekend_shift: bool,
    pub assigned_doctor: String,
    pub specialty: Option<String>,
    pub diagnosis: String,
}

impl From<AdmissionDraft> for FfiAdmissionDraft {
    fn from(draft: AdmissionDraft) -> Self {
        Self {
            mrn: draft.mrn,
            patient_name: draft.patient_name,
            age: draft.age,
            gender: draft.gender.map(|g| g.to_string()),
            admission_date: draft.admission_date,
            admission_time: draft.admission_time,
            shift_type: draft.shift_type,
            is_weekend_shift: draft.is_weekend_shift,
            assigned_doctor: draft.assigned_doctor,
            specialty: draft.specialty.map(|s| s.to_string()),
            diagnosis: draft.diagnosis,
        }
    }
}

/// FFI-safe consultation draft.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiConsultationDraft {
    pub mrn: String,
    pub patient_name: String,
    pub age: u8,
    pub gender: Option<String>,
    pub requesting_department: String,
    pub patient_location: String,
    pub consultation_specialty: Option<String>,
}

impl From<ConsultationDraft> for FfiConsultationDraft {
    fn from(draft: ConsultationDraft) -> Self {
        Self {
            mrn: draft.mrn,
            patient_name: draft.patient_name,
            age: draft.age,
            gender: draft.gender.map(|g| g.to_string()),
            requesting_department: draft.requesting_department,
            patient_location: draft.patient_location,
            consultation_specialty: draft.consultation_specialty.map(|s| s.to_string()),
        }
    }
}

/// FFI-safe shift option.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiShift {
    pub name: String,
    pub start_time: String,
}

/// FFI-safe constraint violation.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiConstraintViolation {
    pub field: String,
    pub message: String,
}

/// Result of a submit, for the shell to toast and route on.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSubmitOutcome {
    pub success: bool,
    pub message: String,
    /// Set on success only
    pub redirect: Option<String>,
    /// Inserted row as JSON, on success only
    pub row_json: Option<String>,
}
