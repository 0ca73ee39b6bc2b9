//! Insert payloads: the active draft plus server-assigned fields.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::store::{StoreResult, Table};
use crate::form::AdmissionForm;
use crate::models::{AdmissionDraft, ConsultationDraft, FormMode};

/// Status assigned to every newly submitted record.
pub const ACTIVE_STATUS: &str = "Active";

/// Row written to the `patients` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdmissionRecord {
    #[serde(flatten)]
    pub draft: AdmissionDraft,
    pub patient_status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Row written to the `consultations` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConsultationRecord {
    #[serde(flatten)]
    pub draft: ConsultationDraft,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl AdmissionRecord {
    pub fn new(draft: AdmissionDraft, now: DateTime<Utc>) -> Self {
        let stamp = timestamp(now);
        Self {
            draft,
            patient_status: ACTIVE_STATUS.to_string(),
            created_at: stamp.clone(),
            updated_at: stamp,
        }
    }
}

impl ConsultationRecord {
    pub fn new(draft: ConsultationDraft, now: DateTime<Utc>) -> Self {
        let stamp = timestamp(now);
        Self {
            draft,
            status: ACTIVE_STATUS.to_string(),
            created_at: stamp.clone(),
            updated_at: stamp,
        }
    }
}

/// ISO-8601 with millisecond precision and a `Z` suffix.
fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Target table and JSON row for the form's active draft.
pub fn build_payload(form: &AdmissionForm, now: DateTime<Utc>) -> StoreResult<(Table, Value)> {
    let table = Table::for_mode(form.mode());
    let row = match form.mode() {
        FormMode::Admission => {
            serde_json::to_value(AdmissionRecord::new(form.admission().clone(), now))?
        }
        FormMode::Consultation => {
            serde_json::to_value(ConsultationRecord::new(form.consultation().clone(), now))?
        }
    };
    Ok((table, row))
}
