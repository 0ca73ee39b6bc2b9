//! Consultation request draft.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

use super::catalog::{Gender, Specialty};

/// Prefix carried by every consultation record number.
pub const CONSULTATION_MRN_PREFIX: &str = "C-";

/// Editable fields of a consultation draft, keyed by their wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ConsultationField {
    Mrn,
    PatientName,
    Age,
    Gender,
    RequestingDepartment,
    PatientLocation,
    ConsultationSpecialty,
}

/// A consultation request being filled in (unsaved).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConsultationDraft {
    /// Record number, "C-" prefixed once consultation mode is entered
    pub mrn: String,
    pub patient_name: String,
    pub age: u8,
    pub gender: Option<Gender>,
    pub requesting_department: String,
    pub patient_location: String,
    pub consultation_specialty: Option<Specialty>,
}

impl ConsultationDraft {
    /// Create an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix the record number with "C-" unless it already carries it.
    ///
    /// Returns true if the number changed.
    pub fn ensure_mrn_prefix(&mut self) -> bool {
        if self.mrn.starts_with(CONSULTATION_MRN_PREFIX) {
            return false;
        }
        self.mrn = format!("{}{}", CONSULTATION_MRN_PREFIX, self.mrn);
        true
    }
}
