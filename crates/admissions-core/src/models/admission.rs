//! Patient admission draft.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

use super::catalog::{Gender, ShiftPattern, Specialty};

/// Editable fields of an admission draft, keyed by their wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum AdmissionField {
    Mrn,
    PatientName,
    Age,
    Gender,
    AdmissionDate,
    AdmissionTime,
    IsWeekendShift,
    ShiftType,
    AssignedDoctor,
    Specialty,
    Diagnosis,
}

/// A new patient admission being filled in (unsaved).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AdmissionDraft {
    /// Medical record number
    pub mrn: String,
    pub patient_name: String,
    /// Age in years
    pub age: u8,
    pub gender: Option<Gender>,
    /// Admission date (YYYY-MM-DD)
    pub admission_date: String,
    /// Derived from the selected shift, HH:MM or empty
    pub admission_time: String,
    /// Shift name; valid names depend on `is_weekend_shift`
    pub shift_type: String,
    pub is_weekend_shift: bool,
    pub assigned_doctor: String,
    pub specialty: Option<Specialty>,
    pub diagnosis: String,
}

impl AdmissionDraft {
    /// Create an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shift roster selected by the weekend flag.
    pub fn shift_pattern(&self) -> ShiftPattern {
        ShiftPattern::for_weekend(self.is_weekend_shift)
    }

    /// Select a shift by name and derive the admission time from it.
    ///
    /// Names outside the current roster are kept but leave the time empty.
    pub fn select_shift(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.admission_time = self
            .shift_pattern()
            .start_time(&name)
            .unwrap_or_default()
            .to_string();
        self.shift_type = name;
    }

    /// Set the weekend flag. Always clears the shift and derived time.
    pub fn set_weekend_shift(&mut self, is_weekend: bool) {
        self.is_weekend_shift = is_weekend;
        self.shift_type.clear();
        self.admission_time.clear();
    }
}
