//! Form controller: owns both drafts and applies edit intents to the active one.

mod fields;

pub use fields::*;

use std::str::FromStr;

use log::debug;
use thiserror::Error;

use crate::models::{
    AdmissionDraft, AdmissionField, ConsultationDraft, ConsultationField, FormMode, Gender,
    Specialty,
};

/// Form editing errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("Unknown field for {mode} form: {field}")]
    UnknownField { mode: FormMode, field: String },

    #[error("Invalid value for {field}: {value:?}")]
    InvalidValue { field: String, value: String },

    #[error("Field {field} expects a {expected} input")]
    InputKindMismatch { field: String, expected: InputKind },
}

pub type FormResult<T> = Result<T, FormError>;

/// Raw input coming from a form control.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    /// Text, number, date, select, or textarea value
    Value(String),
    /// Checkbox state
    Checked(bool),
}

/// An edit intent applied by [`AdmissionForm::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum FormIntent {
    SwitchMode(FormMode),
    EditField { name: String, value: String },
    ToggleCheckbox { name: String, checked: bool },
}

/// Intake form state: both drafts plus the mode selecting the active one.
///
/// The inactive draft keeps its values across mode switches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdmissionForm {
    mode: FormMode,
    admission: AdmissionDraft,
    consultation: ConsultationDraft,
}

impl AdmissionForm {
    /// Fresh form in admission mode with empty drafts.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn admission(&self) -> &AdmissionDraft {
        &self.admission
    }

    pub fn consultation(&self) -> &ConsultationDraft {
        &self.consultation
    }

    /// Apply a single edit intent.
    pub fn apply(&mut self, intent: FormIntent) -> FormResult<()> {
        match intent {
            FormIntent::SwitchMode(mode) => {
                self.set_mode(mode);
                Ok(())
            }
            FormIntent::EditField { name, value } => {
                self.update_field(&name, FieldInput::Value(value))
            }
            FormIntent::ToggleCheckbox { name, checked } => {
                self.update_field(&name, FieldInput::Checked(checked))
            }
        }
    }

    /// Switch the active draft.
    ///
    /// Entering consultation mode prefixes the consultation record number with "C-"
    /// unless it already has the prefix. Re-selecting the current mode is a no-op.
    pub fn set_mode(&mut self, mode: FormMode) {
        if mode == self.mode {
            return;
        }
        debug!("Switching form mode {} -> {}", self.mode, mode);
        self.mode = mode;
        if mode == FormMode::Consultation && self.consultation.ensure_mrn_prefix() {
            debug!("Prefixed consultation MRN: {}", self.consultation.mrn);
        }
    }

    /// Route a field edit to the active draft.
    ///
    /// On error the draft is left untouched.
    pub fn update_field(&mut self, name: &str, input: FieldInput) -> FormResult<()> {
        debug!("Editing {} field {}", self.mode, name);
        match self.mode {
            FormMode::Admission => {
                let field = AdmissionField::from_str(name).map_err(|_| FormError::UnknownField {
                    mode: self.mode,
                    field: name.to_string(),
                })?;
                edit_admission(&mut self.admission, field, input)
            }
            FormMode::Consultation => {
                let field =
                    ConsultationField::from_str(name).map_err(|_| FormError::UnknownField {
                        mode: self.mode,
                        field: name.to_string(),
                    })?;
                edit_consultation(&mut self.consultation, field, input)
            }
        }
    }
}

fn edit_admission(
    draft: &mut AdmissionDraft,
    field: AdmissionField,
    input: FieldInput,
) -> FormResult<()> {
    let name = field.as_ref();
    let value = match (field, input) {
        (AdmissionField::IsWeekendShift, FieldInput::Checked(checked)) => {
            draft.set_weekend_shift(checked);
            return Ok(());
        }
        (AdmissionField::IsWeekendShift, FieldInput::Value(_)) | (_, FieldInput::Checked(_)) => {
            return Err(FormError::InputKindMismatch {
                field: name.to_string(),
                expected: admission_field_spec(field).kind,
            });
        }
        (_, FieldInput::Value(value)) => value,
    };

    match field {
        AdmissionField::Mrn => draft.mrn = value,
        AdmissionField::PatientName => draft.patient_name = value,
        AdmissionField::Age => draft.age = parse_age(name, &value)?,
        AdmissionField::Gender => draft.gender = parse_option::<Gender>(name, &value)?,
        AdmissionField::AdmissionDate => draft.admission_date = value,
        AdmissionField::AdmissionTime => draft.admission_time = value,
        AdmissionField::ShiftType => draft.select_shift(value),
        AdmissionField::AssignedDoctor => draft.assigned_doctor = value,
        AdmissionField::Specialty => draft.specialty = parse_option::<Specialty>(name, &value)?,
        AdmissionField::Diagnosis => draft.diagnosis = value,
        // Only reachable through a checkbox input, handled above
        AdmissionField::IsWeekendShift => {}
    }
    Ok(())
}

fn edit_consultation(
    draft: &mut ConsultationDraft,
    field: ConsultationField,
    input: FieldInput,
) -> FormResult<()> {
    let name = field.as_ref();
    let value = match input {
        FieldInput::Value(value) => value,
        FieldInput::Checked(_) => {
            return Err(FormError::InputKindMismatch {
                field: name.to_string(),
                expected: consultation_field_spec(field).kind,
            });
        }
    };

    match field {
        ConsultationField::Mrn => draft.mrn = value,
        ConsultationField::PatientName => draft.patient_name = value,
        ConsultationField::Age => draft.age = parse_age(name, &value)?,
        ConsultationField::Gender => draft.gender = parse_option::<Gender>(name, &value)?,
        ConsultationField::RequestingDepartment => draft.requesting_department = value,
        ConsultationField::PatientLocation => draft.patient_location = value,
        ConsultationField::ConsultationSpecialty => {
            draft.consultation_specialty = parse_option::<Specialty>(name, &value)?
        }
    }
    Ok(())
}

/// Empty number inputs read as zero.
fn parse_age(field: &str, value: &str) -> FormResult<u8> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse::<u8>().map_err(|_| FormError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Empty select value ("Select ...") clears the choice.
fn parse_option<T: FromStr>(field: &str, value: &str) -> FormResult<Option<T>> {
    if value.is_empty() {
        return Ok(None);
    }
    T::from_str(value)
        .map(Some)
        .map_err(|_| FormError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        })
}
