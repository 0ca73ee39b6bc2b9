//! Field descriptors and input-level constraints.
//!
//! These describe what a form shell should render for each mode: labels, control kinds,
//! `required` and numeric bounds. The submission path does not consult them.

use serde::Serialize;
use strum::{Display, IntoEnumIterator};

use super::AdmissionForm;
use crate::models::{
    AdmissionDraft, AdmissionField, ConsultationDraft, ConsultationField, FormMode, Gender,
    Shift, Specialty,
};

/// Upper bound accepted by the age input.
pub const MAX_AGE: u8 = 150;

/// Kind of control a field is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InputKind {
    Text,
    Number,
    Date,
    Time,
    Select,
    Checkbox,
    TextArea,
}

/// Static description of one form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Wire name, also the key passed to `update_field`
    pub name: &'static str,
    pub label: &'static str,
    pub kind: InputKind,
    pub required: bool,
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub placeholder: Option<&'static str>,
    /// Computed from other fields, not rendered as a control
    pub derived: bool,
}

impl FieldSpec {
    const fn new(name: &'static str, label: &'static str, kind: InputKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
            min: None,
            max: None,
            placeholder: None,
            derived: false,
        }
    }

    fn placeholder(mut self, text: &'static str) -> Self {
        self.placeholder = Some(text);
        self
    }

    fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

const AGE_SPEC: FieldSpec = FieldSpec {
    min: Some(0),
    max: Some(MAX_AGE as i64),
    ..FieldSpec::new("age", "Age", InputKind::Number)
};

pub fn admission_field_spec(field: AdmissionField) -> FieldSpec {
    match field {
        AdmissionField::Mrn => FieldSpec::new("mrn", "MRN", InputKind::Text).placeholder("Enter MRN"),
        AdmissionField::PatientName => FieldSpec::new("patient_name", "Patient Name", InputKind::Text)
            .placeholder("Enter patient name"),
        AdmissionField::Age => AGE_SPEC,
        AdmissionField::Gender => FieldSpec::new("gender", "Gender", InputKind::Select),
        AdmissionField::AdmissionDate => {
            FieldSpec::new("admission_date", "Admission Date", InputKind::Date)
        }
        AdmissionField::AdmissionTime => FieldSpec {
            derived: true,
            ..FieldSpec::new("admission_time", "Admission Time", InputKind::Time).optional()
        },
        AdmissionField::IsWeekendShift => {
            FieldSpec::new("is_weekend_shift", "Weekend Shift", InputKind::Checkbox).optional()
        }
        AdmissionField::ShiftType => FieldSpec::new("shift_type", "Shift Type", InputKind::Select),
        AdmissionField::AssignedDoctor => {
            FieldSpec::new("assigned_doctor", "Assigned Doctor", InputKind::Text)
                .placeholder("Enter doctor's name")
        }
        AdmissionField::Specialty => FieldSpec::new("specialty", "Specialty", InputKind::Select),
        AdmissionField::Diagnosis => FieldSpec::new("diagnosis", "Diagnosis", InputKind::TextArea)
            .placeholder("Enter initial diagnosis"),
    }
}

pub fn consultation_field_spec(field: ConsultationField) -> FieldSpec {
    match field {
        ConsultationField::Mrn => {
            FieldSpec::new("mrn", "MRN", InputKind::Text).placeholder("Enter MRN")
        }
        ConsultationField::PatientName => {
            FieldSpec::new("patient_name", "Patient Name", InputKind::Text)
                .placeholder("Enter patient name")
        }
        ConsultationField::Age => AGE_SPEC,
        ConsultationField::Gender => FieldSpec::new("gender", "Gender", InputKind::Select),
        ConsultationField::RequestingDepartment => {
            FieldSpec::new("requesting_department", "Requesting Department", InputKind::Text)
                .placeholder("Enter requesting department")
        }
        ConsultationField::PatientLocation => {
            FieldSpec::new("patient_location", "Patient Location", InputKind::Text)
                .placeholder("Enter patient location")
        }
        ConsultationField::ConsultationSpecialty => FieldSpec::new(
            "consultation_specialty",
            "Consultation Specialty",
            InputKind::Select,
        ),
    }
}

/// Rendered fields for a mode, in display order.
pub fn field_specs(mode: FormMode) -> Vec<FieldSpec> {
    match mode {
        FormMode::Admission => AdmissionField::iter()
            .map(admission_field_spec)
            .filter(|spec| !spec.derived)
            .collect(),
        FormMode::Consultation => ConsultationField::iter()
            .map(consultation_field_spec)
            .collect(),
    }
}

/// A required/min/max rule the active draft currently breaks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintViolation {
    pub field: &'static str,
    pub message: String,
}

impl ConstraintViolation {
    fn missing(spec: &FieldSpec) -> Self {
        Self {
            field: spec.name,
            message: format!("{} is required", spec.label),
        }
    }
}

impl AdmissionForm {
    /// Shift choices offered for the admission draft's current weekend flag.
    pub fn shift_options(&self) -> &'static [Shift] {
        self.admission().shift_pattern().shifts()
    }

    pub fn gender_options(&self) -> Vec<Gender> {
        Gender::options()
    }

    pub fn specialty_options(&self) -> Vec<Specialty> {
        Specialty::options()
    }

    /// Fields the active draft would fail on in a browser form.
    ///
    /// Mirrors the input layer's required/min/max rules; an empty result means the
    /// form is submittable.
    pub fn constraint_violations(&self) -> Vec<ConstraintViolation> {
        match self.mode() {
            FormMode::Admission => admission_violations(self.admission()),
            FormMode::Consultation => consultation_violations(self.consultation()),
        }
    }
}

fn check_age(age: u8, out: &mut Vec<ConstraintViolation>) {
    if age > MAX_AGE {
        out.push(ConstraintViolation {
            field: AGE_SPEC.name,
            message: format!("{} must be between 0 and {}", AGE_SPEC.label, MAX_AGE),
        });
    }
}

fn admission_violations(draft: &AdmissionDraft) -> Vec<ConstraintViolation> {
    let mut out = Vec::new();
    for field in AdmissionField::iter() {
        let spec = admission_field_spec(field);
        if !spec.required {
            continue;
        }
        let missing = match field {
            AdmissionField::Mrn => draft.mrn.trim().is_empty(),
            AdmissionField::PatientName => draft.patient_name.trim().is_empty(),
            AdmissionField::Gender => draft.gender.is_none(),
            AdmissionField::AdmissionDate => draft.admission_date.trim().is_empty(),
            AdmissionField::ShiftType => draft.shift_type.is_empty(),
            AdmissionField::AssignedDoctor => draft.assigned_doctor.trim().is_empty(),
            AdmissionField::Specialty => draft.specialty.is_none(),
            AdmissionField::Diagnosis => draft.diagnosis.trim().is_empty(),
            // Number inputs always hold a value once parsed
            AdmissionField::Age
            | AdmissionField::AdmissionTime
            | AdmissionField::IsWeekendShift => false,
        };
        if missing {
            out.push(ConstraintViolation::missing(&spec));
        }
    }
    check_age(draft.age, &mut out);
    out
}

fn consultation_violations(draft: &ConsultationDraft) -> Vec<ConstraintViolation> {
    let mut out = Vec::new();
    for field in ConsultationField::iter() {
        let spec = consultation_field_spec(field);
        let missing = match field {
            ConsultationField::Mrn => draft.mrn.trim().is_empty(),
            ConsultationField::PatientName => draft.patient_name.trim().is_empty(),
            ConsultationField::Age => false,
            ConsultationField::Gender => draft.gender.is_none(),
            ConsultationField::RequestingDepartment => {
                draft.requesting_department.trim().is_empty()
            }
            ConsultationField::PatientLocation => draft.patient_location.trim().is_empty(),
            ConsultationField::ConsultationSpecialty => draft.consultation_specialty.is_none(),
        };
        if missing {
            out.push(ConstraintViolation::missing(&spec));
        }
    }
    check_age(draft.age, &mut out);
    out
}
