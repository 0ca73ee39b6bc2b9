//! Form mode: which record type the intake form is collecting.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FormMode {
    /// New patient admission
    #[default]
    Admission,
    /// New consultation request
    Consultation,
}

impl FormMode {
    /// Page heading for this mode.
    pub fn title(&self) -> &'static str {
        match self {
            FormMode::Admission => "New Patient Admission",
            FormMode::Consultation => "New Consultation Request",
        }
    }

    /// Label of the submit button.
    pub fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Admission => "Admit Patient",
            FormMode::Consultation => "Submit Consultation Request",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            FormMode::Admission => "Patient admitted successfully",
            FormMode::Consultation => "Consultation request submitted successfully",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            FormMode::Admission => "Failed to admit patient",
            FormMode::Consultation => "Failed to submit consultation request",
        }
    }
}
