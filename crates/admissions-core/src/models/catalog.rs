//! Fixed option catalogs: genders, specialties, and shift definitions.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Patient gender as offered by the intake form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
    AsRefStr,
)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// All options in display order.
    pub fn options() -> Vec<Gender> {
        Gender::iter().collect()
    }
}

/// Clinical specialty an admission or consultation is routed to.
///
/// Serialized with the human-readable label, which is also what the backend stores.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
    AsRefStr,
)]
pub enum Specialty {
    #[serde(rename = "General Internal Medicine")]
    #[strum(serialize = "General Internal Medicine")]
    GeneralInternalMedicine,
    #[serde(rename = "Respiratory Medicine")]
    #[strum(serialize = "Respiratory Medicine")]
    RespiratoryMedicine,
    #[serde(rename = "Infectious Diseases")]
    #[strum(serialize = "Infectious Diseases")]
    InfectiousDiseases,
    #[serde(rename = "Neurology")]
    #[strum(serialize = "Neurology")]
    Neurology,
    #[serde(rename = "Gastroenterology")]
    #[strum(serialize = "Gastroenterology")]
    Gastroenterology,
    #[serde(rename = "Rheumatology")]
    #[strum(serialize = "Rheumatology")]
    Rheumatology,
    #[serde(rename = "Hematology")]
    #[strum(serialize = "Hematology")]
    Hematology,
    #[serde(rename = "Thrombosis Medicine")]
    #[strum(serialize = "Thrombosis Medicine")]
    ThrombosisMedicine,
    #[serde(rename = "Immunology & Allergy")]
    #[strum(serialize = "Immunology & Allergy")]
    ImmunologyAndAllergy,
    #[serde(rename = "Safety Admission")]
    #[strum(serialize = "Safety Admission")]
    SafetyAdmission,
    #[serde(rename = "Medical Consultations")]
    #[strum(serialize = "Medical Consultations")]
    MedicalConsultations,
}

impl Specialty {
    /// All specialties in display order.
    pub fn options() -> Vec<Specialty> {
        Specialty::iter().collect()
    }
}

/// A named work period with a fixed start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Shift {
    pub name: &'static str,
    /// Start time, HH:MM
    pub start_time: &'static str,
}

pub const REGULAR_SHIFTS: [Shift; 3] = [
    Shift { name: "Morning", start_time: "07:00" },
    Shift { name: "Evening", start_time: "15:00" },
    Shift { name: "Night", start_time: "23:00" },
];

pub const WEEKEND_SHIFTS: [Shift; 2] = [
    Shift { name: "Morning 12 hours", start_time: "07:00" },
    Shift { name: "Night 12 hours", start_time: "19:00" },
];

/// Which shift roster applies, selected by the weekend flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftPattern {
    /// Three 8-hour shifts
    Regular,
    /// Two 12-hour shifts
    Weekend,
}

impl ShiftPattern {
    pub fn for_weekend(is_weekend: bool) -> Self {
        if is_weekend {
            ShiftPattern::Weekend
        } else {
            ShiftPattern::Regular
        }
    }

    /// Shifts available under this pattern.
    pub fn shifts(&self) -> &'static [Shift] {
        match self {
            ShiftPattern::Regular => &REGULAR_SHIFTS,
            ShiftPattern::Weekend => &WEEKEND_SHIFTS,
        }
    }

    /// Look up a shift by exact name.
    pub fn find(&self, name: &str) -> Option<&'static Shift> {
        self.shifts().iter().find(|shift| shift.name == name)
    }

    /// Start time for the named shift, if it belongs to this pattern.
    pub fn start_time(&self, name: &str) -> Option<&'static str> {
        self.find(name).map(|shift| shift.start_time)
    }
}
