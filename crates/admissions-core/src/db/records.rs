//! Admission and consultation row operations.

use std::str::FromStr;

use rusqlite::{params, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

use super::{classify, Database, DbError, DbResult};
use crate::models::{AdmissionDraft, ConsultationDraft, Gender, Specialty};
use crate::submit::{AdmissionRecord, ConsultationRecord};

/// An admission row as stored, with its assigned id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredAdmission {
    pub id: String,
    #[serde(flatten)]
    pub record: AdmissionRecord,
}

/// A consultation row as stored, with its assigned id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredConsultation {
    pub id: String,
    #[serde(flatten)]
    pub record: ConsultationRecord,
}

const ADMISSION_COLUMNS: &str = r#"
    id, mrn, patient_name, age, gender, admission_date, admission_time,
    shift_type, is_weekend_shift, assigned_doctor, specialty, diagnosis,
    patient_status, created_at, updated_at
"#;

const CONSULTATION_COLUMNS: &str = r#"
    id, mrn, patient_name, age, gender, requesting_department,
    patient_location, consultation_specialty, status, created_at, updated_at
"#;

impl Database {
    /// Insert an admission and return it with its new id.
    pub fn insert_admission(&self, record: &AdmissionRecord) -> DbResult<StoredAdmission> {
        let id = uuid::Uuid::new_v4().to_string();
        let draft = &record.draft;

        self.conn
            .execute(
                r#"
                INSERT INTO patients (
                    id, mrn, patient_name, age, gender, admission_date, admission_time,
                    shift_type, is_weekend_shift, assigned_doctor, specialty, diagnosis,
                    patient_status, created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
                "#,
                params![
                    id,
                    draft.mrn,
                    draft.patient_name,
                    draft.age,
                    draft.gender.map(|g| g.to_string()),
                    draft.admission_date,
                    draft.admission_time,
                    draft.shift_type,
                    draft.is_weekend_shift,
                    draft.assigned_doctor,
                    draft.specialty.map(|s| s.to_string()),
                    draft.diagnosis,
                    record.patient_status,
                    record.created_at,
                    record.updated_at,
                ],
            )
            .map_err(classify)?;

        Ok(StoredAdmission {
            id,
            record: record.clone(),
        })
    }

    /// Get an admission by id.
    pub fn get_admission(&self, id: &str) -> DbResult<Option<StoredAdmission>> {
        let sql = format!("SELECT {} FROM patients WHERE id = ?", ADMISSION_COLUMNS);
        self.conn
            .query_row(&sql, [id], AdmissionRow::from_row)
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// List admissions, newest first.
    pub fn list_admissions(&self) -> DbResult<Vec<StoredAdmission>> {
        let sql = format!(
            "SELECT {} FROM patients ORDER BY created_at DESC",
            ADMISSION_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], AdmissionRow::from_row)?;

        let mut admissions = Vec::new();
        for row in rows {
            admissions.push(row?.try_into()?);
        }
        Ok(admissions)
    }

    /// Insert a consultation and return it with its new id.
    pub fn insert_consultation(&self, record: &ConsultationRecord) -> DbResult<StoredConsultation> {
        let id = uuid::Uuid::new_v4().to_string();
        let draft = &record.draft;

        self.conn
            .execute(
                r#"
                INSERT INTO consultations (
                    id, mrn, patient_name, age, gender, requesting_department,
                    patient_location, consultation_specialty, status, created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
                "#,
                params![
                    id,
                    draft.mrn,
                    draft.patient_name,
                    draft.age,
                    draft.gender.map(|g| g.to_string()),
                    draft.requesting_department,
                    draft.patient_location,
                    draft.consultation_specialty.map(|s| s.to_string()),
                    record.status,
                    record.created_at,
                    record.updated_at,
                ],
            )
            .map_err(classify)?;

        Ok(StoredConsultation {
            id,
            record: record.clone(),
        })
    }

    /// Get a consultation by id.
    pub fn get_consultation(&self, id: &str) -> DbResult<Option<StoredConsultation>> {
        let sql = format!("SELECT {} FROM consultations WHERE id = ?", CONSULTATION_COLUMNS);
        self.conn
            .query_row(&sql, [id], ConsultationRow::from_row)
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// List consultations, newest first.
    pub fn list_consultations(&self) -> DbResult<Vec<StoredConsultation>> {
        let sql = format!(
            "SELECT {} FROM consultations ORDER BY created_at DESC",
            CONSULTATION_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], ConsultationRow::from_row)?;

        let mut consultations = Vec::new();
        for row in rows {
            consultations.push(row?.try_into()?);
        }
        Ok(consultations)
    }
}

// Internal row types for database mapping

struct AdmissionRow {
    id: String,
    mrn: String,
    patient_name: String,
    age: u8,
    gender: Option<String>,
    admission_date: String,
    admission_time: String,
    shift_type: String,
    is_weekend_shift: bool,
    assigned_doctor: String,
    specialty: Option<String>,
    diagnosis: String,
    patient_status: String,
    created_at: String,
    updated_at: String,
}

impl AdmissionRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            mrn: row.get(1)?,
            patient_name: row.get(2)?,
            age: row.get(3)?,
            gender: row.get(4)?,
            admission_date: row.get(5)?,
            admission_time: row.get(6)?,
            shift_type: row.get(7)?,
            is_weekend_shift: row.get(8)?,
            assigned_doctor: row.get(9)?,
            specialty: row.get(10)?,
            diagnosis: row.get(11)?,
            patient_status: row.get(12)?,
            created_at: row.get(13)?,
            updated_at: row.get(14)?,
        })
    }
}

impl TryFrom<AdmissionRow> for StoredAdmission {
    type Error = DbError;

    fn try_from(row: AdmissionRow) -> Result<Self, Self::Error> {
        Ok(StoredAdmission {
            id: row.id,
            record: AdmissionRecord {
                draft: AdmissionDraft {
                    mrn: row.mrn,
                    patient_name: row.patient_name,
                    age: row.age,
                    gender: parse_column::<Gender>("gender", row.gender)?,
                    admission_date: row.admission_date,
                    admission_time: row.admission_time,
                    shift_type: row.shift_type,
                    is_weekend_shift: row.is_weekend_shift,
                    assigned_doctor: row.assigned_doctor,
                    specialty: parse_column::<Specialty>("specialty", row.specialty)?,
                    diagnosis: row.diagnosis,
                },
                patient_status: row.patient_status,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        })
    }
}

struct ConsultationRow {
    id: String,
    mrn: String,
    patient_name: String,
    age: u8,
    gender: Option<String>,
    requesting_department: String,
    patient_location: String,
    consultation_specialty: Option<String>,
    status: String,
    created_at: String,
    updated_at: String,
}

impl ConsultationRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            mrn: row.get(1)?,
            patient_name: row.get(2)?,
            age: row.get(3)?,
            gender: row.get(4)?,
            requesting_department: row.get(5)?,
            patient_location: row.get(6)?,
            consultation_specialty: row.get(7)?,
            status: row.get(8)?,
            created_at: row.get(9)?,
            updated_at: row.get(10)?,
        })
    }
}

impl TryFrom<ConsultationRow> for StoredConsultation {
    type Error = DbError;

    fn try_from(row: ConsultationRow) -> Result<Self, Self::Error> {
        Ok(StoredConsultation {
            id: row.id,
            record: ConsultationRecord {
                draft: ConsultationDraft {
                    mrn: row.mrn,
                    patient_name: row.patient_name,
                    age: row.age,
                    gender: parse_column::<Gender>("gender", row.gender)?,
                    requesting_department: row.requesting_department,
                    patient_location: row.patient_location,
                    consultation_specialty: parse_column::<Specialty>(
                        "consultation_specialty",
                        row.consultation_specialty,
                    )?,
                },
                status: row.status,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        })
    }
}

fn parse_column<T: FromStr>(column: &'static str, value: Option<String>) -> DbResult<Option<T>> {
    value
        .map(|v| T::from_str(&v).map_err(|_| DbError::InvalidValue { column, value: v.clone() }))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn make_admission(mrn: &str) -> AdmissionRecord {
        let mut draft = AdmissionDraft::new();
        draft.mrn = mrn.into();
        draft.patient_name = "Ada Lovelace".into();
        draft.age = 36;
        draft.gender = Some(Gender::Female);
        draft.admission_date = "2024-03-09".into();
        draft.select_shift("Evening");
        draft.assigned_doctor = "Dr. Babbage".into();
        draft.specialty = Some(Specialty::RespiratoryMedicine);
        draft.diagnosis = "Community-acquired pneumonia".into();
        AdmissionRecord::new(draft, Utc::now())
    }

    #[test]
    fn test_insert_and_get_admission() {
        let db = setup_db();
        let record = make_admission("MRN-1");

        let stored = db.insert_admission(&record).unwrap();
        assert_eq!(stored.id.len(), 36);

        let retrieved = db.get_admission(&stored.id).unwrap().unwrap();
        assert_eq!(retrieved, stored);
        assert_eq!(retrieved.record.draft.admission_time, "15:00");
        assert_eq!(retrieved.record.patient_status, "Active");
    }

    #[test]
    fn test_get_missing_admission() {
        let db = setup_db();
        assert!(db.get_admission("nope").unwrap().is_none());
    }

    #[test]
    fn test_age_check_is_constraint_violation() {
        let db = setup_db();
        let mut record = make_admission("MRN-2");
        record.draft.age = 200;

        let err = db.insert_admission(&record).unwrap_err();
        assert!(matches!(err, DbError::Constraint(_)));
        assert!(db.list_admissions().unwrap().is_empty());
    }

    #[test]
    fn test_insert_and_list_consultations() {
        let db = setup_db();
        let mut draft = ConsultationDraft::new();
        draft.mrn = "C-9".into();
        draft.consultation_specialty = Some(Specialty::Hematology);
        let record = ConsultationRecord::new(draft, Utc::now());

        let stored = db.insert_consultation(&record).unwrap();
        let all = db.list_consultations().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, stored.id);
        assert_eq!(
            all[0].record.draft.consultation_specialty,
            Some(Specialty::Hematology)
        );
        assert_eq!(all[0].record.draft.gender, None);
    }

    #[test]
    fn test_corrupt_enum_column() {
        let db = setup_db();
        let stored = db.insert_admission(&make_admission("MRN-3")).unwrap();
        db.conn()
            .execute("UPDATE patients SET gender = 'Other' WHERE id = ?", [&stored.id])
            .unwrap();

        let err = db.get_admission(&stored.id).unwrap_err();
        assert!(matches!(err, DbError::InvalidValue { column: "gender", .. }));
    }
}
