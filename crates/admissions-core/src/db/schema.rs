//! SQLite schema definition.

/// Schema for the local record store.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Patients (admissions)
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    id TEXT PRIMARY KEY,
    mrn TEXT NOT NULL,
    patient_name TEXT NOT NULL,
    age INTEGER NOT NULL CHECK (age BETWEEN 0 AND 150),
    gender TEXT,                                 -- 'Male' | 'Female'
    admission_date TEXT NOT NULL,
    admission_time TEXT NOT NULL,                -- HH:MM, derived from shift
    shift_type TEXT NOT NULL,
    is_weekend_shift INTEGER NOT NULL DEFAULT 0,
    assigned_doctor TEXT NOT NULL,
    specialty TEXT,
    diagnosis TEXT NOT NULL,
    patient_status TEXT NOT NULL DEFAULT 'Active',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_patients_mrn ON patients(mrn);
CREATE INDEX IF NOT EXISTS idx_patients_created_at ON patients(created_at);

-- ============================================================================
-- Consultations
-- ============================================================================

CREATE TABLE IF NOT EXISTS consultations (
    id TEXT PRIMARY KEY,
    mrn TEXT NOT NULL,                           -- 'C-' prefixed
    patient_name TEXT NOT NULL,
    age INTEGER NOT NULL CHECK (age BETWEEN 0 AND 150),
    gender TEXT,
    requesting_department TEXT NOT NULL,
    patient_location TEXT NOT NULL,
    consultation_specialty TEXT,
    status TEXT NOT NULL DEFAULT 'Active',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_consultations_mrn ON consultations(mrn);
CREATE INDEX IF NOT EXISTS idx_consultations_created_at ON consultations(created_at);
"#;
