use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::parse_uuid;
use crate::db::DatabaseError;
use crate::models::enums::*;
use crate::models::*;

pub fn insert_patient(conn: &Connection, input: &NewPatient) -> Result<Patient, DatabaseError> {
    let now = Utc::now();
    let patient = Patient {
        id: Uuid::new_v4(),
        mrn: input.mrn.clone(),
        first_name: input.first_name.clone(),
        last_name: input.last_name.clone(),
        date_of_birth: input.date_of_birth,
        gender: input.gender,
        email: input.email.clone(),
        phone: input.phone.clone(),
        allergies: input.allergies.clone(),
        is_active: true,
        created_at: now,
        updated_at: now,
    };

    conn.execute(
        "INSERT INTO patients (id, mrn, first_name, last_name, date_of_birth, gender, email, phone,
         allergies, is_active, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            patient.id.to_string(),
            patient.mrn,
            patient.first_name,
            patient.last_name,
            patient.date_of_birth,
            patient.gender.map(|g| g.as_str()),
            patient.email,
            patient.phone,
            serde_json::to_string(&patient.allergies)?,
            patient.is_active as i32,
            patient.created_at,
            patient.updated_at,
        ],
    )?;
    Ok(patient)
}

pub fn get_patient(conn: &Connection, id: &Uuid) -> Result<Option<Patient>, DatabaseError> {
    let sql = format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let result = stmt.query_row(params![id.to_string()], patient_row);

    match result {
        Ok(row) => Ok(Some(patient_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Patients ordered by last name, optionally filtered by a name/MRN search.
pub fn search_patients(conn: &Connection, filter: &PatientFilter) -> Result<Vec<Patient>, DatabaseError> {
    let mut sql = format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE 1=1");
    let mut params_vec: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

    if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        params_vec.push(Box::new(format!("%{search}%")));
        let idx = params_vec.len();
        sql.push_str(&format!(
            " AND (first_name LIKE ?{idx} OR last_name LIKE ?{idx} OR mrn LIKE ?{idx})"
        ));
    }
    if filter.active_only {
        sql.push_str(" AND is_active = 1");
    }
    sql.push_str(" ORDER BY last_name ASC, first_name ASC");

    let param_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(param_refs.as_slice(), patient_row)?;

    let mut patients = Vec::new();
    for row in rows {
        patients.push(patient_from_row(row?)?);
    }
    Ok(patients)
}

const PATIENT_COLUMNS: &str = "id, mrn, first_name, last_name, date_of_birth, gender, email, phone,
     allergies, is_active, created_at, updated_at";

struct PatientRow {
    id: String,
    mrn: String,
    first_name: String,
    last_name: String,
    date_of_birth: NaiveDate,
    gender: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    allergies: String,
    is_active: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn patient_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PatientRow> {
    Ok(PatientRow {
        id: row.get(0)?,
        mrn: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        date_of_birth: row.get(4)?,
        gender: row.get(5)?,
        email: row.get(6)?,
        phone: row.get(7)?,
        allergies: row.get(8)?,
        is_active: row.get(9)?,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}

fn patient_from_row(row: PatientRow) -> Result<Patient, DatabaseError> {
    Ok(Patient {
        id: parse_uuid(&row.id)?,
        mrn: row.mrn,
        first_name: row.first_name,
        last_name: row.last_name,
        date_of_birth: row.date_of_birth,
        gender: row.gender.as_deref().map(Gender::from_str).transpose()?,
        email: row.email,
        phone: row.phone,
        allergies: serde_json::from_str(&row.allergies)?,
        is_active: row.is_active != 0,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
