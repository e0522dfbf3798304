use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::{parse_opt_uuid, parse_uuid};
use crate::db::DatabaseError;
use crate::models::enums::*;
use crate::models::*;

pub fn insert_appointment(
    conn: &Connection,
    input: &NewAppointment,
) -> Result<Appointment, DatabaseError> {
    let now = Utc::now();
    let appt = Appointment {
        id: Uuid::new_v4(),
        patient_id: input.patient_id,
        provider_id: input.provider_id,
        scheduled_at: input.scheduled_at,
        duration_minutes: input.duration_minutes,
        appointment_type: input.appointment_type,
        specialty: input.specialty,
        status: input.status,
        chief_complaint: input.chief_complaint.clone(),
        created_at: now,
        updated_at: now,
    };

    conn.execute(
        "INSERT INTO appointments (id, patient_id, provider_id, scheduled_at, duration_minutes,
         appointment_type, specialty, status, chief_complaint, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            appt.id.to_string(),
            appt.patient_id.to_string(),
            appt.provider_id.map(|id| id.to_string()),
            appt.scheduled_at,
            appt.duration_minutes,
            appt.appointment_type.as_str(),
            appt.specialty.map(|s| s.as_str()),
            appt.status.as_str(),
            appt.chief_complaint,
            appt.created_at,
            appt.updated_at,
        ],
    )?;
    Ok(appt)
}

pub fn get_appointment(conn: &Connection, id: &Uuid) -> Result<Option<Appointment>, DatabaseError> {
    let sql = format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let result = stmt.query_row(params![id.to_string()], appointment_row);

    match result {
        Ok(row) => Ok(Some(appointment_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

const APPOINTMENT_COLUMNS: &str = "id, patient_id, provider_id, scheduled_at, duration_minutes,
     appointment_type, specialty, status, chief_complaint, created_at, updated_at";

struct AppointmentRow {
    id: String,
    patient_id: String,
    provider_id: Option<String>,
    scheduled_at: DateTime<Utc>,
    duration_minutes: u32,
    appointment_type: String,
    specialty: Option<String>,
    status: String,
    chief_complaint: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn appointment_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AppointmentRow> {
    Ok(AppointmentRow {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        provider_id: row.get(2)?,
        scheduled_at: row.get(3)?,
        duration_minutes: row.get(4)?,
        appointment_type: row.get(5)?,
        specialty: row.get(6)?,
        status: row.get(7)?,
        chief_complaint: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

fn appointment_from_row(row: AppointmentRow) -> Result<Appointment, DatabaseError> {
    Ok(Appointment {
        id: parse_uuid(&row.id)?,
        patient_id: parse_uuid(&row.patient_id)?,
        provider_id: parse_opt_uuid(row.provider_id.as_deref())?,
        scheduled_at: row.scheduled_at,
        duration_minutes: row.duration_minutes,
        appointment_type: AppointmentType::from_str(&row.appointment_type)?,
        specialty: row.specialty.as_deref().map(Specialty::from_str).transpose()?,
        status: AppointmentStatus::from_str(&row.status)?,
        chief_complaint: row.chief_complaint,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
