use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::{get_appointment, get_patient, get_profile, parse_opt_uuid, parse_uuid};
use crate::config::DEFAULT_PAGE_SIZE;
use crate::db::DatabaseError;
use crate::models::enums::Specialty;
use crate::models::*;

const NOTE_COLUMNS: &str = "n.id, n.patient_id, n.provider_id, n.appointment_id, n.specialty,
     n.subjective, n.objective, n.assessment, n.plan, n.is_signed, n.signed_at, n.is_locked,
     n.locked_at, n.addendums, n.created_at, n.updated_at";

/// Insert a new draft note. Id and timestamps are assigned here.
pub fn insert_note(conn: &Connection, input: &CreateNoteInput) -> Result<ClinicalNote, DatabaseError> {
    let now = Utc::now();
    let note = ClinicalNote {
        id: Uuid::new_v4(),
        patient_id: input.patient_id,
        provider_id: input.provider_id,
        appointment_id: input.appointment_id,
        specialty: input.specialty,
        subjective: input.subjective.clone().unwrap_or_default(),
        objective: input.objective.clone().unwrap_or_default(),
        assessment: input.assessment.clone().unwrap_or_default(),
        plan: input.plan.clone().unwrap_or_default(),
        is_signed: false,
        signed_at: None,
        is_locked: false,
        locked_at: None,
        addendums: Vec::new(),
        created_at: now,
        updated_at: now,
    };

    conn.execute(
        "INSERT INTO clinical_notes (id, patient_id, provider_id, appointment_id, specialty,
         subjective, objective, assessment, plan, is_signed, signed_at, is_locked, locked_at,
         addendums, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 0, NULL, 0, NULL, ?10, ?11, ?12)",
        params![
            note.id.to_string(),
            note.patient_id.to_string(),
            note.provider_id.to_string(),
            note.appointment_id.map(|id| id.to_string()),
            note.specialty.as_str(),
            serde_json::to_string(&note.subjective)?,
            serde_json::to_string(&note.objective)?,
            serde_json::to_string(&note.assessment)?,
            serde_json::to_string(&note.plan)?,
            serde_json::to_string(&note.addendums)?,
            note.created_at,
            note.updated_at,
        ],
    )?;
    Ok(note)
}

pub fn get_note(conn: &Connection, id: &Uuid) -> Result<Option<ClinicalNote>, DatabaseError> {
    let sql = format!("SELECT {NOTE_COLUMNS} FROM clinical_notes n WHERE n.id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let result = stmt.query_row(params![id.to_string()], note_row);

    match result {
        Ok(row) => Ok(Some(note_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// The note charted for an appointment, if any. At most one exists (unique index).
pub fn get_note_by_appointment(
    conn: &Connection,
    appointment_id: &Uuid,
) -> Result<Option<ClinicalNote>, DatabaseError> {
    let sql = format!("SELECT {NOTE_COLUMNS} FROM clinical_notes n WHERE n.appointment_id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let result = stmt.query_row(params![appointment_id.to_string()], note_row);

    match result {
        Ok(row) => Ok(Some(note_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Note joined with its full patient, provider and appointment records.
pub fn get_note_detail(conn: &Connection, id: &Uuid) -> Result<Option<NoteDetail>, DatabaseError> {
    let Some(note) = get_note(conn, id)? else {
        return Ok(None);
    };
    let patient = get_patient(conn, &note.patient_id)?;
    let provider = get_profile(conn, &note.provider_id)?;
    let appointment = match note.appointment_id {
        Some(appt_id) => get_appointment(conn, &appt_id)?,
        None => None,
    };
    Ok(Some(NoteDetail {
        note,
        patient,
        provider,
        appointment,
    }))
}

/// Notes matching the filter, newest first, with patient/provider summaries.
///
/// An `offset` without a `limit` pages by `DEFAULT_PAGE_SIZE`.
pub fn list_notes(conn: &Connection, filter: &NoteFilter) -> Result<Vec<NoteListItem>, DatabaseError> {
    let mut sql = format!(
        "SELECT {NOTE_COLUMNS},
                p.id, p.mrn, p.first_name, p.last_name, p.date_of_birth,
                pr.id, pr.full_name, pr.specialty
         FROM clinical_notes n
         LEFT JOIN patients p ON p.id = n.patient_id
         LEFT JOIN profiles pr ON pr.id = n.provider_id
         WHERE 1=1"
    );
    let mut params_vec: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

    if let Some(patient_id) = filter.patient_id {
        params_vec.push(Box::new(patient_id.to_string()));
        sql.push_str(&format!(" AND n.patient_id = ?{}", params_vec.len()));
    }
    if let Some(provider_id) = filter.provider_id {
        params_vec.push(Box::new(provider_id.to_string()));
        sql.push_str(&format!(" AND n.provider_id = ?{}", params_vec.len()));
    }
    if let Some(specialty) = filter.specialty {
        params_vec.push(Box::new(specialty.as_str()));
        sql.push_str(&format!(" AND n.specialty = ?{}", params_vec.len()));
    }

    sql.push_str(" ORDER BY n.created_at DESC, n.rowid DESC");

    let limit = filter
        .limit
        .or_else(|| filter.offset.map(|_| DEFAULT_PAGE_SIZE));
    if let Some(limit) = limit {
        params_vec.push(Box::new(limit));
        sql.push_str(&format!(" LIMIT ?{}", params_vec.len()));
        if let Some(offset) = filter.offset {
            params_vec.push(Box::new(offset));
            sql.push_str(&format!(" OFFSET ?{}", params_vec.len()));
        }
    }

    let param_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(param_refs.as_slice(), |row| {
        Ok((
            note_row(row)?,
            SummaryRow {
                patient_id: row.get(16)?,
                mrn: row.get(17)?,
                first_name: row.get(18)?,
                last_name: row.get(19)?,
                date_of_birth: row.get(20)?,
                provider_id: row.get(21)?,
                provider_name: row.get(22)?,
                provider_specialty: row.get(23)?,
            },
        ))
    })?;

    let mut items = Vec::new();
    for row in rows {
        let (note_row, summary) = row?;
        items.push(NoteListItem {
            note: note_from_row(note_row)?,
            patient: summary.patient()?,
            provider: summary.provider()?,
        });
    }
    Ok(items)
}

/// Overwrite a note only while it is unlocked.
///
/// The lock check and the write are one statement, so a note signed by a
/// concurrent caller is never overwritten. Returns `None` when no unlocked
/// row with this id exists.
pub fn update_unlocked_note(
    conn: &Connection,
    note: &ClinicalNote,
) -> Result<Option<ClinicalNote>, DatabaseError> {
    let changed = conn.execute(
        "UPDATE clinical_notes SET appointment_id = ?2, specialty = ?3, subjective = ?4,
         objective = ?5, assessment = ?6, plan = ?7, is_signed = ?8, signed_at = ?9,
         is_locked = ?10, locked_at = ?11, updated_at = ?12
         WHERE id = ?1 AND is_locked = 0",
        params![
            note.id.to_string(),
            note.appointment_id.map(|id| id.to_string()),
            note.specialty.as_str(),
            serde_json::to_string(&note.subjective)?,
            serde_json::to_string(&note.objective)?,
            serde_json::to_string(&note.assessment)?,
            serde_json::to_string(&note.plan)?,
            note.is_signed as i32,
            note.signed_at,
            note.is_locked as i32,
            note.locked_at,
            note.updated_at,
        ],
    )?;
    if changed == 0 {
        return Ok(None);
    }
    get_note(conn, &note.id)
}

/// Write back the full addendum sequence if it still has `expected_len` entries.
///
/// Returns `None` when the note is gone or another append landed first.
pub fn replace_addendums(
    conn: &Connection,
    id: &Uuid,
    expected_len: usize,
    addendums: &[Addendum],
    updated_at: DateTime<Utc>,
) -> Result<Option<ClinicalNote>, DatabaseError> {
    let changed = conn.execute(
        "UPDATE clinical_notes SET addendums = ?2, updated_at = ?3
         WHERE id = ?1 AND json_array_length(addendums) = ?4",
        params![
            id.to_string(),
            serde_json::to_string(addendums)?,
            updated_at,
            expected_len as i64,
        ],
    )?;
    if changed == 0 {
        return Ok(None);
    }
    get_note(conn, id)
}

/// Hard-delete a note that is neither signed nor locked. Returns whether a row was removed.
pub fn delete_draft_note(conn: &Connection, id: &Uuid) -> Result<bool, DatabaseError> {
    let deleted = conn.execute(
        "DELETE FROM clinical_notes WHERE id = ?1 AND is_signed = 0 AND is_locked = 0",
        params![id.to_string()],
    )?;
    Ok(deleted > 0)
}

struct NoteRow {
    id: String,
    patient_id: String,
    provider_id: String,
    appointment_id: Option<String>,
    specialty: String,
    subjective: String,
    objective: String,
    assessment: String,
    plan: String,
    is_signed: i32,
    signed_at: Option<DateTime<Utc>>,
    is_locked: i32,
    locked_at: Option<DateTime<Utc>>,
    addendums: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn note_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<NoteRow> {
    Ok(NoteRow {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        provider_id: row.get(2)?,
        appointment_id: row.get(3)?,
        specialty: row.get(4)?,
        subjective: row.get(5)?,
        objective: row.get(6)?,
        assessment: row.get(7)?,
        plan: row.get(8)?,
        is_signed: row.get(9)?,
        signed_at: row.get(10)?,
        is_locked: row.get(11)?,
        locked_at: row.get(12)?,
        addendums: row.get(13)?,
        created_at: row.get(14)?,
        updated_at: row.get(15)?,
    })
}

fn note_from_row(row: NoteRow) -> Result<ClinicalNote, DatabaseError> {
    Ok(ClinicalNote {
        id: parse_uuid(&row.id)?,
        patient_id: parse_uuid(&row.patient_id)?,
        provider_id: parse_uuid(&row.provider_id)?,
        appointment_id: parse_opt_uuid(row.appointment_id.as_deref())?,
        specialty: Specialty::from_str(&row.specialty)?,
        subjective: serde_json::from_str(&row.subjective)?,
        objective: serde_json::from_str(&row.objective)?,
        assessment: serde_json::from_str(&row.assessment)?,
        plan: serde_json::from_str(&row.plan)?,
        is_signed: row.is_signed != 0,
        signed_at: row.signed_at,
        is_locked: row.is_locked != 0,
        locked_at: row.locked_at,
        addendums: serde_json::from_str(&row.addendums)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

struct SummaryRow {
    patient_id: Option<String>,
    mrn: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    date_of_birth: Option<NaiveDate>,
    provider_id: Option<String>,
    provider_name: Option<String>,
    provider_specialty: Option<String>,
}

impl SummaryRow {
    fn patient(&self) -> Result<Option<PatientSummary>, DatabaseError> {
        let (Some(id), Some(mrn), Some(first), Some(last), Some(dob)) = (
            self.patient_id.as_deref(),
            &self.mrn,
            &self.first_name,
            &self.last_name,
            self.date_of_birth,
        ) else {
            return Ok(None);
        };
        Ok(Some(PatientSummary {
            id: parse_uuid(id)?,
            mrn: mrn.clone(),
            first_name: first.clone(),
            last_name: last.clone(),
            date_of_birth: dob,
        }))
    }

    fn provider(&self) -> Result<Option<ProviderSummary>, DatabaseError> {
        let (Some(id), Some(name)) = (self.provider_id.as_deref(), &self.provider_name) else {
            return Ok(None);
        };
        Ok(Some(ProviderSummary {
            id: parse_uuid(id)?,
            full_name: name.clone(),
            specialty: self
                .provider_specialty
                .as_deref()
                .map(Specialty::from_str)
                .transpose()?,
        }))
    }
}
