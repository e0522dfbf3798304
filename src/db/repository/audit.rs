use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::{parse_opt_uuid, parse_uuid};
use crate::db::DatabaseError;
use crate::models::enums::AuditAction;
use crate::models::*;

/// Append one audit record. The `audit_logs` table rejects UPDATE and DELETE.
pub fn insert_audit_entry(conn: &Connection, entry: &NewAuditEntry) -> Result<AuditEntry, DatabaseError> {
    let stored = AuditEntry {
        id: Uuid::new_v4(),
        user_id: entry.user_id,
        action: entry.action,
        table_name: entry.table_name.clone(),
        record_id: entry.record_id,
        old_values: entry.old_values.clone(),
        new_values: entry.new_values.clone(),
        changed_fields: entry.changed_fields.clone(),
        session_id: entry.session_id.clone(),
        patient_id: entry.patient_id,
        created_at: Utc::now(),
    };

    conn.execute(
        "INSERT INTO audit_logs (id, user_id, action, table_name, record_id, old_values,
         new_values, changed_fields, session_id, patient_id, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            stored.id.to_string(),
            stored.user_id.map(|id| id.to_string()),
            stored.action.as_str(),
            stored.table_name,
            stored.record_id.map(|id| id.to_string()),
            stored.old_values.as_ref().map(serde_json::to_string).transpose()?,
            stored.new_values.as_ref().map(serde_json::to_string).transpose()?,
            stored.changed_fields.as_ref().map(serde_json::to_string).transpose()?,
            stored.session_id,
            stored.patient_id.map(|id| id.to_string()),
            stored.created_at,
        ],
    )?;
    Ok(stored)
}

/// Audit records matching the filter, oldest first.
pub fn query_audit_entries(conn: &Connection, filter: &AuditFilter) -> Result<Vec<AuditEntry>, DatabaseError> {
    let mut sql = String::from(
        "SELECT id, user_id, action, table_name, record_id, old_values, new_values,
         changed_fields, session_id, patient_id, created_at
         FROM audit_logs WHERE 1=1",
    );
    let mut params_vec: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

    if let Some(ref table) = filter.table_name {
        params_vec.push(Box::new(table.clone()));
        sql.push_str(&format!(" AND table_name = ?{}", params_vec.len()));
    }
    if let Some(record_id) = filter.record_id {
        params_vec.push(Box::new(record_id.to_string()));
        sql.push_str(&format!(" AND record_id = ?{}", params_vec.len()));
    }
    if let Some(patient_id) = filter.patient_id {
        params_vec.push(Box::new(patient_id.to_string()));
        sql.push_str(&format!(" AND patient_id = ?{}", params_vec.len()));
    }
    if let Some(action) = filter.action {
        params_vec.push(Box::new(action.as_str()));
        sql.push_str(&format!(" AND action = ?{}", params_vec.len()));
    }
    sql.push_str(" ORDER BY created_at ASC, rowid ASC");

    let param_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(param_refs.as_slice(), |row| {
        Ok(AuditRow {
            id: row.get(0)?,
            user_id: row.get(1)?,
            action: row.get(2)?,
            table_name: row.get(3)?,
            record_id: row.get(4)?,
            old_values: row.get(5)?,
            new_values: row.get(6)?,
            changed_fields: row.get(7)?,
            session_id: row.get(8)?,
            patient_id: row.get(9)?,
            created_at: row.get(10)?,
        })
    })?;

    let mut entries = Vec::new();
    for row in rows {
        entries.push(audit_from_row(row?)?);
    }
    Ok(entries)
}

/// Number of audit records for one table row.
pub fn count_audit_entries_for_record(
    conn: &Connection,
    table_name: &str,
    record_id: &Uuid,
) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM audit_logs WHERE table_name = ?1 AND record_id = ?2",
        params![table_name, record_id.to_string()],
        |row| row.get::<_, i64>(0),
    )?;
    Ok(count)
}

struct AuditRow {
    id: String,
    user_id: Option<String>,
    action: String,
    table_name: String,
    record_id: Option<String>,
    old_values: Option<String>,
    new_values: Option<String>,
    changed_fields: Option<String>,
    session_id: Option<String>,
    patient_id: Option<String>,
    created_at: DateTime<Utc>,
}

fn audit_from_row(row: AuditRow) -> Result<AuditEntry, DatabaseError> {
    Ok(AuditEntry {
        id: parse_uuid(&row.id)?,
        user_id: parse_opt_uuid(row.user_id.as_deref())?,
        action: AuditAction::from_str(&row.action)?,
        table_name: row.table_name,
        record_id: parse_opt_uuid(row.record_id.as_deref())?,
        old_values: row.old_values.as_deref().map(serde_json::from_str).transpose()?,
        new_values: row.new_values.as_deref().map(serde_json::from_str).transpose()?,
        changed_fields: row.changed_fields.as_deref().map(serde_json::from_str).transpose()?,
        session_id: row.session_id,
        patient_id: parse_opt_uuid(row.patient_id.as_deref())?,
        created_at: row.created_at,
    })
}
