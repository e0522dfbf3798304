//! Best-effort PHI audit writer.
//!
//! A failed audit insert is logged and dropped; it never fails or rolls back
//! the charting operation that produced it.

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::context::AccessContext;
use super::store::NoteStore;
use crate::models::enums::AuditAction;
use crate::models::NewAuditEntry;

pub(crate) const NOTES_TABLE: &str = "clinical_notes";

/// Audit entry for one clinical note, before the optional snapshots are attached.
pub(crate) fn note_entry(
    ctx: &AccessContext,
    action: AuditAction,
    note_id: Uuid,
    patient_id: Uuid,
) -> NewAuditEntry {
    NewAuditEntry {
        user_id: Some(ctx.user_id),
        action,
        table_name: NOTES_TABLE.to_string(),
        record_id: Some(note_id),
        old_values: None,
        new_values: None,
        changed_fields: None,
        session_id: ctx.session_id.clone(),
        patient_id: Some(patient_id),
    }
}

pub(crate) fn record<S: NoteStore + ?Sized>(store: &S, entry: NewAuditEntry) {
    if let Err(e) = store.insert_audit_entry(&entry) {
        tracing::warn!(
            action = %entry.action,
            record_id = ?entry.record_id,
            error = %e,
            "Audit write failed; charting operation kept"
        );
    }
}

/// JSON snapshot for an audit column. Serialization failure drops the snapshot.
pub(crate) fn snapshot<T: Serialize + ?Sized>(value: &T) -> Option<Value> {
    match serde_json::to_value(value) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(error = %e, "Audit snapshot serialization failed");
            None
        }
    }
}
