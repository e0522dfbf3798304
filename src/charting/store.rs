use chrono::{DateTime, Utc};
use rusqlite::Connection;
use uuid::Uuid;

use crate::db::{self, DatabaseError};
use crate::models::*;

/// Persistence collaborator of the lifecycle manager.
///
/// Conditional writes report a lost precondition as `Ok(None)` / `Ok(false)`
/// rather than an error; the manager decides what that means.
pub trait NoteStore {
    fn insert_note(&self, input: &CreateNoteInput) -> Result<ClinicalNote, DatabaseError>;
    fn find_note(&self, id: &Uuid) -> Result<Option<ClinicalNote>, DatabaseError>;
    fn find_note_detail(&self, id: &Uuid) -> Result<Option<NoteDetail>, DatabaseError>;
    fn find_note_by_appointment(&self, appointment_id: &Uuid) -> Result<Option<ClinicalNote>, DatabaseError>;
    fn list_notes(&self, filter: &NoteFilter) -> Result<Vec<NoteListItem>, DatabaseError>;

    /// Write `note` only if the stored row is still unlocked.
    fn update_unlocked_note(&self, note: &ClinicalNote) -> Result<Option<ClinicalNote>, DatabaseError>;

    /// Replace the addendum sequence only if it still has `expected_len` entries.
    fn replace_addendums(
        &self,
        id: &Uuid,
        expected_len: usize,
        addendums: &[Addendum],
        updated_at: DateTime<Utc>,
    ) -> Result<Option<ClinicalNote>, DatabaseError>;

    /// Delete only if neither signed nor locked.
    fn delete_draft_note(&self, id: &Uuid) -> Result<bool, DatabaseError>;

    fn insert_audit_entry(&self, entry: &NewAuditEntry) -> Result<AuditEntry, DatabaseError>;
}

/// `NoteStore` over a borrowed SQLite connection.
pub struct SqliteNoteStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteNoteStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl NoteStore for SqliteNoteStore<'_> {
    fn insert_note(&self, input: &CreateNoteInput) -> Result<ClinicalNote, DatabaseError> {
        db::insert_note(self.conn, input)
    }

    fn find_note(&self, id: &Uuid) -> Result<Option<ClinicalNote>, DatabaseError> {
        db::get_note(self.conn, id)
    }

    fn find_note_detail(&self, id: &Uuid) -> Result<Option<NoteDetail>, DatabaseError> {
        db::get_note_detail(self.conn, id)
    }

    fn find_note_by_appointment(&self, appointment_id: &Uuid) -> Result<Option<ClinicalNote>, DatabaseError> {
        db::get_note_by_appointment(self.conn, appointment_id)
    }

    fn list_notes(&self, filter: &NoteFilter) -> Result<Vec<NoteListItem>, DatabaseError> {
        db::list_notes(self.conn, filter)
    }

    fn update_unlocked_note(&self, note: &ClinicalNote) -> Result<Option<ClinicalNote>, DatabaseError> {
        db::update_unlocked_note(self.conn, note)
    }

    fn replace_addendums(
        &self,
        id: &Uuid,
        expected_len: usize,
        addendums: &[Addendum],
        updated_at: DateTime<Utc>,
    ) -> Result<Option<ClinicalNote>, DatabaseError> {
        db::replace_addendums(self.conn, id, expected_len, addendums, updated_at)
    }

    fn delete_draft_note(&self, id: &Uuid) -> Result<bool, DatabaseError> {
        db::delete_draft_note(self.conn, id)
    }

    fn insert_audit_entry(&self, entry: &NewAuditEntry) -> Result<AuditEntry, DatabaseError> {
        db::insert_audit_entry(self.conn, entry)
    }
}
