use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use super::audit::{note_entry, record, snapshot};
use super::context::AccessContext;
use super::store::NoteStore;
use super::validation;
use super::ChartingError;
use crate::models::enums::AuditAction;
use crate::models::*;

/// Mediates every read and write of clinical notes.
///
/// A note moves from draft to signed+locked exactly once; after that only
/// `add_addendum` may change it. Each single-record operation writes one
/// audit entry on a best-effort basis.
pub struct NoteLifecycleManager<S> {
    store: S,
}

impl<S: NoteStore> NoteLifecycleManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a draft note. Patient and provider must exist in the store.
    pub fn create(&self, ctx: &AccessContext, input: &CreateNoteInput) -> Result<ClinicalNote, ChartingError> {
        validation::validate_context(ctx)?;
        validation::validate_create(input)?;

        let note = self.store.insert_note(input)?;
        tracing::info!(note_id = %note.id, user_id = %ctx.user_id, "Clinical note created");

        let mut entry = note_entry(ctx, AuditAction::Create, note.id, note.patient_id);
        entry.new_values = snapshot(input);
        record(&self.store, entry);

        Ok(note)
    }

    /// Notes newest first. Listing is not audited; only single-record reads are.
    pub fn list(&self, ctx: &AccessContext, filter: &NoteFilter) -> Result<Vec<NoteListItem>, ChartingError> {
        validation::validate_context(ctx)?;
        validation::validate_filter(filter)?;
        Ok(self.store.list_notes(filter)?)
    }

    /// One note with full patient, provider and appointment detail. Audited as a PHI read.
    pub fn get_by_id(&self, ctx: &AccessContext, id: &Uuid) -> Result<NoteDetail, ChartingError> {
        validation::validate_context(ctx)?;
        let detail = self
            .store
            .find_note_detail(id)?
            .ok_or(ChartingError::NotFound(*id))?;

        record(
            &self.store,
            note_entry(ctx, AuditAction::Read, detail.note.id, detail.note.patient_id),
        );
        Ok(detail)
    }

    /// The note charted for an appointment. `None` means the visit is not charted yet.
    pub fn get_by_appointment_id(
        &self,
        ctx: &AccessContext,
        appointment_id: &Uuid,
    ) -> Result<Option<ClinicalNote>, ChartingError> {
        validation::validate_context(ctx)?;
        Ok(self.store.find_note_by_appointment(appointment_id)?)
    }

    /// Patch a draft note. A patch with `is_signed = true` also locks the note
    /// and stamps `signed_at`/`locked_at` in the same write.
    pub fn update(&self, ctx: &AccessContext, id: &Uuid, patch: &NotePatch) -> Result<ClinicalNote, ChartingError> {
        validation::validate_context(ctx)?;
        let current = self.store.find_note(id)?.ok_or(ChartingError::NotFound(*id))?;
        if current.is_locked {
            return Err(ChartingError::Locked(*id));
        }

        let now = Utc::now();
        let mut next = current.clone();
        patch.apply_to(&mut next);
        if patch.signs() {
            next.is_signed = true;
            next.is_locked = true;
            next.signed_at = Some(now);
            next.locked_at = Some(now);
        }
        next.updated_at = now;
        validation::validate_note(&next)?;

        let updated = match self.store.update_unlocked_note(&next)? {
            Some(note) => note,
            None => return Err(self.lost_write(id)?),
        };
        if patch.signs() {
            tracing::info!(note_id = %updated.id, user_id = %ctx.user_id, "Clinical note signed and locked");
        } else {
            tracing::debug!(note_id = %updated.id, "Clinical note draft updated");
        }

        let mut entry = note_entry(ctx, AuditAction::Update, updated.id, updated.patient_id);
        entry.old_values = Some(lock_snapshot(&current));
        entry.new_values = applied_patch(patch, &updated);
        entry.changed_fields = Some(patch.changed_fields().into_iter().map(String::from).collect());
        record(&self.store, entry);

        Ok(updated)
    }

    /// Append an addendum. Allowed in every state; the only change a locked note accepts.
    pub fn add_addendum(
        &self,
        ctx: &AccessContext,
        note_id: &Uuid,
        author_id: &Uuid,
        text: &str,
    ) -> Result<ClinicalNote, ChartingError> {
        validation::validate_context(ctx)?;
        validation::validate_addendum(author_id, text)?;
        let current = self
            .store
            .find_note(note_id)?
            .ok_or(ChartingError::NotFound(*note_id))?;

        let now = Utc::now();
        let mut addendums = current.addendums.clone();
        addendums.push(Addendum {
            text: text.to_string(),
            added_by: *author_id,
            added_at: now,
        });

        let updated = self
            .store
            .replace_addendums(note_id, current.addendums.len(), &addendums, now)?;
        let updated = match updated {
            Some(note) => note,
            None if self.store.find_note(note_id)?.is_some() => {
                return Err(ChartingError::ConcurrentModification(*note_id));
            }
            None => return Err(ChartingError::NotFound(*note_id)),
        };
        tracing::info!(
            note_id = %updated.id,
            user_id = %ctx.user_id,
            count = updated.addendums.len(),
            "Addendum appended"
        );

        let mut entry = note_entry(ctx, AuditAction::Update, updated.id, updated.patient_id);
        entry.old_values = Some(json!({ "addendums": snapshot(&current.addendums) }));
        entry.new_values = Some(json!({ "addendums": snapshot(&updated.addendums) }));
        entry.changed_fields = Some(vec!["addendums".to_string()]);
        record(&self.store, entry);

        Ok(updated)
    }

    /// Hard-delete a draft. Signed or locked notes are kept; use an addendum instead.
    pub fn delete(&self, ctx: &AccessContext, id: &Uuid) -> Result<(), ChartingError> {
        validation::validate_context(ctx)?;
        let current = self.store.find_note(id)?.ok_or(ChartingError::NotFound(*id))?;
        if current.is_signed || current.is_locked {
            return Err(ChartingError::Locked(*id));
        }

        if !self.store.delete_draft_note(id)? {
            return Err(self.lost_write(id)?);
        }
        tracing::info!(note_id = %id, user_id = %ctx.user_id, "Clinical note deleted");

        let mut entry = note_entry(ctx, AuditAction::Delete, current.id, current.patient_id);
        entry.old_values = snapshot(&current);
        record(&self.store, entry);

        Ok(())
    }

    /// Why a conditional write matched no row: the note is gone or was locked meanwhile.
    fn lost_write(&self, id: &Uuid) -> Result<ChartingError, ChartingError> {
        Ok(match self.store.find_note(id)? {
            Some(_) => ChartingError::Locked(*id),
            None => ChartingError::NotFound(*id),
        })
    }
}

fn lock_snapshot(note: &ClinicalNote) -> Value {
    json!({
        "is_signed": note.is_signed,
        "is_locked": note.is_locked,
        "signed_at": note.signed_at,
        "locked_at": note.locked_at,
    })
}

/// The patch as applied, with the sign stamps when it signed the note.
fn applied_patch(patch: &NotePatch, updated: &ClinicalNote) -> Option<Value> {
    let mut value = snapshot(patch)?;
    if patch.signs() {
        if let Value::Object(map) = &mut value {
            map.insert("is_locked".into(), json!(updated.is_locked));
            map.insert("signed_at".into(), json!(updated.signed_at));
            map.insert("locked_at".into(), json!(updated.locked_at));
        }
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use rusqlite::{params, Connection};

    use super::*;
    use crate::charting::SqliteNoteStore;
    use crate::db::repository::fixtures::{seed, Seeded};
    use crate::db::sqlite::open_memory_database;
    use crate::db::{count_audit_entries_for_record, get_note, query_audit_entries};
    use crate::models::enums::Specialty;

    fn manager(conn: &Connection) -> NoteLifecycleManager<SqliteNoteStore<'_>> {
        NoteLifecycleManager::new(SqliteNoteStore::new(conn))
    }

    fn ctx(seeded: &Seeded) -> AccessContext {
        AccessContext::new(seeded.provider.id).with_session("session-1")
    }

    fn audits(conn: &Connection, id: &Uuid) -> Vec<AuditEntry> {
        query_audit_entries(conn, &AuditFilter {
            record_id: Some(*id),
            ..Default::default()
        })
        .unwrap()
    }

    fn chest_pain_input(seeded: &Seeded) -> CreateNoteInput {
        CreateNoteInput {
            subjective: Some(Subjective {
                chief_complaint: Some("Chest pain".into()),
                ..Default::default()
            }),
            ..CreateNoteInput::new(seeded.patient.id, seeded.provider.id, Specialty::Cardiology)
        }
    }

    fn signed_note(conn: &Connection, seeded: &Seeded) -> ClinicalNote {
        let m = manager(conn);
        let note = m.create(&ctx(seeded), &chest_pain_input(seeded)).unwrap();
        m.update(&ctx(seeded), &note.id, &NotePatch::sign()).unwrap()
    }

    #[test]
    fn scenario_draft_to_signed_then_locked() {
        let conn = open_memory_database().unwrap();
        let seeded = seed(&conn);
        let m = manager(&conn);
        let ctx = ctx(&seeded);

        let note = m.create(&ctx, &chest_pain_input(&seeded)).unwrap();
        assert_eq!(note.state(), NoteState::Draft);

        let with_dx = m
            .update(&ctx, &note.id, &NotePatch {
                assessment: Some(Assessment {
                    diagnoses: vec![Diagnosis {
                        code: "I20.9".into(),
                        description: "Angina pectoris".into(),
                        is_primary: true,
                    }],
                    ..Default::default()
                }),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(with_dx.assessment.diagnoses.len(), 1);
        assert!(!with_dx.is_locked);

        let signed = m.update(&ctx, &note.id, &NotePatch::sign()).unwrap();
        assert!(signed.is_signed);
        assert!(signed.is_locked);
        assert!(signed.signed_at.is_some());
        assert_eq!(signed.signed_at, signed.locked_at);
        assert_eq!(signed.assessment.diagnoses.len(), 1);

        let err = m
            .update(&ctx, &note.id, &NotePatch {
                subjective: Some(Subjective {
                    chief_complaint: Some("x".into()),
                    ..Default::default()
                }),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, ChartingError::Locked(id) if id == note.id));
    }

    #[test]
    fn scenario_addendum_on_locked_note_then_delete_fails() {
        let conn = open_memory_database().unwrap();
        let seeded = seed(&conn);
        let m = manager(&conn);
        let note = signed_note(&conn, &seeded);
        assert!(note.addendums.is_empty());

        let updated = m
            .add_addendum(&ctx(&seeded), &note.id, &seeded.provider.id, "late correction")
            .unwrap();
        assert_eq!(updated.addendums.len(), 1);
        assert_eq!(updated.addendums[0].text, "late correction");
        assert_eq!(updated.addendums[0].added_by, seeded.provider.id);
        assert!(updated.is_locked);

        let err = m.delete(&ctx(&seeded), &note.id).unwrap_err();
        assert!(matches!(err, ChartingError::Locked(_)));
        assert_eq!(err.code(), "LOCKED");
    }

    #[test]
    fn scenario_delete_draft_then_not_found() {
        let conn = open_memory_database().unwrap();
        let seeded = seed(&conn);
        let m = manager(&conn);
        let note = m.create(&ctx(&seeded), &chest_pain_input(&seeded)).unwrap();

        m.delete(&ctx(&seeded), &note.id).unwrap();
        assert!(get_note(&conn, &note.id).unwrap().is_none());

        let err = m.get_by_id(&ctx(&seeded), &note.id).unwrap_err();
        assert!(matches!(err, ChartingError::NotFound(_)));
    }

    #[test]
    fn scenario_lookup_by_appointment() {
        let conn = open_memory_database().unwrap();
        let seeded = seed(&conn);
        let m = manager(&conn);
        let ctx = ctx(&seeded);

        assert!(m.get_by_appointment_id(&ctx, &seeded.appointment.id).unwrap().is_none());

        let input = CreateNoteInput {
            appointment_id: Some(seeded.appointment.id),
            ..chest_pain_input(&seeded)
        };
        let note = m.create(&ctx, &input).unwrap();

        let first = m.get_by_appointment_id(&ctx, &seeded.appointment.id).unwrap();
        let second = m.get_by_appointment_id(&ctx, &seeded.appointment.id).unwrap();
        assert_eq!(first.as_ref().map(|n| n.id), Some(note.id));
        assert_eq!(first, second);

        // Only the create is audited; appointment lookups are not.
        assert_eq!(audits(&conn, &note.id).len(), 1);
    }

    #[test]
    fn one_audit_per_operation_with_matching_action() {
        let conn = open_memory_database().unwrap();
        let seeded = seed(&conn);
        let m = manager(&conn);
        let ctx = ctx(&seeded);

        let note = m.create(&ctx, &chest_pain_input(&seeded)).unwrap();
        m.get_by_id(&ctx, &note.id).unwrap();
        m.update(&ctx, &note.id, &NotePatch::sign()).unwrap();
        m.add_addendum(&ctx, &note.id, &seeded.provider.id, "late correction").unwrap();
        m.list(&ctx, &NoteFilter::default()).unwrap();

        let actions: Vec<AuditAction> = audits(&conn, &note.id).iter().map(|e| e.action).collect();
        assert_eq!(
            actions,
            vec![AuditAction::Create, AuditAction::Read, AuditAction::Update, AuditAction::Update]
        );

        let draft = m.create(&ctx, &chest_pain_input(&seeded)).unwrap();
        m.delete(&ctx, &draft.id).unwrap();
        let actions: Vec<AuditAction> = audits(&conn, &draft.id).iter().map(|e| e.action).collect();
        assert_eq!(actions, vec![AuditAction::Create, AuditAction::Delete]);
    }

    #[test]
    fn audit_records_carry_context_and_snapshots() {
        let conn = open_memory_database().unwrap();
        let seeded = seed(&conn);
        let m = manager(&conn);
        let ctx = ctx(&seeded);

        let note = m.create(&ctx, &chest_pain_input(&seeded)).unwrap();
        m.update(&ctx, &note.id, &NotePatch::sign()).unwrap();

        let entries = audits(&conn, &note.id);
        let create = &entries[0];
        assert_eq!(create.user_id, Some(seeded.provider.id));
        assert_eq!(create.session_id.as_deref(), Some("session-1"));
        assert_eq!(create.patient_id, Some(seeded.patient.id));
        assert_eq!(
            create.new_values.as_ref().unwrap()["subjective"]["chief_complaint"],
            "Chest pain"
        );

        let update = &entries[1];
        let old = update.old_values.as_ref().unwrap();
        assert_eq!(old["is_signed"], false);
        assert_eq!(old["is_locked"], false);
        assert!(old["signed_at"].is_null());
        let new = update.new_values.as_ref().unwrap();
        assert_eq!(new["is_signed"], true);
        assert_eq!(new["is_locked"], true);
        assert!(new["signed_at"].is_string());
        assert_eq!(update.changed_fields, Some(vec!["is_signed".to_string()]));
    }

    #[test]
    fn addendum_audit_is_scoped_to_addendums() {
        let conn = open_memory_database().unwrap();
        let seeded = seed(&conn);
        let m = manager(&conn);
        let note = signed_note(&conn, &seeded);
        m.add_addendum(&ctx(&seeded), &note.id, &seeded.provider.id, "first").unwrap();
        m.add_addendum(&ctx(&seeded), &note.id, &seeded.provider.id, "second").unwrap();

        let entries = audits(&conn, &note.id);
        let last = entries.last().unwrap();
        assert_eq!(last.changed_fields, Some(vec!["addendums".to_string()]));
        assert_eq!(last.old_values.as_ref().unwrap()["addendums"].as_array().unwrap().len(), 1);
        assert_eq!(last.new_values.as_ref().unwrap()["addendums"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn delete_audit_holds_full_snapshot() {
        let conn = open_memory_database().unwrap();
        let seeded = seed(&conn);
        let m = manager(&conn);
        let note = m.create(&ctx(&seeded), &chest_pain_input(&seeded)).unwrap();
        m.delete(&ctx(&seeded), &note.id).unwrap();

        let entries = audits(&conn, &note.id);
        let snapshot: ClinicalNote =
            serde_json::from_value(entries[1].old_values.clone().unwrap()).unwrap();
        assert_eq!(snapshot, note);
    }

    #[test]
    fn locked_note_unchanged_after_rejected_writes() {
        let conn = open_memory_database().unwrap();
        let seeded = seed(&conn);
        let m = manager(&conn);
        let note = signed_note(&conn, &seeded);
        let before = get_note(&conn, &note.id).unwrap().unwrap();
        let audit_count = count_audit_entries_for_record(&conn, "clinical_notes", &note.id).unwrap();

        let patch = NotePatch {
            is_signed: Some(false),
            plan: Some(Plan::default()),
            ..Default::default()
        };
        assert!(matches!(m.update(&ctx(&seeded), &note.id, &patch), Err(ChartingError::Locked(_))));
        assert!(matches!(m.delete(&ctx(&seeded), &note.id), Err(ChartingError::Locked(_))));

        assert_eq!(get_note(&conn, &note.id).unwrap().unwrap(), before);
        assert_eq!(
            count_audit_entries_for_record(&conn, "clinical_notes", &note.id).unwrap(),
            audit_count
        );
    }

    #[test]
    fn addendums_are_monotonic() {
        let conn = open_memory_database().unwrap();
        let seeded = seed(&conn);
        let m = manager(&conn);
        let note = signed_note(&conn, &seeded);

        let mut previous: Vec<Addendum> = Vec::new();
        for text in ["one", "two", "three"] {
            let updated = m
                .add_addendum(&ctx(&seeded), &note.id, &seeded.provider.id, text)
                .unwrap();
            assert_eq!(updated.addendums.len(), previous.len() + 1);
            assert_eq!(&updated.addendums[..previous.len()], previous.as_slice());
            previous = updated.addendums;
        }
    }

    #[test]
    fn sign_stamps_fixed_after_addendum_and_resign() {
        let conn = open_memory_database().unwrap();
        let seeded = seed(&conn);
        let m = manager(&conn);
        let signed = signed_note(&conn, &seeded);
        assert!(signed.signed_at.is_some());

        let with_addendum = m
            .add_addendum(&ctx(&seeded), &signed.id, &seeded.provider.id, "late correction")
            .unwrap();
        assert!(with_addendum.is_signed);
        assert_eq!(with_addendum.signed_at, signed.signed_at);
        assert_eq!(with_addendum.locked_at, signed.locked_at);

        let err = m.update(&ctx(&seeded), &signed.id, &NotePatch::sign()).unwrap_err();
        assert!(matches!(err, ChartingError::Locked(_)));

        let stored = get_note(&conn, &signed.id).unwrap().unwrap();
        assert_eq!(stored, with_addendum);
        assert!(stored.is_signed);
        assert_eq!(stored.signed_at, signed.signed_at);
        assert_eq!(stored.locked_at, signed.locked_at);
    }

    #[test]
    fn addendum_allowed_on_draft() {
        let conn = open_memory_database().unwrap();
        let seeded = seed(&conn);
        let m = manager(&conn);
        let note = m.create(&ctx(&seeded), &chest_pain_input(&seeded)).unwrap();
        let updated = m
            .add_addendum(&ctx(&seeded), &note.id, &seeded.provider.id, "pre-sign remark")
            .unwrap();
        assert_eq!(updated.addendums.len(), 1);
        assert!(!updated.is_locked);
    }

    #[test]
    fn missing_note_is_not_found() {
        let conn = open_memory_database().unwrap();
        let seeded = seed(&conn);
        let m = manager(&conn);
        let missing = Uuid::new_v4();

        assert!(matches!(
            m.update(&ctx(&seeded), &missing, &NotePatch::sign()),
            Err(ChartingError::NotFound(_))
        ));
        assert!(matches!(
            m.add_addendum(&ctx(&seeded), &missing, &seeded.provider.id, "x"),
            Err(ChartingError::NotFound(_))
        ));
        assert!(matches!(m.delete(&ctx(&seeded), &missing), Err(ChartingError::NotFound(_))));
    }

    #[test]
    fn audit_failure_does_not_fail_operation() {
        let conn = open_memory_database().unwrap();
        let seeded = seed(&conn);
        conn.execute_batch("DROP TABLE audit_logs;").unwrap();
        let m = manager(&conn);

        let note = m.create(&ctx(&seeded), &chest_pain_input(&seeded)).unwrap();
        m.get_by_id(&ctx(&seeded), &note.id).unwrap();
        let signed = m.update(&ctx(&seeded), &note.id, &NotePatch::sign()).unwrap();
        assert!(signed.is_locked);
        m.add_addendum(&ctx(&seeded), &note.id, &seeded.provider.id, "still works").unwrap();
    }

    #[test]
    fn invalid_input_rejected_before_any_write() {
        let conn = open_memory_database().unwrap();
        let seeded = seed(&conn);
        let m = manager(&conn);

        let input = CreateNoteInput {
            subjective: Some(Subjective {
                review_of_systems: Some(ReviewOfSystems::empty(Specialty::Pediatrics)),
                ..Default::default()
            }),
            ..chest_pain_input(&seeded)
        };
        let err = m.create(&ctx(&seeded), &input).unwrap_err();
        assert_eq!(err.code(), "VALIDATION");
        assert!(m.list(&ctx(&seeded), &NoteFilter::default()).unwrap().is_empty());

        let note = m.create(&ctx(&seeded), &chest_pain_input(&seeded)).unwrap();
        let patch = NotePatch {
            objective: Some(Objective {
                physical_exam: Some(PhysicalExam::empty(Specialty::General)),
                ..Default::default()
            }),
            is_signed: Some(true),
            ..Default::default()
        };
        assert!(matches!(m.update(&ctx(&seeded), &note.id, &patch), Err(ChartingError::Validation(_))));
        assert_eq!(get_note(&conn, &note.id).unwrap().unwrap(), note);

        let err = m.add_addendum(&ctx(&seeded), &note.id, &seeded.provider.id, " ").unwrap_err();
        assert!(matches!(err, ChartingError::Validation(_)));
    }

    #[test]
    fn unknown_patient_surfaces_store_failure() {
        let conn = open_memory_database().unwrap();
        let seeded = seed(&conn);
        let m = manager(&conn);
        let input = CreateNoteInput::new(Uuid::new_v4(), seeded.provider.id, Specialty::General);
        let err = m.create(&ctx(&seeded), &input).unwrap_err();
        assert_eq!(err.code(), "STORE_FAILURE");
    }

    #[test]
    fn specialty_change_resets_findings_on_draft() {
        let conn = open_memory_database().unwrap();
        let seeded = seed(&conn);
        let m = manager(&conn);
        let input = CreateNoteInput {
            subjective: Some(Subjective {
                review_of_systems: Some(ReviewOfSystems::empty(Specialty::Cardiology)),
                ..Default::default()
            }),
            ..chest_pain_input(&seeded)
        };
        let note = m.create(&ctx(&seeded), &input).unwrap();

        let updated = m
            .update(&ctx(&seeded), &note.id, &NotePatch {
                specialty: Some(Specialty::General),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(updated.specialty, Specialty::General);
        assert_eq!(
            updated.subjective.review_of_systems,
            Some(ReviewOfSystems::empty(Specialty::General))
        );
    }

    #[test]
    fn lost_lock_race_reports_locked() {
        let conn = open_memory_database().unwrap();
        let seeded = seed(&conn);
        let m = manager(&conn);
        let note = m.create(&ctx(&seeded), &chest_pain_input(&seeded)).unwrap();

        // Another writer signs between our read and our write.
        let now = Utc::now();
        conn.execute(
            "UPDATE clinical_notes SET is_signed = 1, is_locked = 1, signed_at = ?2, locked_at = ?2
             WHERE id = ?1",
            params![note.id.to_string(), now],
        )
        .unwrap();
        let mut stale = note.clone();
        stale.plan.treatment_plan = Some("overwrite".into());
        assert!(m.store().update_unlocked_note(&stale).unwrap().is_none());
        assert!(matches!(m.lost_write(&note.id), Ok(ChartingError::Locked(_))));
    }

    #[test]
    fn stale_addendum_write_is_conflict() {
        let conn = open_memory_database().unwrap();
        let seeded = seed(&conn);
        let m = manager(&conn);
        let note = signed_note(&conn, &seeded);
        m.add_addendum(&ctx(&seeded), &note.id, &seeded.provider.id, "first").unwrap();

        // A writer still holding the pre-append snapshot.
        let lost = m
            .store()
            .replace_addendums(&note.id, 0, &[], Utc::now())
            .unwrap();
        assert!(lost.is_none());
        assert_eq!(get_note(&conn, &note.id).unwrap().unwrap().addendums.len(), 1);
    }

    #[test]
    fn list_rejects_zero_limit_and_pages() {
        let conn = open_memory_database().unwrap();
        let seeded = seed(&conn);
        let m = manager(&conn);
        for _ in 0..3 {
            m.create(&ctx(&seeded), &chest_pain_input(&seeded)).unwrap();
        }

        let err = m
            .list(&ctx(&seeded), &NoteFilter { limit: Some(0), ..Default::default() })
            .unwrap_err();
        assert!(matches!(err, ChartingError::Validation(_)));

        let page = m
            .list(&ctx(&seeded), &NoteFilter { limit: Some(2), ..Default::default() })
            .unwrap();
        assert_eq!(page.len(), 2);
        assert!(page[0].patient.is_some());
        assert!(page[0].provider.is_some());
    }
}
