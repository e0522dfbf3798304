use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::appointment::Appointment;
use super::content::{Addendum, Assessment, Objective, Plan, Subjective};
use super::enums::Specialty;
use super::findings::{PhysicalExam, ReviewOfSystems};
use super::patient::{Patient, PatientSummary};
use super::profile::{Profile, ProviderSummary};

/// A SOAP clinical note as stored in `clinical_notes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalNote {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub provider_id: Uuid,
    pub appointment_id: Option<Uuid>,
    pub specialty: Specialty,
    pub subjective: Subjective,
    pub objective: Objective,
    pub assessment: Assessment,
    pub plan: Plan,
    pub is_signed: bool,
    pub signed_at: Option<DateTime<Utc>>,
    pub is_locked: bool,
    pub locked_at: Option<DateTime<Utc>>,
    pub addendums: Vec<Addendum>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lifecycle state derived from the persisted flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteState {
    /// Unsigned and unlocked; the only mutable state.
    Draft,
    /// Signed and locked; only addendums may be appended.
    SignedLocked,
}

impl ClinicalNote {
    pub fn state(&self) -> NoteState {
        if self.is_signed || self.is_locked {
            NoteState::SignedLocked
        } else {
            NoteState::Draft
        }
    }
}

/// Input for `create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNoteInput {
    pub patient_id: Uuid,
    pub provider_id: Uuid,
    pub specialty: Specialty,
    #[serde(default)]
    pub appointment_id: Option<Uuid>,
    #[serde(default)]
    pub subjective: Option<Subjective>,
    #[serde(default)]
    pub objective: Option<Objective>,
    #[serde(default)]
    pub assessment: Option<Assessment>,
    #[serde(default)]
    pub plan: Option<Plan>,
}

impl CreateNoteInput {
    pub fn new(patient_id: Uuid, provider_id: Uuid, specialty: Specialty) -> Self {
        Self {
            patient_id,
            provider_id,
            specialty,
            appointment_id: None,
            subjective: None,
            objective: None,
            assessment: None,
            plan: None,
        }
    }
}

/// Partial update of a draft note.
///
/// Content blocks are replaced whole. Patient, provider, lock flags and
/// addendums are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<Specialty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subjective: Option<Subjective>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<Objective>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment: Option<Assessment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_signed: Option<bool>,
}

impl NotePatch {
    /// A patch that only signs the note.
    pub fn sign() -> Self {
        Self {
            is_signed: Some(true),
            ..Default::default()
        }
    }

    pub fn signs(&self) -> bool {
        self.is_signed == Some(true)
    }

    /// Names of the fields this patch carries.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.specialty.is_some() {
            fields.push("specialty");
        }
        if self.appointment_id.is_some() {
            fields.push("appointment_id");
        }
        if self.subjective.is_some() {
            fields.push("subjective");
        }
        if self.objective.is_some() {
            fields.push("objective");
        }
        if self.assessment.is_some() {
            fields.push("assessment");
        }
        if self.plan.is_some() {
            fields.push("plan");
        }
        if self.is_signed.is_some() {
            fields.push("is_signed");
        }
        fields
    }

    /// Merge the patch into `note`. Lock flags and timestamps are left to the caller.
    ///
    /// A specialty change resets the review of systems and physical exam to the
    /// empty shape of the new specialty, unless the patch carries replacement blocks.
    pub fn apply_to(&self, note: &mut ClinicalNote) {
        if let Some(specialty) = self.specialty {
            if specialty != note.specialty {
                note.specialty = specialty;
                note.subjective.review_of_systems = Some(ReviewOfSystems::empty(specialty));
                note.objective.physical_exam = Some(PhysicalExam::empty(specialty));
            }
        }
        if let Some(appointment_id) = self.appointment_id {
            note.appointment_id = Some(appointment_id);
        }
        if let Some(subjective) = &self.subjective {
            note.subjective = subjective.clone();
        }
        if let Some(objective) = &self.objective {
            note.objective = objective.clone();
        }
        if let Some(assessment) = &self.assessment {
            note.assessment = assessment.clone();
        }
        if let Some(plan) = &self.plan {
            note.plan = plan.clone();
        }
        if let Some(is_signed) = self.is_signed {
            note.is_signed = is_signed;
        }
    }
}

/// Note with full patient, provider and appointment detail (single-record read).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteDetail {
    pub note: ClinicalNote,
    pub patient: Option<Patient>,
    pub provider: Option<Profile>,
    pub appointment: Option<Appointment>,
}

/// Note with summary patient/provider fields (list views).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteListItem {
    pub note: ClinicalNote,
    pub patient: Option<PatientSummary>,
    pub provider: Option<ProviderSummary>,
}
