//! Input checks run before any store write.

use uuid::Uuid;

use super::context::AccessContext;
use super::ChartingError;
use crate::models::enums::Specialty;
use crate::models::*;

fn invalid(msg: impl Into<String>) -> ChartingError {
    ChartingError::Validation(msg.into())
}

fn require_id(id: &Uuid, field: &str) -> Result<(), ChartingError> {
    if id.is_nil() {
        return Err(invalid(format!("{field} is required")));
    }
    Ok(())
}

pub fn validate_context(ctx: &AccessContext) -> Result<(), ChartingError> {
    require_id(&ctx.user_id, "user_id")
}

pub fn validate_create(input: &CreateNoteInput) -> Result<(), ChartingError> {
    require_id(&input.patient_id, "patient_id")?;
    require_id(&input.provider_id, "provider_id")?;
    if let Some(appointment_id) = &input.appointment_id {
        require_id(appointment_id, "appointment_id")?;
    }
    if let Some(subjective) = &input.subjective {
        validate_subjective(input.specialty, subjective)?;
    }
    if let Some(objective) = &input.objective {
        validate_objective(input.specialty, objective)?;
    }
    if let Some(assessment) = &input.assessment {
        validate_assessment(assessment)?;
    }
    if let Some(plan) = &input.plan {
        validate_plan(plan)?;
    }
    Ok(())
}

/// Check a note as it would be written after a patch is merged.
pub fn validate_note(note: &ClinicalNote) -> Result<(), ChartingError> {
    if let Some(appointment_id) = &note.appointment_id {
        require_id(appointment_id, "appointment_id")?;
    }
    validate_subjective(note.specialty, &note.subjective)?;
    validate_objective(note.specialty, &note.objective)?;
    validate_assessment(&note.assessment)?;
    validate_plan(&note.plan)
}

pub fn validate_subjective(specialty: Specialty, subjective: &Subjective) -> Result<(), ChartingError> {
    if let Some(ros) = &subjective.review_of_systems {
        if ros.specialty() != specialty {
            return Err(invalid(format!(
                "review of systems is for {}, note specialty is {specialty}",
                ros.specialty()
            )));
        }
    }
    subjective.current_medications.iter().try_for_each(validate_prescription)
}

pub fn validate_objective(specialty: Specialty, objective: &Objective) -> Result<(), ChartingError> {
    for (name, value) in objective.vital_signs.recorded() {
        if !value.is_finite() || value < 0.0 {
            return Err(invalid(format!("vital sign {name} must be a non-negative number")));
        }
    }

    match &objective.physical_exam {
        Some(exam) if exam.specialty() != specialty => Err(invalid(format!(
            "physical exam is for {}, note specialty is {specialty}",
            exam.specialty()
        ))),
        Some(PhysicalExam::Pediatrics(exam)) => {
            for (name, value) in exam.percentiles() {
                if let Some(v) = value {
                    if !(0.0..=100.0).contains(&v) {
                        return Err(invalid(format!("{name} must be between 0 and 100")));
                    }
                }
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

pub fn validate_assessment(assessment: &Assessment) -> Result<(), ChartingError> {
    for diagnosis in &assessment.diagnoses {
        if diagnosis.code.trim().is_empty() || diagnosis.description.trim().is_empty() {
            return Err(invalid("diagnosis requires a code and a description"));
        }
    }
    if assessment.diagnoses.iter().filter(|d| d.is_primary).count() > 1 {
        return Err(invalid("at most one diagnosis may be primary"));
    }
    Ok(())
}

pub fn validate_plan(plan: &Plan) -> Result<(), ChartingError> {
    plan.prescriptions.iter().try_for_each(validate_prescription)?;
    if plan.referrals.iter().any(|r| r.reason.trim().is_empty()) {
        return Err(invalid("referral requires a reason"));
    }
    Ok(())
}

fn validate_prescription(prescription: &Prescription) -> Result<(), ChartingError> {
    if prescription.medication.trim().is_empty() {
        return Err(invalid("prescription requires a medication"));
    }
    Ok(())
}

pub fn validate_addendum(author_id: &Uuid, text: &str) -> Result<(), ChartingError> {
    require_id(author_id, "author_id")?;
    if text.trim().is_empty() {
        return Err(invalid("addendum text is required"));
    }
    Ok(())
}

pub fn validate_filter(filter: &NoteFilter) -> Result<(), ChartingError> {
    if filter.limit == Some(0) {
        return Err(invalid("limit must be greater than zero"));
    }
    Ok(())
}
