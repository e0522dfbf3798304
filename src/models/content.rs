use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{ReferralUrgency, Specialty};
use super::findings::{OpenFindings, PhysicalExam, ReviewOfSystems};

/// Subjective block: what the patient reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subjective {
    pub chief_complaint: Option<String>,
    pub history_of_present_illness: Option<String>,
    pub past_medical_history: Option<String>,
    pub family_history: Option<String>,
    pub social_history: Option<String>,
    pub allergies: Vec<String>,
    pub current_medications: Vec<Prescription>,
    pub review_of_systems: Option<ReviewOfSystems>,
}

/// Objective block: what the clinician measures and observes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Objective {
    pub vital_signs: VitalSigns,
    pub physical_exam: Option<PhysicalExam>,
    pub lab_results: OpenFindings,
    pub imaging_results: Option<String>,
}

/// Assessment block: the clinician's impression and diagnoses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assessment {
    pub clinical_impression: Option<String>,
    pub diagnoses: Vec<Diagnosis>,
    pub differential_diagnoses: Vec<String>,
}

impl Assessment {
    pub fn primary_diagnosis(&self) -> Option<&Diagnosis> {
        self.diagnoses.iter().find(|d| d.is_primary)
    }
}

/// Plan block: treatment, orders and follow-up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Plan {
    pub treatment_plan: Option<String>,
    pub prescriptions: Vec<Prescription>,
    pub procedures_performed: OpenFindings,
    pub referrals: Vec<Referral>,
    pub labs_ordered: OpenFindings,
    pub imaging_ordered: OpenFindings,
    pub follow_up_instructions: Option<String>,
    pub patient_education: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalSigns {
    pub bp_systolic: Option<f64>,
    pub bp_diastolic: Option<f64>,
    pub heart_rate: Option<f64>,
    pub respiratory_rate: Option<f64>,
    pub temperature: Option<f64>,
    pub spo2: Option<f64>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub bmi: Option<f64>,
}

impl VitalSigns {
    /// All recorded measurements, by field name.
    pub fn recorded(&self) -> Vec<(&'static str, f64)> {
        [
            ("bp_systolic", self.bp_systolic),
            ("bp_diastolic", self.bp_diastolic),
            ("heart_rate", self.heart_rate),
            ("respiratory_rate", self.respiratory_rate),
            ("temperature", self.temperature),
            ("spo2", self.spo2),
            ("height", self.height),
            ("weight", self.weight),
            ("bmi", self.bmi),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    /// ICD-10 code.
    pub code: String,
    pub description: String,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    pub medication: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    #[serde(default)]
    pub refills: u32,
    #[serde(default)]
    pub instructions: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Referral {
    pub specialty: Specialty,
    #[serde(default)]
    pub provider: Option<String>,
    pub reason: String,
    pub urgency: ReferralUrgency,
}

/// An append-only correction attached to a signed note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Addendum {
    pub text: String,
    pub added_by: Uuid,
    pub added_at: chrono::DateTime<chrono::Utc>,
}
