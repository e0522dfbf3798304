//! Specialty-specific review-of-systems and physical-exam findings.
//!
//! Each specialty with a charting form has a known shape; every shape also
//! carries an open `extra` map for fields the form does not name. Specialties
//! without a dedicated form only have the open map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::enums::Specialty;

/// Free-form findings keyed by field name.
pub type OpenFindings = BTreeMap<String, serde_json::Value>;

// ═══════════════════════════════════════════
// Review of systems
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardiologyReview {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chest_pain: Option<String>, // none | exertional | at_rest | pleuritic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palpitations: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dyspnea: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edema: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syncope: Option<String>,
    #[serde(flatten)]
    pub extra: OpenFindings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralReview {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fever: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_change: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fatigue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub night_sweats: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vision_changes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hearing_changes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sore_throat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nasal_congestion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cough: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortness_of_breath: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wheezing: Option<String>,
    #[serde(flatten)]
    pub extra: OpenFindings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PediatricReview {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross_motor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fine_motor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developmental_concerns: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feeding_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appetite: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feeding_concerns: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub immunization_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vaccines_due: Option<String>,
    #[serde(flatten)]
    pub extra: OpenFindings,
}

/// Review of systems, tagged with the specialty whose form produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "specialty", content = "findings", rename_all = "snake_case")]
pub enum ReviewOfSystems {
    Cardiology(CardiologyReview),
    General(GeneralReview),
    Pediatrics(PediatricReview),
    Neurology(OpenFindings),
    Orthopedics(OpenFindings),
    Dermatology(OpenFindings),
}

impl ReviewOfSystems {
    /// An empty review for the given specialty.
    pub fn empty(specialty: Specialty) -> Self {
        match specialty {
            Specialty::Cardiology => Self::Cardiology(CardiologyReview::default()),
            Specialty::General => Self::General(GeneralReview::default()),
            Specialty::Pediatrics => Self::Pediatrics(PediatricReview::default()),
            Specialty::Neurology => Self::Neurology(OpenFindings::new()),
            Specialty::Orthopedics => Self::Orthopedics(OpenFindings::new()),
            Specialty::Dermatology => Self::Dermatology(OpenFindings::new()),
        }
    }

    pub fn specialty(&self) -> Specialty {
        match self {
            Self::Cardiology(_) => Specialty::Cardiology,
            Self::General(_) => Specialty::General,
            Self::Pediatrics(_) => Specialty::Pediatrics,
            Self::Neurology(_) => Specialty::Neurology,
            Self::Orthopedics(_) => Specialty::Orthopedics,
            Self::Dermatology(_) => Specialty::Dermatology,
        }
    }
}

// ═══════════════════════════════════════════
// Physical exam
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardiologyExam {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rhythm: Option<String>, // regular | irregular | afib | aflutter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_sounds: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub murmur: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub murmur_grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jvp: Option<f64>, // cm H2O
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carotid_bruits: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peripheral_pulses: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bp_systolic: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bp_diastolic: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bp_position: Option<String>,
    #[serde(flatten)]
    pub extra: OpenFindings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralExam {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appearance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alertness: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eyes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ears: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lungs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abdomen: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extremities: Option<String>,
    #[serde(flatten)]
    pub extra: OpenFindings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PediatricExam {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_percentile: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_percentile: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_circumference: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hc_percentile: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmi_percentile: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fontanelle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tympanic_membranes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_lungs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abdomen: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genitourinary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neuro: Option<String>,
    #[serde(flatten)]
    pub extra: OpenFindings,
}

impl PediatricExam {
    /// Percentile fields that must fall within 0..=100 when present.
    pub fn percentiles(&self) -> [(&'static str, Option<f64>); 4] {
        [
            ("weight_percentile", self.weight_percentile),
            ("height_percentile", self.height_percentile),
            ("hc_percentile", self.hc_percentile),
            ("bmi_percentile", self.bmi_percentile),
        ]
    }
}

/// Physical exam, tagged with the specialty whose form produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "specialty", content = "findings", rename_all = "snake_case")]
pub enum PhysicalExam {
    Cardiology(CardiologyExam),
    General(GeneralExam),
    Pediatrics(PediatricExam),
    Neurology(OpenFindings),
    Orthopedics(OpenFindings),
    Dermatology(OpenFindings),
}

impl PhysicalExam {
    /// An empty exam for the given specialty.
    pub fn empty(specialty: Specialty) -> Self {
        match specialty {
            Specialty::Cardiology => Self::Cardiology(CardiologyExam::default()),
            Specialty::General => Self::General(GeneralExam::default()),
            Specialty::Pediatrics => Self::Pediatrics(PediatricExam::default()),
            Specialty::Neurology => Self::Neurology(OpenFindings::new()),
            Specialty::Orthopedics => Self::Orthopedics(OpenFindings::new()),
            Specialty::Dermatology => Self::Dermatology(OpenFindings::new()),
        }
    }

    pub fn specialty(&self) -> Specialty {
        match self {
            Self::Cardiology(_) => Specialty::Cardiology,
            Self::General(_) => Specialty::General,
            Self::Pediatrics(_) => Specialty::Pediatrics,
            Self::Neurology(_) => Specialty::Neurology,
            Self::Orthopedics(_) => Specialty::Orthopedics,
            Self::Dermatology(_) => Specialty::Dermatology,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_findings_carry_requested_specialty() {
        for specialty in [
            Specialty::Cardiology,
            Specialty::General,
            Specialty::Pediatrics,
            Specialty::Neurology,
            Specialty::Orthopedics,
            Specialty::Dermatology,
        ] {
            assert_eq!(ReviewOfSystems::empty(specialty).specialty(), specialty);
            assert_eq!(PhysicalExam::empty(specialty).specialty(), specialty);
        }
    }

    #[test]
    fn known_fields_and_extras_deserialize_together() {
        let raw = json!({
            "specialty": "cardiology",
            "findings": {
                "heart_rate": 88,
                "rhythm": "afib",
                "s3_gallop": true
            }
        });
        let exam: PhysicalExam = serde_json::from_value(raw).unwrap();
        match exam {
            PhysicalExam::Cardiology(c) => {
                assert_eq!(c.heart_rate, Some(88.0));
                assert_eq!(c.rhythm.as_deref(), Some("afib"));
                assert_eq!(c.extra.get("s3_gallop"), Some(&json!(true)));
            }
            other => panic!("expected cardiology exam, got {other:?}"),
        }
    }

    #[test]
    fn open_specialty_keeps_arbitrary_fields() {
        let raw = json!({
            "specialty": "dermatology",
            "findings": { "lesion_count": 3, "distribution": "truncal" }
        });
        let ros: ReviewOfSystems = serde_json::from_value(raw).unwrap();
        assert_eq!(ros.specialty(), Specialty::Dermatology);
        if let ReviewOfSystems::Dermatology(map) = &ros {
            assert_eq!(map.len(), 2);
        }
        let back = serde_json::to_value(&ros).unwrap();
        assert_eq!(back["findings"]["distribution"], json!("truncal"));
    }

    #[test]
    fn unknown_specialty_tag_is_rejected() {
        let raw = json!({ "specialty": "oncology", "findings": {} });
        assert!(serde_json::from_value::<ReviewOfSystems>(raw).is_err());
    }
}
