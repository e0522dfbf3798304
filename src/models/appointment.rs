use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{AppointmentStatus, AppointmentType, Specialty};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub provider_id: Option<Uuid>,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub appointment_type: AppointmentType,
    pub specialty: Option<Specialty>,
    pub status: AppointmentStatus,
    pub chief_complaint: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAppointment {
    pub patient_id: Uuid,
    pub provider_id: Option<Uuid>,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub appointment_type: AppointmentType,
    pub specialty: Option<Specialty>,
    pub status: AppointmentStatus,
    pub chief_complaint: Option<String>,
}
