use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{Specialty, UserRole};

/// Clinic staff member; providers author clinical notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub specialty: Option<Specialty>,
    pub license_number: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProfile {
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub specialty: Option<Specialty>,
    pub license_number: Option<String>,
    pub phone: Option<String>,
}

/// Provider fields joined into note list views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSummary {
    pub id: Uuid,
    pub full_name: String,
    pub specialty: Option<Specialty>,
}
