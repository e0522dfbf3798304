use uuid::Uuid;

use super::enums::{AuditAction, Specialty};

#[derive(Debug, Default, Clone)]
pub struct NoteFilter {
    pub patient_id: Option<Uuid>,
    pub provider_id: Option<Uuid>,
    pub specialty: Option<Specialty>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Default, Clone)]
pub struct PatientFilter {
    /// Case-insensitive match against first name, last name or MRN.
    pub search: Option<String>,
    pub active_only: bool,
}

#[derive(Debug, Default, Clone)]
pub struct AuditFilter {
    pub table_name: Option<String>,
    pub record_id: Option<Uuid>,
    pub patient_id: Option<Uuid>,
    pub action: Option<AuditAction>,
}
