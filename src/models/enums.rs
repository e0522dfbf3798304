use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Specialty {
    Cardiology => "cardiology",
    General => "general",
    Pediatrics => "pediatrics",
    Neurology => "neurology",
    Orthopedics => "orthopedics",
    Dermatology => "dermatology",
});

str_enum!(UserRole {
    Physician => "physician",
    Nurse => "nurse",
    Admin => "admin",
    Receptionist => "receptionist",
    Billing => "billing",
});

str_enum!(Gender {
    Male => "male",
    Female => "female",
    Other => "other",
    PreferNotToSay => "prefer_not_to_say",
});

str_enum!(AppointmentStatus {
    Scheduled => "scheduled",
    Confirmed => "confirmed",
    CheckedIn => "checked_in",
    InProgress => "in_progress",
    Completed => "completed",
    Cancelled => "cancelled",
    NoShow => "no_show",
});

str_enum!(AppointmentType {
    NewPatient => "new_patient",
    FollowUp => "follow_up",
    AnnualExam => "annual_exam",
    Urgent => "urgent",
    Telehealth => "telehealth",
    Procedure => "procedure",
});

str_enum!(ReferralUrgency {
    Routine => "routine",
    Urgent => "urgent",
    Emergent => "emergent",
});

str_enum!(AuditAction {
    Create => "create",
    Read => "read",
    Update => "update",
    Delete => "delete",
    Login => "login",
    Logout => "logout",
    Export => "export",
    Print => "print",
    FailedLogin => "failed_login",
});
