//! Clinical note lifecycle: draft, signed+locked, addendum-only.
//!
//! `NoteLifecycleManager` mediates every read and write of a clinical note,
//! enforces the lock, and records the PHI audit trail through a `NoteStore`.

mod audit;
mod context;
mod lifecycle;
mod store;
pub mod validation;

pub use context::AccessContext;
pub use lifecycle::NoteLifecycleManager;
pub use store::{NoteStore, SqliteNoteStore};

use thiserror::Error;
use uuid::Uuid;

use crate::db::DatabaseError;

#[derive(Error, Debug)]
pub enum ChartingError {
    #[error("Clinical note not found: {0}")]
    NotFound(Uuid),

    #[error("Clinical note {0} is signed and locked. Add an addendum instead.")]
    Locked(Uuid),

    #[error("Invalid clinical note: {0}")]
    Validation(String),

    #[error("Data store error: {0}")]
    Store(#[from] DatabaseError),

    #[error("Clinical note {0} was modified by another request. Reload and retry.")]
    ConcurrentModification(Uuid),
}

impl ChartingError {
    /// Stable identifier for UI dispatch.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Locked(_) => "LOCKED",
            Self::Validation(_) => "VALIDATION",
            Self::Store(_) => "STORE_FAILURE",
            Self::ConcurrentModification(_) => "CONFLICT",
        }
    }

    /// Whether repeating the same call may succeed.
    ///
    /// `Locked` never is: the caller has to switch to an addendum.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ConcurrentModification(_) => true,
            Self::Store(DatabaseError::Sqlite(e)) => matches!(
                e.sqlite_error_code(),
                Some(rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked)
            ),
            _ => false,
        }
    }
}
