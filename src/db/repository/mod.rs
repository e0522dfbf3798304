//! Repository layer: entity-scoped database operations.
//!
//! Every function takes a borrowed `Connection`; callers own transactions.

mod appointment;
mod audit;
mod note;
mod patient;
mod profile;

use uuid::Uuid;

use super::DatabaseError;

pub use appointment::*;
pub use audit::*;
pub use note::*;
pub use patient::*;
pub use profile::*;

/// Parse a TEXT id column. A malformed id means the row was written outside this layer.
pub(crate) fn parse_uuid(s: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(s)
        .map_err(|e| DatabaseError::ConstraintViolation(format!("Invalid UUID '{s}': {e}")))
}

pub(crate) fn parse_opt_uuid(s: Option<&str>) -> Result<Option<Uuid>, DatabaseError> {
    s.map(parse_uuid).transpose()
}
