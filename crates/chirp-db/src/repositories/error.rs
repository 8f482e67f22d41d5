//! Error mapping for repositories

use chirp_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert an SQLx error to a DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Map a unique violation through `on_unique`, anything else to `DatabaseError`
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce(Option<&str>) -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique(db_err.constraint());
        }
    }
    map_db_error(e)
}

/// Foreign key or check violations mean the referenced row is gone or the edge is invalid
pub fn is_constraint_violation(e: &SqlxError) -> bool {
    e.as_database_error()
        .is_some_and(|db| db.is_foreign_key_violation() || db.is_check_violation())
}
