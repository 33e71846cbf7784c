//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Borrows the `Storage` handle per call, never caches rows
//! - Every mutation is a single statement (no explicit transactions)
//! - Sample mode short-circuits: fixed data for reads, no-op writes

pub mod clients;
pub mod tutors;

pub use clients::ClientRepo;
pub use tutors::TutorRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
