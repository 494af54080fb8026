use sea_orm::DbErr;
use thiserror::Error;

/// Failures raised by [`super::EntityStore`].
///
/// `entity` is a human-readable name ("Recipe", "Dish type", ...) so the
/// variants render directly into client messages.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} {id} does not exist")]
    ReferenceNotFound { entity: &'static str, id: String },

    #[error("{entity} {id} was modified concurrently")]
    ConcurrencyConflict { entity: &'static str, id: String },

    #[error("Database error: {0}")]
    Db(#[from] DbErr),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn reference(entity: &'static str, id: impl ToString) -> Self {
        Self::ReferenceNotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn conflict(entity: &'static str, id: impl ToString) -> Self {
        Self::ConcurrencyConflict {
            entity,
            id: id.to_string(),
        }
    }
}
