//! Catalog Engine: recipe, comment and dish-type operations composed from
//! [`EntityStore`](crate::store::EntityStore) calls, plus the authorization
//! rules and response projections.
//!
//! Every service borrows an explicit connection. Handlers pass a
//! transaction when an operation writes more than one row.

mod comment;
mod dish_type;
mod projection;
mod recipe;
pub mod search;

use sea_orm::ConnectionTrait;

use crate::error::AppError;
use crate::store::EntityStore;

pub use comment::CommentCatalog;
pub use dish_type::DishTypeCatalog;
pub use recipe::RecipeCatalog;

/// Only the author may mutate a record. Records whose author was deleted
/// are open to any authenticated caller.
pub fn ensure_author(author_id: Option<&str>, caller_id: &str) -> Result<(), AppError> {
    match author_id {
        Some(author_id) if author_id != caller_id => Err(AppError::PermissionDenied),
        _ => Ok(()),
    }
}

/// Author for a new record: the caller, unless another id is requested.
/// That id must name an existing user, and even then a caller cannot
/// write on someone else's behalf.
pub async fn claim_author<C: ConnectionTrait>(
    store: &EntityStore<'_, C>,
    requested: Option<String>,
    caller_id: &str,
) -> Result<String, AppError> {
    match requested {
        Some(author_id) if author_id != caller_id => {
            store.require_user(&author_id).await?;
            Err(AppError::PermissionDenied)
        }
        _ => Ok(caller_id.to_string()),
    }
}
