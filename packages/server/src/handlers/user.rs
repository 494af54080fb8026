use axum::{Json, extract::State, http::StatusCode};
use sea_orm::*;
use tracing::{info, instrument};

use crate::entity::user;
use crate::error::{AppError, ErrorBody};
use crate::extractors::{AppJson, AuthUser};
use crate::models::user::{ProfileResponse, UpdateProfileRequest, validate_update_profile};
use crate::state::AppState;
use crate::store::EntityStore;
use crate::utils::hash;

/// Resolve the caller's account. A valid token for a deleted account is
/// treated as a missing user.
async fn current_user<C: ConnectionTrait>(
    conn: &C,
    auth_user: &AuthUser,
) -> Result<user::Model, AppError> {
    EntityStore::new(conn)
        .find_user(&auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))
}

#[utoipa::path(
    get,
    path = "/me",
    tag = "Users",
    operation_id = "getProfile",
    summary = "Get the caller's profile",
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Account no longer exists (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn me(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = current_user(&state.db, &auth_user).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    patch,
    path = "/me",
    tag = "Users",
    operation_id = "updateProfile",
    summary = "Update the caller's profile",
    description = "Partial update: absent fields are unchanged. Changing the password requires `current_password`.",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized or wrong current password (TOKEN_MISSING, TOKEN_INVALID, INVALID_CREDENTIALS)", body = ErrorBody),
        (status = 404, description = "Account no longer exists (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Username taken (USERNAME_TAKEN)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = %auth_user.user_id))]
pub async fn update_me(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    validate_update_profile(&payload)?;

    let txn = state.db.begin().await?;
    let existing = current_user(&txn, &auth_user).await?;

    if payload.new_password.is_some() {
        let current = payload.current_password.as_deref().unwrap_or_default();
        let matches = hash::verify_password(current, &existing.password)
            .map_err(|e| AppError::Internal(format!("Password verify error: {}", e)))?;
        if !matches {
            return Err(AppError::InvalidCredentials);
        }
    }

    if let Some(ref username) = payload.username {
        let taken = EntityStore::new(&txn)
            .find_user_by_username(username)
            .await?
            .is_some_and(|other| other.id != existing.id);
        if taken {
            return Err(AppError::UsernameTaken);
        }
    }

    let mut active: user::ActiveModel = existing.into();
    if let Some(first_name) = payload.first_name {
        active.first_name = Set(first_name.trim().to_string());
    }
    if let Some(last_name) = payload.last_name {
        active.last_name = Set(last_name.trim().to_string());
    }
    if let Some(username) = payload.username {
        let username = username.trim().to_string();
        active.normalized_username = Set(user::normalize_username(&username));
        active.username = Set(username);
    }
    if let Some(email) = payload.email {
        active.email = Set(email.trim().to_string());
    }
    if let Some(new_password) = payload.new_password {
        let hash = hash::hash_password(&new_password)
            .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;
        active.password = Set(hash);
    }

    let updated = active.update(&txn).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::UsernameTaken,
        _ => AppError::from(e),
    })?;
    txn.commit().await?;

    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/me",
    tag = "Users",
    operation_id = "deleteAccount",
    summary = "Delete the caller's account",
    description = "Deletes the account. Recipes and comments it authored are kept with their author cleared.",
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Account no longer exists (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn delete_me(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    let txn = state.db.begin().await?;
    EntityStore::new(&txn).delete_user(&auth_user.user_id).await?;
    txn.commit().await?;

    info!("Account deleted");
    Ok(StatusCode::NO_CONTENT)
}
