use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::TransactionTrait;
use tracing::instrument;

use crate::catalog::CommentCatalog;
use crate::error::{AppError, ErrorBody};
use crate::extractors::{AppJson, AppPath, AuthUser};
use crate::models::comment::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Comments",
    operation_id = "listComments",
    summary = "List all comments",
    responses(
        (status = 200, description = "All comments, oldest first", body = Vec<CommentResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_comments(
    State(state): State<AppState>,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    Ok(Json(CommentCatalog::new(&state.db).list().await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Comments",
    operation_id = "getComment",
    summary = "Get a comment by ID",
    params(("id" = i32, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Comment", body = CommentResponse),
        (status = 404, description = "Comment not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_comment(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<CommentResponse>, AppError> {
    Ok(Json(CommentCatalog::new(&state.db).get(id).await?))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Comments",
    operation_id = "createComment",
    summary = "Comment on a recipe",
    description = "The server stamps the creation time. `author_id` defaults to the caller and may not name another user.",
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created", body = CommentResponse),
        (status = 400, description = "Validation error or unknown recipe / author (VALIDATION_ERROR, REFERENCE_NOT_FOUND)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "author_id names another user (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(recipe_id = payload.recipe_id))]
pub async fn create_comment(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_content(&payload.content)?;

    let created = CommentCatalog::new(&state.db)
        .create(&auth_user.user_id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Comments",
    operation_id = "updateComment",
    summary = "Edit a comment",
    description = "Replaces the content. Only the author may edit.",
    params(("id" = i32, Path, description = "Comment ID")),
    request_body = UpdateCommentRequest,
    responses(
        (status = 200, description = "Comment updated", body = CommentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the author (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Comment not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_comment(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateCommentRequest>,
) -> Result<Json<CommentResponse>, AppError> {
    validate_content(&payload.content)?;

    let txn = state.db.begin().await?;
    let updated = CommentCatalog::new(&txn)
        .update(&auth_user.user_id, id, payload)
        .await?;
    txn.commit().await?;

    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Comments",
    operation_id = "deleteComment",
    summary = "Delete a comment",
    description = "Only the author may delete.",
    params(("id" = i32, Path, description = "Comment ID")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the author (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Comment not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_comment(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<StatusCode, AppError> {
    let txn = state.db.begin().await?;
    CommentCatalog::new(&txn)
        .delete(&auth_user.user_id, id)
        .await?;
    txn.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}
