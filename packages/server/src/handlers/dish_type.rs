use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::TransactionTrait;
use tracing::instrument;

use crate::catalog::DishTypeCatalog;
use crate::error::{AppError, ErrorBody};
use crate::extractors::{AppJson, AppPath, AuthUser};
use crate::models::dish_type::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Dish Types",
    operation_id = "listDishTypes",
    summary = "List dish types",
    responses(
        (status = 200, description = "All dish types", body = Vec<DishTypeResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_dish_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<DishTypeResponse>>, AppError> {
    Ok(Json(DishTypeCatalog::new(&state.db).list().await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Dish Types",
    operation_id = "getDishType",
    summary = "Get a dish type by ID",
    params(("id" = i32, Path, description = "Dish type ID")),
    responses(
        (status = 200, description = "Dish type", body = DishTypeResponse),
        (status = 404, description = "Dish type not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_dish_type(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<DishTypeResponse>, AppError> {
    Ok(Json(DishTypeCatalog::new(&state.db).get(id).await?))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Dish Types",
    operation_id = "createDishType",
    summary = "Create a dish type",
    request_body = DishTypeRequest,
    responses(
        (status = 201, description = "Dish type created", body = DishTypeResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, payload), fields(name = %payload.name))]
pub async fn create_dish_type(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<DishTypeRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_dish_type(&payload)?;
    let created = DishTypeCatalog::new(&state.db).create(&payload.name).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Dish Types",
    operation_id = "updateDishType",
    summary = "Rename a dish type",
    params(("id" = i32, Path, description = "Dish type ID")),
    request_body = DishTypeRequest,
    responses(
        (status = 200, description = "Dish type renamed", body = DishTypeResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Dish type not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, payload), fields(id))]
pub async fn update_dish_type(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<DishTypeRequest>,
) -> Result<Json<DishTypeResponse>, AppError> {
    validate_dish_type(&payload)?;
    Ok(Json(
        DishTypeCatalog::new(&state.db)
            .rename(id, &payload.name)
            .await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Dish Types",
    operation_id = "deleteDishType",
    summary = "Delete a dish type",
    description = "Removes the dish type and its recipe links. The recipes themselves are kept.",
    params(("id" = i32, Path, description = "Dish type ID")),
    responses(
        (status = 204, description = "Dish type deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Dish type not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user), fields(id))]
pub async fn delete_dish_type(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<StatusCode, AppError> {
    let txn = state.db.begin().await?;
    DishTypeCatalog::new(&txn).delete(id).await?;
    txn.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}
