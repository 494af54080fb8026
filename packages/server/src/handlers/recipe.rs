use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::TransactionTrait;
use tracing::instrument;

use crate::catalog::{CommentCatalog, RecipeCatalog};
use crate::error::{AppError, ErrorBody};
use crate::extractors::{AppJson, AppPath, AppQuery, AuthUser};
use crate::models::comment::CommentResponse;
use crate::models::recipe::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Recipes",
    operation_id = "listRecipes",
    summary = "List all recipes",
    description = "Returns every recipe with dish-type names and the author's display name.",
    responses(
        (status = 200, description = "All recipes", body = Vec<RecipeDetail>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
) -> Result<Json<Vec<RecipeDetail>>, AppError> {
    Ok(Json(RecipeCatalog::new(&state.db).list().await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Recipes",
    operation_id = "getRecipe",
    summary = "Get a recipe by ID",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Recipe details", body = RecipeDetail),
        (status = 400, description = "Malformed ID (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_recipe(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<RecipeDetail>, AppError> {
    Ok(Json(RecipeCatalog::new(&state.db).get(id).await?))
}

#[utoipa::path(
    get,
    path = "/author/{user_id}",
    tag = "Recipes",
    operation_id = "listRecipesByAuthor",
    summary = "List recipes by author",
    description = "Any authenticated user may list any author's recipes. An unknown author yields an empty list.",
    params(("user_id" = String, Path, description = "Author's user ID")),
    responses(
        (status = 200, description = "Recipes by the author", body = Vec<RecipeDetail>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user), fields(user_id = %user_id))]
pub async fn list_recipes_by_author(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(user_id): AppPath<String>,
) -> Result<Json<Vec<RecipeDetail>>, AppError> {
    Ok(Json(
        RecipeCatalog::new(&state.db)
            .list_by_author(&user_id)
            .await?,
    ))
}

#[utoipa::path(
    get,
    path = "/dish-type/{dish_type_id}",
    tag = "Recipes",
    operation_id = "listRecipesByDishType",
    summary = "List recipes tagged with a dish type",
    params(("dish_type_id" = i32, Path, description = "Dish type ID")),
    responses(
        (status = 200, description = "Tagged recipes", body = Vec<RecipeRecord>),
        (status = 404, description = "Dish type missing or no recipes tagged (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(dish_type_id))]
pub async fn list_recipes_by_dish_type(
    State(state): State<AppState>,
    AppPath(dish_type_id): AppPath<i32>,
) -> Result<Json<Vec<RecipeRecord>>, AppError> {
    Ok(Json(
        RecipeCatalog::new(&state.db)
            .list_by_dish_type(dish_type_id)
            .await?,
    ))
}

#[utoipa::path(
    get,
    path = "/search",
    tag = "Recipes",
    operation_id = "searchRecipes",
    summary = "Search recipes",
    description = "Case-insensitive substring match against title, summary and each ingredient line.",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching recipes", body = Vec<RecipeRecord>),
        (status = 400, description = "Blank search term (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "No matches (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn search_recipes(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<SearchQuery>,
) -> Result<Json<Vec<RecipeRecord>>, AppError> {
    let term = query.term.unwrap_or_default();
    Ok(Json(RecipeCatalog::new(&state.db).search(&term).await?))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Recipes",
    operation_id = "createRecipe",
    summary = "Create a recipe",
    description = "Creates a recipe and its dish-type links in one transaction. `author_id` defaults to the caller and may not name another user.",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = RecipeRecord),
        (status = 400, description = "Validation error or unknown author / dish type (VALIDATION_ERROR, REFERENCE_NOT_FOUND)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "author_id names another user (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(title = %payload.title))]
pub async fn create_recipe(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateRecipeRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_recipe(&payload)?;

    let txn = state.db.begin().await?;
    let created = RecipeCatalog::new(&txn)
        .create(&auth_user.user_id, payload)
        .await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Recipes",
    operation_id = "updateRecipe",
    summary = "Update a recipe",
    description = "Partial update. Absent fields are unchanged; `dish_type_ids` replaces the whole link set (`[]` clears it). Only the author may update.",
    params(("id" = i32, Path, description = "Recipe ID")),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeRecord),
        (status = 400, description = "Validation error or unknown dish type (VALIDATION_ERROR, REFERENCE_NOT_FOUND)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the author (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Modified concurrently (CONCURRENCY_CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_recipe(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateRecipeRequest>,
) -> Result<Json<RecipeRecord>, AppError> {
    validate_update_recipe(&payload)?;

    let txn = state.db.begin().await?;
    let updated = RecipeCatalog::new(&txn)
        .update(&auth_user.user_id, id, payload)
        .await?;
    txn.commit().await?;

    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Recipes",
    operation_id = "deleteRecipe",
    summary = "Delete a recipe",
    description = "Deletes the recipe with its comments and dish-type links. Only the author may delete.",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the author (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_recipe(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<StatusCode, AppError> {
    let txn = state.db.begin().await?;
    RecipeCatalog::new(&txn)
        .delete(&auth_user.user_id, id)
        .await?;
    txn.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/{id}/comments",
    tag = "Recipes",
    operation_id = "listRecipeComments",
    summary = "List comments on a recipe",
    description = "Oldest first. A recipe without comments is reported as NOT_FOUND.",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Comments on the recipe", body = Vec<CommentResponse>),
        (status = 404, description = "Recipe missing or has no comments (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn list_recipe_comments(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    Ok(Json(CommentCatalog::new(&state.db).list_by_recipe(id).await?))
}
