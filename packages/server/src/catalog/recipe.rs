use sea_orm::{ConnectionTrait, NotSet, Set};
use tracing::info;

use super::{claim_author, ensure_author, projection, search};
use crate::entity::recipe;
use crate::error::AppError;
use crate::models::recipe::{CreateRecipeRequest, RecipeDetail, RecipeRecord, UpdateRecipeRequest};
use crate::store::EntityStore;

pub struct RecipeCatalog<'a, C: ConnectionTrait> {
    store: EntityStore<'a, C>,
}

impl<'a, C: ConnectionTrait> RecipeCatalog<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self {
            store: EntityStore::new(conn),
        }
    }

    pub async fn list(&self) -> Result<Vec<RecipeDetail>, AppError> {
        let recipes = self.store.all_recipes().await?;
        Ok(projection::recipe_details(&self.store, recipes).await?)
    }

    pub async fn get(&self, id: i32) -> Result<RecipeDetail, AppError> {
        let recipe = self.store.require_recipe(id).await?;
        self.detail(recipe).await
    }

    /// Recipes currently attributed to `author_id`. Unknown authors simply
    /// have none.
    pub async fn list_by_author(&self, author_id: &str) -> Result<Vec<RecipeDetail>, AppError> {
        let recipes = self.store.recipes_by_author(author_id).await?;
        Ok(projection::recipe_details(&self.store, recipes).await?)
    }

    /// Recipes tagged with the dish type. An empty result is `NotFound`.
    pub async fn list_by_dish_type(&self, dish_type_id: i32) -> Result<Vec<RecipeRecord>, AppError> {
        self.store.require_dish_type(dish_type_id).await?;
        let recipes = self.store.recipes_by_dish_type(dish_type_id).await?;
        if recipes.is_empty() {
            return Err(AppError::NotFound(format!(
                "No recipes found for dish type {dish_type_id}"
            )));
        }
        Ok(projection::recipe_records(&self.store, recipes).await?)
    }

    /// Scan every recipe for the term. A blank term is a validation error;
    /// no matches is `NotFound`.
    pub async fn search(&self, raw_term: &str) -> Result<Vec<RecipeRecord>, AppError> {
        let term = search::normalize_term(raw_term)
            .ok_or_else(|| AppError::Validation("Search term must not be empty".into()))?;

        let hits: Vec<recipe::Model> = self
            .store
            .all_recipes()
            .await?
            .into_iter()
            .filter(|r| search::matches(r, &term))
            .collect();

        if hits.is_empty() {
            return Err(AppError::NotFound(format!(
                "No recipes match \"{}\"",
                raw_term.trim()
            )));
        }
        Ok(projection::recipe_records(&self.store, hits).await?)
    }

    /// Insert a recipe and its dish-type links. Run on a transaction so a
    /// bad dish-type id leaves nothing behind.
    pub async fn create(
        &self,
        caller_id: &str,
        payload: CreateRecipeRequest,
    ) -> Result<RecipeRecord, AppError> {
        let author_id = claim_author(&self.store, payload.author_id, caller_id).await?;

        let model = recipe::ActiveModel {
            title: Set(payload.title.trim().to_string()),
            summary: Set(payload.summary),
            image: Set(payload.image),
            ready_in_minutes: Set(payload.ready_in_minutes),
            servings: Set(payload.servings),
            ingredients: Set(recipe::to_json_list(&payload.ingredients)),
            instructions: Set(recipe::to_json_list(&payload.instructions)),
            author_id: Set(Some(author_id)),
            ..Default::default()
        };
        let created = self.store.insert_recipe(model).await?;
        self.store
            .replace_dish_types(created.id, &payload.dish_type_ids)
            .await?;

        info!(recipe_id = created.id, author_id = ?created.author_id, "Recipe created");
        self.record(created).await
    }

    /// Merge the present fields into the stored recipe, guarded by its
    /// version. `dish_type_ids`, when present, replaces the link set.
    pub async fn update(
        &self,
        caller_id: &str,
        id: i32,
        payload: UpdateRecipeRequest,
    ) -> Result<RecipeRecord, AppError> {
        let existing = self.store.require_recipe(id).await?;
        ensure_author(existing.author_id.as_deref(), caller_id)?;

        if payload == UpdateRecipeRequest::default() {
            return self.record(existing).await;
        }

        let (changes, dish_type_ids) = merge_changes(payload);
        let updated = self
            .store
            .update_recipe(id, existing.version, changes)
            .await?;
        if let Some(dish_type_ids) = dish_type_ids {
            self.store.replace_dish_types(id, &dish_type_ids).await?;
        }

        info!(recipe_id = id, version = updated.version, "Recipe updated");
        self.record(updated).await
    }

    /// Delete a recipe; its comments and dish-type links go with it.
    pub async fn delete(&self, caller_id: &str, id: i32) -> Result<(), AppError> {
        let existing = self.store.require_recipe(id).await?;
        ensure_author(existing.author_id.as_deref(), caller_id)?;

        self.store.delete_recipe(id).await?;
        info!(recipe_id = id, "Recipe deleted");
        Ok(())
    }

    async fn detail(&self, recipe: recipe::Model) -> Result<RecipeDetail, AppError> {
        projection::recipe_details(&self.store, vec![recipe])
            .await?
            .pop()
            .ok_or_else(|| AppError::Internal("empty recipe projection".into()))
    }

    async fn record(&self, recipe: recipe::Model) -> Result<RecipeRecord, AppError> {
        projection::recipe_records(&self.store, vec![recipe])
            .await?
            .pop()
            .ok_or_else(|| AppError::Internal("empty recipe projection".into()))
    }
}

/// Split a PATCH body into column changes and the optional replacement
/// dish-type set. Absent fields stay `NotSet`.
fn merge_changes(payload: UpdateRecipeRequest) -> (recipe::ActiveModel, Option<Vec<i32>>) {
    fn set_or_keep<T: Into<sea_orm::Value>>(value: Option<T>) -> sea_orm::ActiveValue<T> {
        match value {
            Some(v) => Set(v),
            None => NotSet,
        }
    }

    let changes = recipe::ActiveModel {
        title: set_or_keep(payload.title.map(|t| t.trim().to_string())),
        summary: set_or_keep(payload.summary),
        image: set_or_keep(payload.image),
        ready_in_minutes: set_or_keep(payload.ready_in_minutes),
        servings: set_or_keep(payload.servings),
        ingredients: set_or_keep(payload.ingredients.as_deref().map(recipe::to_json_list)),
        instructions: set_or_keep(payload.instructions.as_deref().map(recipe::to_json_list)),
        ..Default::default()
    };
    (changes, payload.dish_type_ids)
}
