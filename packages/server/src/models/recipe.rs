use serde::{Deserialize, Serialize};

use super::shared::{validate_id_set, validate_non_negative, validate_title};
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateRecipeRequest {
    #[schema(example = "Chocolate Cake")]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    /// Image URL or storage key.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub ready_in_minutes: i32,
    #[serde(default)]
    pub servings: i32,
    #[serde(default)]
    #[schema(example = json!(["200g flour", "100g chocolate chips"]))]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Author of the recipe. Defaults to the authenticated caller. Another
    /// user's id is refused.
    pub author_id: Option<String>,
    #[serde(default)]
    #[schema(example = json!([1, 2]))]
    pub dish_type_ids: Vec<i32>,
}

pub fn validate_create_recipe(payload: &CreateRecipeRequest) -> Result<(), AppError> {
    validate_title(&payload.title)?;
    validate_non_negative(Some(payload.ready_in_minutes), "ready_in_minutes")?;
    validate_non_negative(Some(payload.servings), "servings")?;
    validate_id_set(&payload.dish_type_ids, "dish type")?;
    Ok(())
}

/// PATCH body for a recipe.
///
/// Every field is optional: absent keeps the stored value, present (even `0`
/// or `""`) overwrites it. `dish_type_ids` replaces the whole association
/// set, so `[]` clears it.
#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateRecipeRequest {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub image: Option<String>,
    pub ready_in_minutes: Option<i32>,
    pub servings: Option<i32>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<Vec<String>>,
    pub dish_type_ids: Option<Vec<i32>>,
}

pub fn validate_update_recipe(payload: &UpdateRecipeRequest) -> Result<(), AppError> {
    if let Some(ref title) = payload.title {
        validate_title(title)?;
    }
    validate_non_negative(payload.ready_in_minutes, "ready_in_minutes")?;
    validate_non_negative(payload.servings, "servings")?;
    if let Some(ref ids) = payload.dish_type_ids {
        validate_id_set(ids, "dish type")?;
    }
    Ok(())
}

/// Display projection: dish-type names and the author's display name.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct RecipeDetail {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub image: String,
    pub ready_in_minutes: i32,
    pub servings: i32,
    #[schema(example = json!(["Dessert", "Snack"]))]
    pub dish_type_names: Vec<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    /// "First Last"; `null` when the recipe has no author.
    #[schema(example = "Alice Liddell")]
    pub author_name: Option<String>,
}

/// Raw projection with ids instead of names, for update round-trips.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct RecipeRecord {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub image: String,
    pub ready_in_minutes: i32,
    pub servings: i32,
    #[schema(example = json!([1, 2]))]
    pub dish_type_ids: Vec<i32>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub author_id: Option<String>,
}

/// Query string for `GET /recipes/search`.
#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive substring matched against title, summary and ingredients.
    pub term: Option<String>,
}
