//! Response projections. Related rows are batch-loaded once per call, never
//! per recipe.

use std::collections::{HashMap, HashSet};

use sea_orm::{ConnectionTrait, DbErr};

use crate::entity::{comment, recipe, user};
use crate::models::comment::CommentResponse;
use crate::models::recipe::{RecipeDetail, RecipeRecord};
use crate::store::EntityStore;

fn author_ids<'m>(ids: impl Iterator<Item = Option<&'m String>>) -> Vec<String> {
    ids.flatten()
        .cloned()
        .collect::<HashSet<_>>()
        .into_iter()
        .collect()
}

fn author_name(authors: &HashMap<String, user::Model>, author_id: Option<&String>) -> Option<String> {
    author_id
        .and_then(|id| authors.get(id))
        .and_then(|u| user::display_name(&u.first_name, &u.last_name))
}

/// Display projection: dish-type names and author display names.
pub async fn recipe_details<C: ConnectionTrait>(
    store: &EntityStore<'_, C>,
    recipes: Vec<recipe::Model>,
) -> Result<Vec<RecipeDetail>, DbErr> {
    let mut links = store
        .dish_type_ids_by_recipe(recipes.iter().map(|r| r.id).collect())
        .await?;
    let dish_type_ids: Vec<i32> = links
        .values()
        .flatten()
        .copied()
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let dish_types = store.dish_types_by_id(dish_type_ids).await?;
    let authors = store
        .users_by_id(author_ids(recipes.iter().map(|r| r.author_id.as_ref())))
        .await?;

    Ok(recipes
        .into_iter()
        .map(|r| {
            let dish_type_names = links
                .remove(&r.id)
                .unwrap_or_default()
                .into_iter()
                .filter_map(|id| dish_types.get(&id).map(|d| d.name.clone()))
                .collect();
            RecipeDetail {
                author_name: author_name(&authors, r.author_id.as_ref()),
                id: r.id,
                title: r.title,
                summary: r.summary,
                image: r.image,
                ready_in_minutes: r.ready_in_minutes,
                servings: r.servings,
                dish_type_names,
                ingredients: recipe::from_json_list(&r.ingredients),
                instructions: recipe::from_json_list(&r.instructions),
            }
        })
        .collect())
}

/// Raw projection: dish-type ids and the author id.
pub async fn recipe_records<C: ConnectionTrait>(
    store: &EntityStore<'_, C>,
    recipes: Vec<recipe::Model>,
) -> Result<Vec<RecipeRecord>, DbErr> {
    let mut links = store
        .dish_type_ids_by_recipe(recipes.iter().map(|r| r.id).collect())
        .await?;

    Ok(recipes
        .into_iter()
        .map(|r| RecipeRecord {
            dish_type_ids: links.remove(&r.id).unwrap_or_default(),
            ingredients: recipe::from_json_list(&r.ingredients),
            instructions: recipe::from_json_list(&r.instructions),
            id: r.id,
            title: r.title,
            summary: r.summary,
            image: r.image,
            ready_in_minutes: r.ready_in_minutes,
            servings: r.servings,
            author_id: r.author_id,
        })
        .collect())
}

pub async fn comment_responses<C: ConnectionTrait>(
    store: &EntityStore<'_, C>,
    comments: Vec<comment::Model>,
) -> Result<Vec<CommentResponse>, DbErr> {
    let authors = store
        .users_by_id(author_ids(comments.iter().map(|c| c.author_id.as_ref())))
        .await?;

    Ok(comments
        .into_iter()
        .map(|c| CommentResponse {
            author_name: author_name(&authors, c.author_id.as_ref()),
            id: c.id,
            content: c.content,
            recipe_id: c.recipe_id,
            author_id: c.author_id,
            created_at: c.created_at,
        })
        .collect())
}
