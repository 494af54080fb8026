use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipe")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub summary: String,
    pub image: String,
    pub ready_in_minutes: i32,
    pub servings: i32,

    /// Ordered ingredient lines, stored as a JSON array of strings.
    #[sea_orm(column_type = "JsonBinary")]
    pub ingredients: serde_json::Value,
    /// Ordered instruction steps, stored as a JSON array of strings.
    #[sea_orm(column_type = "JsonBinary")]
    pub instructions: serde_json::Value,

    /// NULL once the author's account is deleted.
    pub author_id: Option<String>,
    #[sea_orm(belongs_to, from = "author_id", to = "id", on_delete = "SetNull")]
    pub author: HasOne<super::user::Entity>,

    #[sea_orm(has_many)]
    pub comments: HasMany<super::comment::Entity>,

    #[sea_orm(has_many, via = "recipe_dish_type")]
    pub dish_types: HasMany<super::dish_type::Entity>,

    /// Optimistic-concurrency token, bumped on every update.
    #[sea_orm(default_value = 0)]
    pub version: i32,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

pub fn to_json_list(items: &[String]) -> serde_json::Value {
    serde_json::Value::from(items.to_vec())
}

/// Read back a list written by [`to_json_list`]. Non-string entries are skipped.
pub fn from_json_list(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
