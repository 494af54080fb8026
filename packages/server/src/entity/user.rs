use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    /// Opaque, stable identifier (UUID v4).
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub username: String,
    /// Lowercase copy of `username`; makes login names unique case-insensitively.
    #[sea_orm(unique)]
    pub normalized_username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password: String,

    #[sea_orm(has_many)]
    pub recipes: HasMany<super::recipe::Entity>,

    #[sea_orm(has_many)]
    pub comments: HasMany<super::comment::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

/// Normalized form used for the uniqueness check and login lookups.
pub fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}

/// "First Last", or `None` when both parts are blank.
pub fn display_name(first_name: &str, last_name: &str) -> Option<String> {
    let name = format!("{} {}", first_name.trim(), last_name.trim());
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
