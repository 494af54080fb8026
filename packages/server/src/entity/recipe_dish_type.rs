use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Unordered link between a recipe and a dish type; the composite key rules
/// out duplicate pairs.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipe_dish_type")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub recipe_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub dish_type_id: i32,
    #[sea_orm(belongs_to, from = "recipe_id", to = "id", on_delete = "Cascade")]
    pub recipe: HasOne<super::recipe::Entity>,
    #[sea_orm(belongs_to, from = "dish_type_id", to = "id", on_delete = "Cascade")]
    pub dish_type: HasOne<super::dish_type::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
