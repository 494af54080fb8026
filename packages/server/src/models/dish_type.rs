use serde::{Deserialize, Serialize};

use super::shared::validate_name;
use crate::error::AppError;

/// Request body for creating or renaming a dish type.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct DishTypeRequest {
    #[schema(example = "Dessert")]
    pub name: String,
}

pub fn validate_dish_type(payload: &DishTypeRequest) -> Result<(), AppError> {
    validate_name(&payload.name, "Name")
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DishTypeResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Dessert")]
    pub name: String,
}

impl From<crate::entity::dish_type::Model> for DishTypeResponse {
    fn from(m: crate::entity::dish_type::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}
