use sea_orm::ConnectionTrait;
use tracing::info;

use crate::error::AppError;
use crate::models::dish_type::DishTypeResponse;
use crate::store::EntityStore;

pub struct DishTypeCatalog<'a, C: ConnectionTrait> {
    store: EntityStore<'a, C>,
}

impl<'a, C: ConnectionTrait> DishTypeCatalog<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self {
            store: EntityStore::new(conn),
        }
    }

    pub async fn list(&self) -> Result<Vec<DishTypeResponse>, AppError> {
        let rows = self.store.all_dish_types().await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: i32) -> Result<DishTypeResponse, AppError> {
        Ok(self.store.require_dish_type(id).await?.into())
    }

    pub async fn create(&self, name: &str) -> Result<DishTypeResponse, AppError> {
        let created = self.store.insert_dish_type(name.trim().to_string()).await?;
        info!(dish_type_id = created.id, name = %created.name, "Dish type created");
        Ok(created.into())
    }

    pub async fn rename(&self, id: i32, name: &str) -> Result<DishTypeResponse, AppError> {
        let renamed = self
            .store
            .rename_dish_type(id, name.trim().to_string())
            .await?;
        Ok(renamed.into())
    }

    /// Delete a dish type. Recipes keep existing; only their links go.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.store.delete_dish_type(id).await?;
        info!(dish_type_id = id, "Dish type deleted");
        Ok(())
    }
}
