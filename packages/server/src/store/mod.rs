//! Entity Store: typed access to persisted rows plus the referential rules
//! that span more than one table.
//!
//! Multi-row operations (`delete_recipe`, `delete_user`, `replace_dish_types`,
//! ...) issue several statements; run them on a transaction when they must be
//! all-or-nothing.

mod error;

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::debug;

use crate::entity::{comment, dish_type, recipe, recipe_dish_type, user};

pub use error::StoreError;

pub struct EntityStore<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> EntityStore<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    // ---- users ----------------------------------------------------------

    pub async fn find_user(&self, id: &str) -> Result<Option<user::Model>, DbErr> {
        user::Entity::find_by_id(id.to_string()).one(self.conn).await
    }

    /// Look up an account by login name, ignoring case.
    pub async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<user::Model>, DbErr> {
        user::Entity::find()
            .filter(user::Column::NormalizedUsername.eq(user::normalize_username(username)))
            .one(self.conn)
            .await
    }

    /// Resolve a user id supplied as a foreign key.
    pub async fn require_user(&self, id: &str) -> Result<user::Model, StoreError> {
        self.find_user(id)
            .await?
            .ok_or_else(|| StoreError::reference("User", id))
    }

    pub async fn users_by_id(
        &self,
        ids: Vec<String>,
    ) -> Result<HashMap<String, user::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let users = user::Entity::find()
            .filter(user::Column::Id.is_in(ids))
            .all(self.conn)
            .await?;
        Ok(users.into_iter().map(|u| (u.id.clone(), u)).collect())
    }

    /// Delete an account. Recipes and comments it authored survive with
    /// their `author_id` cleared (set-null policy).
    pub async fn delete_user(&self, id: &str) -> Result<(), StoreError> {
        if self.find_user(id).await?.is_none() {
            return Err(StoreError::not_found("User", id));
        }

        let detached_recipes = recipe::Entity::update_many()
            .col_expr(recipe::Column::AuthorId, Expr::value(Option::<String>::None))
            .filter(recipe::Column::AuthorId.eq(id))
            .exec(self.conn)
            .await?
            .rows_affected;
        let detached_comments = comment::Entity::update_many()
            .col_expr(comment::Column::AuthorId, Expr::value(Option::<String>::None))
            .filter(comment::Column::AuthorId.eq(id))
            .exec(self.conn)
            .await?
            .rows_affected;

        user::Entity::delete_by_id(id.to_string())
            .exec(self.conn)
            .await?;

        debug!(
            user_id = id,
            detached_recipes, detached_comments, "User deleted, authorship detached"
        );
        Ok(())
    }

    // ---- recipes --------------------------------------------------------

    pub async fn find_recipe(&self, id: i32) -> Result<Option<recipe::Model>, DbErr> {
        recipe::Entity::find_by_id(id).one(self.conn).await
    }

    pub async fn require_recipe(&self, id: i32) -> Result<recipe::Model, StoreError> {
        self.find_recipe(id)
            .await?
            .ok_or_else(|| StoreError::not_found("Recipe", id))
    }

    pub async fn all_recipes(&self) -> Result<Vec<recipe::Model>, DbErr> {
        recipe::Entity::find()
            .order_by_asc(recipe::Column::Id)
            .all(self.conn)
            .await
    }

    pub async fn recipes_by_author(&self, author_id: &str) -> Result<Vec<recipe::Model>, DbErr> {
        recipe::Entity::find()
            .filter(recipe::Column::AuthorId.eq(author_id))
            .order_by_asc(recipe::Column::Id)
            .all(self.conn)
            .await
    }

    pub async fn recipes_by_dish_type(
        &self,
        dish_type_id: i32,
    ) -> Result<Vec<recipe::Model>, DbErr> {
        let recipe_ids: Vec<i32> = recipe_dish_type::Entity::find()
            .filter(recipe_dish_type::Column::DishTypeId.eq(dish_type_id))
            .select_only()
            .column(recipe_dish_type::Column::RecipeId)
            .into_tuple()
            .all(self.conn)
            .await?;

        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }

        recipe::Entity::find()
            .filter(recipe::Column::Id.is_in(recipe_ids))
            .order_by_asc(recipe::Column::Id)
            .all(self.conn)
            .await
    }

    /// Insert a recipe row. A set `author_id` must reference an existing user.
    pub async fn insert_recipe(
        &self,
        mut model: recipe::ActiveModel,
    ) -> Result<recipe::Model, StoreError> {
        if let ActiveValue::Set(Some(author_id)) = &model.author_id {
            self.require_user(author_id).await?;
        }

        let now = Utc::now();
        model.version = Set(0);
        model.created_at = Set(now);
        model.updated_at = Set(now);

        Ok(model.insert(self.conn).await?)
    }

    /// Apply `changes` only if the row still carries `expected_version`.
    ///
    /// Zero affected rows means the row either vanished (`NotFound`) or was
    /// rewritten by someone else since it was read (`ConcurrencyConflict`).
    pub async fn update_recipe(
        &self,
        id: i32,
        expected_version: i32,
        mut changes: recipe::ActiveModel,
    ) -> Result<recipe::Model, StoreError> {
        if let ActiveValue::Set(Some(author_id)) = &changes.author_id {
            self.require_user(author_id).await?;
        }

        changes.id = ActiveValue::NotSet;
        changes.version = Set(expected_version + 1);
        changes.updated_at = Set(Utc::now());

        let result = recipe::Entity::update_many()
            .set(changes)
            .filter(recipe::Column::Id.eq(id))
            .filter(recipe::Column::Version.eq(expected_version))
            .exec(self.conn)
            .await?;

        if result.rows_affected == 0 {
            return match self.find_recipe(id).await? {
                None => Err(StoreError::not_found("Recipe", id)),
                Some(_) => Err(StoreError::conflict("Recipe", id)),
            };
        }

        self.require_recipe(id).await
    }

    /// Delete a recipe together with its comments and dish-type links
    /// (cascade policy).
    pub async fn delete_recipe(&self, id: i32) -> Result<(), StoreError> {
        self.require_recipe(id).await?;

        let comments = comment::Entity::delete_many()
            .filter(comment::Column::RecipeId.eq(id))
            .exec(self.conn)
            .await?
            .rows_affected;
        let links = recipe_dish_type::Entity::delete_many()
            .filter(recipe_dish_type::Column::RecipeId.eq(id))
            .exec(self.conn)
            .await?
            .rows_affected;
        recipe::Entity::delete_by_id(id).exec(self.conn).await?;

        debug!(recipe_id = id, comments, links, "Recipe deleted with dependents");
        Ok(())
    }

    // ---- dish types & associations --------------------------------------

    pub async fn find_dish_type(&self, id: i32) -> Result<Option<dish_type::Model>, DbErr> {
        dish_type::Entity::find_by_id(id).one(self.conn).await
    }

    pub async fn require_dish_type(&self, id: i32) -> Result<dish_type::Model, StoreError> {
        self.find_dish_type(id)
            .await?
            .ok_or_else(|| StoreError::not_found("Dish type", id))
    }

    pub async fn all_dish_types(&self) -> Result<Vec<dish_type::Model>, DbErr> {
        dish_type::Entity::find()
            .order_by_asc(dish_type::Column::Id)
            .all(self.conn)
            .await
    }

    pub async fn dish_types_by_id(
        &self,
        ids: Vec<i32>,
    ) -> Result<HashMap<i32, dish_type::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = dish_type::Entity::find()
            .filter(dish_type::Column::Id.is_in(ids))
            .all(self.conn)
            .await?;
        Ok(rows.into_iter().map(|d| (d.id, d)).collect())
    }

    pub async fn insert_dish_type(&self, name: String) -> Result<dish_type::Model, StoreError> {
        let model = dish_type::ActiveModel {
            name: Set(name),
            ..Default::default()
        };
        Ok(model.insert(self.conn).await?)
    }

    /// Rename a dish type. Not version-guarded: last writer wins.
    pub async fn rename_dish_type(
        &self,
        id: i32,
        name: String,
    ) -> Result<dish_type::Model, StoreError> {
        let existing = self.require_dish_type(id).await?;
        let mut active: dish_type::ActiveModel = existing.into();
        active.name = Set(name);
        Ok(active.update(self.conn).await?)
    }

    /// Delete a dish type and its association rows; linked recipes stay.
    pub async fn delete_dish_type(&self, id: i32) -> Result<(), StoreError> {
        self.require_dish_type(id).await?;

        let links = recipe_dish_type::Entity::delete_many()
            .filter(recipe_dish_type::Column::DishTypeId.eq(id))
            .exec(self.conn)
            .await?
            .rows_affected;
        dish_type::Entity::delete_by_id(id).exec(self.conn).await?;

        debug!(dish_type_id = id, links, "Dish type deleted");
        Ok(())
    }

    /// Link a recipe to a dish type. Both ends must exist; linking an
    /// already-linked pair is a no-op.
    pub async fn link_dish_type(&self, recipe_id: i32, dish_type_id: i32) -> Result<(), StoreError> {
        if self.find_recipe(recipe_id).await?.is_none() {
            return Err(StoreError::reference("Recipe", recipe_id));
        }
        if self.find_dish_type(dish_type_id).await?.is_none() {
            return Err(StoreError::reference("Dish type", dish_type_id));
        }

        let link = recipe_dish_type::ActiveModel {
            recipe_id: Set(recipe_id),
            dish_type_id: Set(dish_type_id),
            ..Default::default()
        };
        let result = recipe_dish_type::Entity::insert(link)
            .on_conflict(
                OnConflict::columns([
                    recipe_dish_type::Column::RecipeId,
                    recipe_dish_type::Column::DishTypeId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(self.conn)
            .await;

        match result {
            Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the whole association set of a recipe (delete-all-then-insert).
    pub async fn replace_dish_types(
        &self,
        recipe_id: i32,
        dish_type_ids: &[i32],
    ) -> Result<(), StoreError> {
        recipe_dish_type::Entity::delete_many()
            .filter(recipe_dish_type::Column::RecipeId.eq(recipe_id))
            .exec(self.conn)
            .await?;

        for &dish_type_id in dish_type_ids {
            self.link_dish_type(recipe_id, dish_type_id).await?;
        }
        Ok(())
    }

    /// Dish-type ids per recipe, each list in ascending id order.
    pub async fn dish_type_ids_by_recipe(
        &self,
        recipe_ids: Vec<i32>,
    ) -> Result<HashMap<i32, Vec<i32>>, DbErr> {
        if recipe_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let links = recipe_dish_type::Entity::find()
            .filter(recipe_dish_type::Column::RecipeId.is_in(recipe_ids))
            .order_by_asc(recipe_dish_type::Column::DishTypeId)
            .all(self.conn)
            .await?;

        let mut by_recipe: HashMap<i32, Vec<i32>> = HashMap::new();
        for link in links {
            by_recipe
                .entry(link.recipe_id)
                .or_default()
                .push(link.dish_type_id);
        }
        Ok(by_recipe)
    }

    // ---- comments -------------------------------------------------------

    pub async fn find_comment(&self, id: i32) -> Result<Option<comment::Model>, DbErr> {
        comment::Entity::find_by_id(id).one(self.conn).await
    }

    pub async fn require_comment(&self, id: i32) -> Result<comment::Model, StoreError> {
        self.find_comment(id)
            .await?
            .ok_or_else(|| StoreError::not_found("Comment", id))
    }

    pub async fn all_comments(&self) -> Result<Vec<comment::Model>, DbErr> {
        comment::Entity::find()
            .order_by_asc(comment::Column::CreatedAt)
            .order_by_asc(comment::Column::Id)
            .all(self.conn)
            .await
    }

    pub async fn comments_by_recipe(&self, recipe_id: i32) -> Result<Vec<comment::Model>, DbErr> {
        comment::Entity::find()
            .filter(comment::Column::RecipeId.eq(recipe_id))
            .order_by_asc(comment::Column::CreatedAt)
            .order_by_asc(comment::Column::Id)
            .all(self.conn)
            .await
    }

    /// Insert a comment stamped with the current time. The recipe and, when
    /// given, the author must exist.
    pub async fn insert_comment(
        &self,
        recipe_id: i32,
        author_id: Option<&str>,
        content: String,
    ) -> Result<comment::Model, StoreError> {
        if self.find_recipe(recipe_id).await?.is_none() {
            return Err(StoreError::reference("Recipe", recipe_id));
        }
        if let Some(author_id) = author_id {
            self.require_user(author_id).await?;
        }

        let model = comment::ActiveModel {
            content: Set(content),
            recipe_id: Set(recipe_id),
            author_id: Set(author_id.map(str::to_string)),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        Ok(model.insert(self.conn).await?)
    }

    /// Replace a comment's content. Not version-guarded: last writer wins.
    pub async fn update_comment_content(
        &self,
        id: i32,
        content: String,
    ) -> Result<comment::Model, StoreError> {
        let existing = self.require_comment(id).await?;
        let mut active: comment::ActiveModel = existing.into();
        active.content = Set(content);
        Ok(active.update(self.conn).await?)
    }

    pub async fn delete_comment(&self, id: i32) -> Result<(), StoreError> {
        let result = comment::Entity::delete_by_id(id).exec(self.conn).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::not_found("Comment", id));
        }
        Ok(())
    }
}
