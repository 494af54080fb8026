use sea_orm::ConnectionTrait;
use tracing::info;

use super::{claim_author, ensure_author, projection};
use crate::entity::comment;
use crate::error::AppError;
use crate::models::comment::{CommentResponse, CreateCommentRequest, UpdateCommentRequest};
use crate::store::EntityStore;

pub struct CommentCatalog<'a, C: ConnectionTrait> {
    store: EntityStore<'a, C>,
}

impl<'a, C: ConnectionTrait> CommentCatalog<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self {
            store: EntityStore::new(conn),
        }
    }

    pub async fn list(&self) -> Result<Vec<CommentResponse>, AppError> {
        let comments = self.store.all_comments().await?;
        Ok(projection::comment_responses(&self.store, comments).await?)
    }

    pub async fn get(&self, id: i32) -> Result<CommentResponse, AppError> {
        let comment = self.store.require_comment(id).await?;
        self.response(comment).await
    }

    /// Comments on a recipe, oldest first. A missing recipe and a recipe
    /// without comments are both `NotFound`, with different messages.
    pub async fn list_by_recipe(&self, recipe_id: i32) -> Result<Vec<CommentResponse>, AppError> {
        self.store.require_recipe(recipe_id).await?;
        let comments = self.store.comments_by_recipe(recipe_id).await?;
        if comments.is_empty() {
            return Err(AppError::NotFound(format!(
                "No comments found for recipe {recipe_id}"
            )));
        }
        Ok(projection::comment_responses(&self.store, comments).await?)
    }

    pub async fn create(
        &self,
        caller_id: &str,
        payload: CreateCommentRequest,
    ) -> Result<CommentResponse, AppError> {
        let author_id = claim_author(&self.store, payload.author_id, caller_id).await?;
        let created = self
            .store
            .insert_comment(
                payload.recipe_id,
                Some(author_id.as_str()),
                payload.content.trim().to_string(),
            )
            .await?;

        info!(comment_id = created.id, recipe_id = created.recipe_id, "Comment created");
        self.response(created).await
    }

    pub async fn update(
        &self,
        caller_id: &str,
        id: i32,
        payload: UpdateCommentRequest,
    ) -> Result<CommentResponse, AppError> {
        let existing = self.store.require_comment(id).await?;
        ensure_author(existing.author_id.as_deref(), caller_id)?;

        let updated = self
            .store
            .update_comment_content(id, payload.content.trim().to_string())
            .await?;
        self.response(updated).await
    }

    pub async fn delete(&self, caller_id: &str, id: i32) -> Result<(), AppError> {
        let existing = self.store.require_comment(id).await?;
        ensure_author(existing.author_id.as_deref(), caller_id)?;

        self.store.delete_comment(id).await?;
        info!(comment_id = id, "Comment deleted");
        Ok(())
    }

    async fn response(&self, comment: comment::Model) -> Result<CommentResponse, AppError> {
        projection::comment_responses(&self.store, vec![comment])
            .await?
            .pop()
            .ok_or_else(|| AppError::Internal("empty comment projection".into()))
    }
}
