use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Request body for posting a comment. Any client-supplied timestamp is
/// ignored; the server stamps the comment on insert.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateCommentRequest {
    #[schema(example = "Made this twice already!")]
    pub content: String,
    #[schema(example = 7)]
    pub recipe_id: i32,
    /// Author of the comment. Defaults to the authenticated caller. Another
    /// user's id is refused.
    pub author_id: Option<String>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateCommentRequest {
    pub content: String,
}

pub fn validate_content(content: &str) -> Result<(), AppError> {
    let content = content.trim();
    if content.is_empty() || content.chars().count() > 4000 {
        return Err(AppError::Validation(
            "Content must be 1-4000 characters".into(),
        ));
    }
    Ok(())
}

/// A comment with its author's display name resolved.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CommentResponse {
    pub id: i32,
    pub content: String,
    pub recipe_id: i32,
    pub author_id: Option<String>,
    /// "First Last"; `null` when the author's account is gone.
    pub author_name: Option<String>,
    pub created_at: DateTime<Utc>,
}
