use serde::{Deserialize, Serialize};

use super::auth::{validate_email, validate_password, validate_username};
use super::shared::validate_name;
use crate::error::AppError;

/// The authenticated user's own profile.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ProfileResponse {
    #[schema(example = "6f1c2a7e-3b7d-4a8e-9d0c-2f1e5b4a3c21")]
    pub id: String,
    #[schema(example = "Alice")]
    pub first_name: String,
    #[schema(example = "Liddell")]
    pub last_name: String,
    #[schema(example = "alice_wonder")]
    pub username: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
}

impl From<crate::entity::user::Model> for ProfileResponse {
    fn from(user: crate::entity::user::Model) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            username: user.username,
            email: user.email,
        }
    }
}

/// PATCH body for the profile. Absent fields are left unchanged.
#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    /// Required together with `new_password`.
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

pub fn validate_update_profile(payload: &UpdateProfileRequest) -> Result<(), AppError> {
    if let Some(ref first_name) = payload.first_name {
        validate_name(first_name, "First name")?;
    }
    if let Some(ref last_name) = payload.last_name {
        validate_name(last_name, "Last name")?;
    }
    if let Some(ref username) = payload.username {
        validate_username(username)?;
    }
    if let Some(ref email) = payload.email {
        validate_email(email)?;
    }
    if let Some(ref new_password) = payload.new_password {
        validate_password(new_password)?;
        if payload.current_password.as_deref().is_none_or(str::is_empty) {
            return Err(AppError::Validation(
                "current_password is required to set a new password".into(),
            ));
        }
    }
    Ok(())
}
