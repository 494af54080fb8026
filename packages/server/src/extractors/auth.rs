use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt;

/// Caller identity taken from the `Authorization: Bearer <token>` header.
///
/// Add this as a handler parameter to require authentication. Ownership
/// checks happen in the catalog services.
#[derive(Debug)]
pub struct AuthUser {
    pub user_id: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::TokenMissing)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AppError::TokenInvalid)?;

        let claims = jwt::verify(token, &state.config.auth).map_err(|e| {
            debug!(error = %e, "Rejected bearer token");
            AppError::TokenInvalid
        })?;

        debug!(user_id = %claims.uid, token_id = %claims.jti, "Authenticated request");

        Ok(AuthUser {
            user_id: claims.uid,
        })
    }
}
