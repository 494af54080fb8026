use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;

/// JWT Claims structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Login name
    pub uid: String, // User ID
    pub jti: String, // Unique token ID
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64, // Expiration timestamp
}

/// Sign a new token for a user, valid for `auth.token_ttl_minutes` from now.
pub fn sign(user_id: &str, username: &str, auth: &AuthConfig) -> Result<String> {
    sign_at(user_id, username, auth, Utc::now())
}

/// Sign a token as if it had been issued at `issued_at`.
pub fn sign_at(
    user_id: &str,
    username: &str,
    auth: &AuthConfig,
    issued_at: DateTime<Utc>,
) -> Result<String> {
    let expiration = issued_at
        .checked_add_signed(Duration::minutes(auth.token_ttl_minutes))
        .context("token expiry out of range")?;

    let claims = Claims {
        sub: username.to_owned(),
        uid: user_id.to_owned(),
        jti: Uuid::new_v4().to_string(),
        iss: auth.issuer.clone(),
        aud: auth.audience.clone(),
        iat: issued_at.timestamp(),
        exp: expiration.timestamp(),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(auth.jwt_secret.as_bytes()),
    )?;

    Ok(token)
}

/// Verify signature, issuer, audience and expiry (no clock-skew leeway).
pub fn verify(token: &str, auth: &AuthConfig) -> Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_issuer(&[&auth.issuer]);
    validation.set_audience(&[&auth.audience]);
    validation.set_required_spec_claims(&["exp", "iss", "aud"]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(auth.jwt_secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}
