use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use uuid::Uuid;

use crate::auth::{self, AuthError, Claims};
use crate::config;
use crate::error::ApiError;

/// Authenticated user context extracted from a bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub username: String,
    pub user_id: Uuid,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.username,
            user_id: claims.id,
        }
    }
}

/// Extractor that rejects the request with 401 "invalid token" when the
/// Authorization header is missing, malformed, or the token does not verify.
#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)?;
        let secret = &config::config().security.token_secret;
        let claims = auth::verify_token(&token, secret)?;

        Ok(AuthUser::from(claims))
    }
}

/// Extract the bearer token from the Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, AuthError> {
    let auth_header = headers
        .get("authorization")
        .ok_or(AuthError::MissingToken)?;

    let auth_str = auth_header.to_str().map_err(|_| AuthError::MissingToken)?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.to_string()),
        _ => Err(AuthError::MissingToken),
    }
}
