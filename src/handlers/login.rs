use axum::{extract::State, Json};
use serde::Deserialize;

use crate::api::format::LoginResponse;
use crate::auth::{self, Claims};
use crate::config;
use crate::database::repository::UserRepository;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /login - verify credentials and issue a bearer token
pub async fn login_post(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = UserRepository::new(state.pool)
        .find_by_username(&body.username)
        .await?
        .ok_or_else(|| ApiError::not_found_with("user not found!"))?;

    let password = body.password;
    let password_hash = user.password_hash.clone();
    let password_matches =
        tokio::task::spawn_blocking(move || auth::verify_password(&password, &password_hash))
            .await
            .map_err(|e| {
                tracing::error!("hashing task failed: {}", e);
                ApiError::internal_server_error("An error occurred while processing your request")
            })??;

    if !password_matches {
        return Err(ApiError::unauthorized("password incorrect"));
    }

    let claims = Claims {
        username: user.username.clone(),
        id: user.id,
    };
    let token = auth::generate_token(&claims, &config::config().security.token_secret)?;

    Ok(Json(LoginResponse {
        token,
        username: user.username,
        id: user.id.to_string(),
    }))
}
