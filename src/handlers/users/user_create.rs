use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::format::UserResponse;
use crate::auth;
use crate::config;
use crate::database::repository::{NewUser, UserRepository};
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub name: Option<String>,
    pub password: String,
}

fn validate_new_user(body: &CreateUserRequest) -> Result<(), ApiError> {
    if body.username.chars().count() < 3 {
        return Err(ApiError::bad_request("username must be at least 3 char long"));
    }
    if body.password.chars().count() < 3 {
        return Err(ApiError::bad_request("password must be at least 3 char long"));
    }
    Ok(())
}

/// POST /users - register a new user
pub async fn user_create(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    validate_new_user(&body)?;

    // bcrypt is CPU-bound; keep it off the async worker threads
    let cost = config::config().security.bcrypt_cost;
    let password = body.password;
    let password_hash = tokio::task::spawn_blocking(move || auth::hash_password(&password, cost))
        .await
        .map_err(|e| {
            tracing::error!("hashing task failed: {}", e);
            ApiError::internal_server_error("An error occurred while processing your request")
        })??;

    // Username uniqueness is enforced by the store; a violation surfaces
    // as a 400 naming the username constraint
    let user = UserRepository::new(state.pool)
        .insert(NewUser {
            id: Uuid::new_v4(),
            username: body.username,
            name: body.name,
            password_hash,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::new(&user, Vec::new()))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, password: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            name: None,
            password: password.to_string(),
        }
    }

    #[test]
    fn short_username_names_the_minimum_length_rule() {
        let err = validate_new_user(&request("ab", "password")).unwrap_err();
        assert_eq!(err.message(), Some("username must be at least 3 char long"));
    }

    #[test]
    fn short_password_names_the_minimum_length_rule() {
        let err = validate_new_user(&request("root", "pw")).unwrap_err();
        assert_eq!(err.message(), Some("password must be at least 3 char long"));
    }

    #[test]
    fn three_characters_is_enough() {
        assert!(validate_new_user(&request("abc", "pwd")).is_ok());
    }
}
