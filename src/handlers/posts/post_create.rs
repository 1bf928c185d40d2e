use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::format::PostResponse;
use crate::database::repository::{NewPost, PostRepository, UserRepository};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i32>,
}

/// POST /posts - create a post owned by the token's user
pub async fn post_create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    // title and url are required; likes defaults to 0
    let title = body
        .title
        .filter(|s| !s.is_empty())
        .ok_or_else(ApiError::validation_failure)?;
    let url = body
        .url
        .filter(|s| !s.is_empty())
        .ok_or_else(ApiError::validation_failure)?;

    // The owner is looked up from the token subject, never from the body.
    // A token whose user no longer exists is a stale credential.
    let owner = UserRepository::new(state.pool.clone())
        .find_by_id(user.user_id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("invalid token"))?;

    let post = PostRepository::new(state.pool)
        .insert(NewPost {
            id: Uuid::new_v4(),
            title,
            author: body.author,
            url,
            likes: body.likes.unwrap_or(0),
            user_id: owner.id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(PostResponse::created(&post))))
}
