use std::collections::HashMap;

use axum::{extract::State, Json};
use uuid::Uuid;

use crate::api::format::{PostSummary, UserResponse};
use crate::database::repository::{PostRepository, UserRepository};
use crate::error::ApiError;
use crate::AppState;

/// GET /users - list all users with their owned posts expanded
pub async fn user_list(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = UserRepository::new(state.pool.clone()).list_all().await?;
    let posts = PostRepository::new(state.pool).list_all().await?;

    let mut posts_by_owner: HashMap<Uuid, Vec<PostSummary>> = HashMap::new();
    for post in &posts {
        posts_by_owner
            .entry(post.user_id)
            .or_default()
            .push(PostSummary::from_post(post));
    }

    let body = users
        .iter()
        .map(|user| UserResponse::new(user, posts_by_owner.remove(&user.id).unwrap_or_default()))
        .collect();

    Ok(Json(body))
}
