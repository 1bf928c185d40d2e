use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::database::repository::PostRepository;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::AppState;

use super::parse_post_id;

/// DELETE /posts/:id - delete a post; only its owner may do so
pub async fn post_delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_post_id(&id)?;
    let repository = PostRepository::new(state.pool);

    let post = repository
        .find_by_id(id)
        .await?
        .ok_or_else(ApiError::not_found)?;

    if post.user_id != user.user_id {
        return Err(ApiError::unauthorized("you did not create this blog!"));
    }

    repository.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
