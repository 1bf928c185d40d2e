use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::format::PostResponse;
use crate::database::repository::PostRepository;
use crate::error::ApiError;
use crate::AppState;

use super::parse_post_id;

/// GET /posts/:id - fetch a single post with the owner expanded
pub async fn post_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PostResponse>, ApiError> {
    let id = parse_post_id(&id)?;

    let row = PostRepository::new(state.pool)
        .find_with_owner(id)
        .await?
        .ok_or_else(ApiError::not_found)?;

    Ok(Json(PostResponse::with_owner(&row)))
}
