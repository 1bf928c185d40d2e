use axum::{extract::State, Json};

use crate::api::format::PostResponse;
use crate::database::repository::PostRepository;
use crate::error::ApiError;
use crate::AppState;

/// GET /posts - list all posts with the owner expanded
pub async fn post_list(State(state): State<AppState>) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let rows = PostRepository::new(state.pool).list_with_owners().await?;

    Ok(Json(rows.iter().map(PostResponse::with_owner).collect()))
}
