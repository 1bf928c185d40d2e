use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::database::repository::{PostRepository, PostUpdate};
use crate::error::ApiError;
use crate::AppState;

use super::parse_post_id;

/// Partial update body; absent fields keep their stored value
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<i32>,
}

/// PUT /posts/:id - update fields of a post (in practice, `likes`)
///
/// No authentication or ownership check; the response echoes the submitted
/// body rather than the persisted row, and an unknown id is a silent no-op.
pub async fn post_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdatePostRequest>,
) -> Result<Json<UpdatePostRequest>, ApiError> {
    let id = parse_post_id(&id)?;

    PostRepository::new(state.pool)
        .update_fields(
            id,
            PostUpdate {
                title: body.title.clone(),
                author: body.author.clone(),
                url: body.url.clone(),
                likes: body.likes,
            },
        )
        .await?;

    Ok(Json(body))
}
