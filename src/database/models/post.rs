use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A blog post row. `user_id` records the owner at creation time and is the
/// authority for delete authorization.
#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i32,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A post joined with the owning user's public fields, for listings where
/// the owner is expanded inline.
#[derive(Debug, Clone, FromRow)]
pub struct PostWithOwner {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i32,
    pub user_id: Uuid,
    pub username: String,
    pub owner_name: Option<String>,
}
