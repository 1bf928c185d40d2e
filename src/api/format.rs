//! Public wire formats.
//!
//! Every persisted entity is exposed with a string `id`; internal column
//! names and the password hash never appear here.

use serde::Serialize;

use crate::database::models::{Post, PostWithOwner, User};

/// Post owner as embedded in a post body: either the bare user id (create
/// responses) or the expanded public profile (listings).
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PostOwner {
    Id(String),
    Expanded(OwnerSummary),
}

#[derive(Debug, Serialize)]
pub struct OwnerSummary {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub url: String,
    pub likes: i32,
    pub user: PostOwner,
}

impl PostResponse {
    /// Shape a freshly created post; the owner stays a plain id reference.
    pub fn created(post: &Post) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title.clone(),
            author: post.author.clone(),
            url: post.url.clone(),
            likes: post.likes,
            user: PostOwner::Id(post.user_id.to_string()),
        }
    }

    /// Shape a listed post with the owner expanded to its public fields.
    pub fn with_owner(row: &PostWithOwner) -> Self {
        Self {
            id: row.id.to_string(),
            title: row.title.clone(),
            author: row.author.clone(),
            url: row.url.clone(),
            likes: row.likes,
            user: PostOwner::Expanded(OwnerSummary {
                id: row.user_id.to_string(),
                username: row.username.clone(),
                name: row.owner_name.clone(),
            }),
        }
    }
}

/// Post as embedded in a user body
#[derive(Debug, Serialize)]
pub struct PostSummary {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub url: String,
}

impl PostSummary {
    pub fn from_post(post: &Post) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title.clone(),
            author: post.author.clone(),
            url: post.url.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub posts: Vec<PostSummary>,
}

impl UserResponse {
    pub fn new(user: &User, posts: Vec<PostSummary>) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            name: user.name.clone(),
            posts,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub id: String,
}
