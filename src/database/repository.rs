use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{Post, PostWithOwner, User};

const POST_WITH_OWNER_COLUMNS: &str = "p.id, p.title, p.author, p.url, p.likes, p.user_id, \
     u.username AS username, u.name AS owner_name";

/// Fields for a user row about to be inserted
#[derive(Debug)]
pub struct NewUser {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String,
}

/// Fields for a post row about to be inserted
#[derive(Debug)]
pub struct NewPost {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i32,
    pub user_id: Uuid,
}

/// Partial update applied by PUT /posts/:id; absent fields keep their value
#[derive(Debug, Default)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i32>,
}

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, user: NewUser) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, username, name, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING id, username, name, password_hash, created_at",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.name)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, name, password_hash, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, name, password_hash, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn list_all(&self) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, name, password_hash, created_at FROM users ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await
    }
}

pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, post: NewPost) -> Result<Post, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            "INSERT INTO posts (id, title, author, url, likes, user_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, title, author, url, likes, user_id, created_at",
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.author)
        .bind(&post.url)
        .bind(post.likes)
        .bind(post.user_id)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn list_with_owners(&self) -> Result<Vec<PostWithOwner>, sqlx::Error> {
        let sql = format!(
            "SELECT {POST_WITH_OWNER_COLUMNS}
             FROM posts p JOIN users u ON u.id = p.user_id
             ORDER BY p.created_at"
        );
        sqlx::query_as::<_, PostWithOwner>(&sql).fetch_all(&self.pool).await
    }

    pub async fn find_with_owner(&self, id: Uuid) -> Result<Option<PostWithOwner>, sqlx::Error> {
        let sql = format!(
            "SELECT {POST_WITH_OWNER_COLUMNS}
             FROM posts p JOIN users u ON u.id = p.user_id
             WHERE p.id = $1"
        );
        sqlx::query_as::<_, PostWithOwner>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            "SELECT id, title, author, url, likes, user_id, created_at FROM posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Apply a partial update; a missing post is a silent no-op, matching the
    /// unauthenticated update endpoint's contract.
    pub async fn update_fields(&self, id: Uuid, update: PostUpdate) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE posts
             SET title = COALESCE($2, title),
                 author = COALESCE($3, author),
                 url = COALESCE($4, url),
                 likes = COALESCE($5, likes)
             WHERE id = $1",
        )
        .bind(id)
        .bind(&update.title)
        .bind(&update.author)
        .bind(&update.url)
        .bind(update.likes)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// All posts in creation order, for expanding each user's owned posts
    pub async fn list_all(&self) -> Result<Vec<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            "SELECT id, title, author, url, likes, user_id, created_at FROM posts ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await
    }
}
