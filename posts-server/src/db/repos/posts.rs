//! Post repository
//!
//! Each call is a single parameterized statement:
//! - get: zero rows -> NotFound
//! - update/delete: zero rows affected -> NotFound
//! - create: id comes back from the identity column via RETURNING

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{Post, PostDraft, PostId};
use crate::store::{PostStore, StoreError};

/// Postgres-backed post store
#[derive(Debug, Clone)]
pub struct PgPostRepo {
    pool: PgPool,
}

impl PgPostRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgPostRepo {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    /// Full scan, no ordering.
    async fn list(&self) -> Result<Vec<Post>, StoreError> {
        let posts = sqlx::query_as::<_, Post>("SELECT id, title, body FROM posts")
            .fetch_all(&self.pool)
            .await?;
        Ok(posts)
    }

    async fn get(&self, id: PostId) -> Result<Post, StoreError> {
        sqlx::query_as::<_, Post>("SELECT id, title, body FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound { id })
    }

    async fn create(&self, draft: PostDraft) -> Result<Post, StoreError> {
        let id: PostId =
            sqlx::query_scalar("INSERT INTO posts (title, body) VALUES ($1, $2) RETURNING id")
                .bind(&draft.title)
                .bind(&draft.body)
                .fetch_one(&self.pool)
                .await?;

        tracing::debug!(%id, "inserted post");
        Ok(Post::from_draft(id, draft))
    }

    async fn update(&self, id: PostId, draft: PostDraft) -> Result<Post, StoreError> {
        let result = sqlx::query("UPDATE posts SET title = $1, body = $2 WHERE id = $3")
            .bind(&draft.title)
            .bind(&draft.body)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id });
        }

        Ok(Post::from_draft(id, draft))
    }

    async fn delete(&self, id: PostId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id });
        }

        tracing::debug!(%id, "deleted post");
        Ok(())
    }
}
