//! Post storage contract
//!
//! Both backends implement [`PostStore`]:
//! - [`MemoryStore`]: a single RwLock over a Vec, linear search
//! - [`crate::db::PgPostRepo`]: one parameterized statement per call
//!
//! NotFound is synthesized by the backend (absent id, or zero rows
//! affected). Everything else passes through as [`StoreError::Database`],
//! except the in-memory store running out of ids.

pub mod memory;

use async_trait::async_trait;

use crate::models::{Post, PostDraft, PostId};

pub use memory::MemoryStore;

/// Store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("not found: post '{id}'")]
    NotFound { id: PostId },

    #[error("no id left after post '{last}'")]
    IdsExhausted { last: PostId },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// CRUD over posts, safe to share between request tasks.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Short backend name for logs and the health endpoint.
    fn backend(&self) -> &'static str;

    /// All current posts.
    async fn list(&self) -> Result<Vec<Post>, StoreError>;

    /// A single post by id.
    async fn get(&self, id: PostId) -> Result<Post, StoreError>;

    /// Store a new post. The backend assigns the id.
    async fn create(&self, draft: PostDraft) -> Result<Post, StoreError>;

    /// Replace title and body of an existing post. The id never changes.
    async fn update(&self, id: PostId, draft: PostDraft) -> Result<Post, StoreError>;

    /// Remove a post.
    async fn delete(&self, id: PostId) -> Result<(), StoreError>;
}
