//! In-memory post store
//!
//! One `RwLock<Vec<Post>>`: reads take the shared guard, every mutation
//! happens entirely under the exclusive guard. Lookups are a linear scan,
//! O(n) per call. Fine for a demo, not meant to scale.
//!
//! Ids are `last element's id + 1` (or 1 when empty) and deletes use
//! swap-with-last removal, so a delete followed by a create can hand out an
//! id that is still live. See `delete_then_create_can_reissue_live_id`.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{PostStore, StoreError};
use crate::models::{Post, PostDraft, PostId};

/// Id given to the first post of an empty store
const FIRST_ID: PostId = PostId::new(1);

/// Post store held in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    posts: RwLock<Vec<Post>>,
}

fn position(posts: &[Post], id: PostId) -> Option<usize> {
    posts.iter().position(|p| p.id == id)
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing set of posts, kept in the given order.
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: RwLock::new(posts),
        }
    }

    /// Snapshot of all posts in current order.
    pub async fn list(&self) -> Vec<Post> {
        self.posts.read().await.clone()
    }

    /// Index of the post with `id`, if present.
    pub async fn find(&self, id: PostId) -> Option<usize> {
        position(&self.posts.read().await, id)
    }

    pub async fn get(&self, id: PostId) -> Result<Post, StoreError> {
        let posts = self.posts.read().await;
        position(&posts, id)
            .map(|i| posts[i].clone())
            .ok_or(StoreError::NotFound { id })
    }

    /// Fails when the last post already holds `i64::MAX`.
    pub async fn create(&self, draft: PostDraft) -> Result<Post, StoreError> {
        let mut posts = self.posts.write().await;
        let id = match posts.last() {
            Some(last) => last
                .id
                .next()
                .ok_or(StoreError::IdsExhausted { last: last.id })?,
            None => FIRST_ID,
        };
        let post = Post::from_draft(id, draft);
        posts.push(post.clone());
        tracing::debug!(%id, "created post");
        Ok(post)
    }

    pub async fn update(&self, id: PostId, draft: PostDraft) -> Result<Post, StoreError> {
        let mut posts = self.posts.write().await;
        let i = position(&posts, id).ok_or(StoreError::NotFound { id })?;
        let post = &mut posts[i];
        post.title = draft.title;
        post.body = draft.body;
        Ok(post.clone())
    }

    pub async fn delete(&self, id: PostId) -> Result<(), StoreError> {
        let mut posts = self.posts.write().await;
        let i = position(&posts, id).ok_or(StoreError::NotFound { id })?;
        posts.swap_remove(i);
        tracing::debug!(%id, remaining = posts.len(), "deleted post");
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.posts.read().await.is_empty()
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn list(&self) -> Result<Vec<Post>, StoreError> {
        Ok(MemoryStore::list(self).await)
    }

    async fn get(&self, id: PostId) -> Result<Post, StoreError> {
        MemoryStore::get(self, id).await
    }

    async fn create(&self, draft: PostDraft) -> Result<Post, StoreError> {
        MemoryStore::create(self, draft).await
    }

    async fn update(&self, id: PostId, draft: PostDraft) -> Result<Post, StoreError> {
        MemoryStore::update(self, id, draft).await
    }

    async fn delete(&self, id: PostId) -> Result<(), StoreError> {
        MemoryStore::delete(self, id).await
    }
}
