//! Post endpoints
//!
//! Path id is parsed before the body is read, and a failure at any step
//! short-circuits to an [`ApiError`]. Successful responses wrap the payload
//! in a `post` or `posts` envelope.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::extractors::{DraftBody, ValidPostId};
use crate::models::Post;
use crate::state::AppState;

/// Single post response
#[derive(Debug, Serialize, Deserialize)]
pub struct PostEnvelope {
    pub post: Post,
}

/// Post list response
#[derive(Debug, Serialize, Deserialize)]
pub struct PostsEnvelope {
    pub posts: Vec<Post>,
}

/// GET /posts - list all posts
async fn list_posts(State(state): State<AppState>) -> Result<Json<PostsEnvelope>, ApiError> {
    let posts = state.store().list().await?;
    Ok(Json(PostsEnvelope { posts }))
}

/// GET /posts/{id} - get a single post
async fn get_post(
    State(state): State<AppState>,
    ValidPostId(id): ValidPostId,
) -> Result<Json<PostEnvelope>, ApiError> {
    let post = state.store().get(id).await?;
    Ok(Json(PostEnvelope { post }))
}

/// POST /posts - create a post
async fn create_post(
    State(state): State<AppState>,
    DraftBody(draft): DraftBody,
) -> Result<Json<PostEnvelope>, ApiError> {
    let post = state.store().create(draft).await?;
    tracing::info!(id = %post.id, "post created");
    Ok(Json(PostEnvelope { post }))
}

/// PUT /posts/{id} - replace title and body
async fn update_post(
    State(state): State<AppState>,
    ValidPostId(id): ValidPostId,
    DraftBody(draft): DraftBody,
) -> Result<Json<PostEnvelope>, ApiError> {
    let post = state.store().update(id, draft).await?;
    Ok(Json(PostEnvelope { post }))
}

/// DELETE /posts/{id}
async fn delete_post(
    State(state): State<AppState>,
    ValidPostId(id): ValidPostId,
) -> Result<StatusCode, ApiError> {
    state.store().delete(id).await?;
    tracing::info!(%id, "post deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Post routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::models::{PostDraft, PostId};
    use crate::store::{MemoryStore, PostStore, StoreError};

    fn app_with(store: Arc<dyn PostStore>) -> Router {
        router().with_state(AppState::new(store))
    }

    fn app() -> Router {
        app_with(Arc::new(MemoryStore::new()))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(body.map(|b| Body::from(b.to_owned())).unwrap_or_else(Body::empty))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    /// Every call fails with a database error
    struct BrokenStore;

    #[async_trait]
    impl PostStore for BrokenStore {
        fn backend(&self) -> &'static str {
            "broken"
        }

        async fn list(&self) -> Result<Vec<Post>, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolClosed))
        }

        async fn get(&self, _id: PostId) -> Result<Post, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolClosed))
        }

        async fn create(&self, _draft: PostDraft) -> Result<Post, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolClosed))
        }

        async fn update(&self, _id: PostId, _draft: PostDraft) -> Result<Post, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolClosed))
        }

        async fn delete(&self, _id: PostId) -> Result<(), StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolClosed))
        }
    }

    #[tokio::test]
    async fn list_empty() {
        let (status, body) = send(&app(), Method::GET, "/posts", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"posts": []}));
    }

    #[tokio::test]
    async fn create_returns_200_with_envelope() {
        let (status, body) = send(
            &app(),
            Method::POST,
            "/posts",
            Some(r#"{"title":"A","body":"B"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"post": {"id": 1, "title": "A", "body": "B"}}));
    }

    #[tokio::test]
    async fn create_rejects_malformed_body() {
        let app = app();
        let (status, body) = send(&app, Method::POST, "/posts", Some("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");

        // Nothing reached the store
        let (_, body) = send(&app, Method::GET, "/posts", None).await;
        assert_eq!(body, json!({"posts": []}));
    }

    #[tokio::test]
    async fn create_rejects_empty_body() {
        let (status, _) = send(&app(), Method::POST, "/posts", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_accepts_null_and_trailing_data() {
        let app = app();

        let (status, body) = send(&app, Method::POST, "/posts", Some("null")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"post": {"id": 1, "title": "", "body": ""}}));

        let (status, body) = send(
            &app,
            Method::POST,
            "/posts",
            Some(r#"{"title":null,"body":"B"} trailing"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"post": {"id": 2, "title": "", "body": "B"}}));
    }

    #[tokio::test]
    async fn get_bad_id_is_400() {
        let (status, body) = send(&app(), Method::GET, "/posts/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "invalid id: 'abc'");
    }

    #[tokio::test]
    async fn get_missing_is_404() {
        let (status, body) = send(&app(), Method::GET, "/posts/7", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn update_replaces_fields() {
        let app = app();
        send(&app, Method::POST, "/posts", Some(r#"{"title":"A","body":"B"}"#)).await;

        let (status, body) = send(
            &app,
            Method::PUT,
            "/posts/1",
            Some(r#"{"title":"C","body":"D"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"post": {"id": 1, "title": "C", "body": "D"}}));

        let (_, body) = send(&app, Method::GET, "/posts/1", None).await;
        assert_eq!(body, json!({"post": {"id": 1, "title": "C", "body": "D"}}));
    }

    #[tokio::test]
    async fn update_errors() {
        let app = app();

        let (status, _) = send(&app, Method::PUT, "/posts/1", Some(r#"{"title":"x"}"#)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::PUT, "/posts/one", Some(r#"{"title":"x"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        send(&app, Method::POST, "/posts", Some("{}")).await;
        let (status, _) = send(&app, Method::PUT, "/posts/1", Some(r#"{"body":5}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn bad_id_is_reported_before_bad_body() {
        let (status, body) = send(&app(), Method::PUT, "/posts/x", Some("garbage")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "invalid id: 'x'");
    }

    #[tokio::test]
    async fn delete_returns_204_then_404() {
        let app = app();
        send(&app, Method::POST, "/posts", Some(r#"{"title":"A","body":"B"}"#)).await;

        let (status, body) = send(&app, Method::DELETE, "/posts/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, _) = send(&app, Method::DELETE, "/posts/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::DELETE, "/posts/-", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn store_failures_are_500() {
        let app = app_with(Arc::new(BrokenStore));

        let cases = [
            (Method::GET, "/posts", None),
            (Method::GET, "/posts/1", None),
            (Method::POST, "/posts", Some("{}")),
            (Method::PUT, "/posts/1", Some("{}")),
            (Method::DELETE, "/posts/1", None),
        ];

        for (method, uri, body) in cases {
            let (status, json) = send(&app, method.clone(), uri, body).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
            assert_eq!(json["error"], "internal_error");
        }
    }

    #[tokio::test]
    async fn validation_short_circuits_before_store() {
        // BrokenStore would answer 500; a 400 proves the store was never called
        let app = app_with(Arc::new(BrokenStore));
        let (status, _) = send(&app, Method::POST, "/posts", Some("[")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
