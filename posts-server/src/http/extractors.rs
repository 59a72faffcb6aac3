//! Custom Axum extractors
//!
//! Both reject with [`ApiError`] so malformed input gets the same JSON
//! 400 body as every other error.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;

use super::error::ApiError;
use crate::models::{PostDraft, PostId, ValidationError};

/// Extract and validate a post id from path
pub struct ValidPostId(pub PostId);

impl<S> FromRequestParts<S> for ValidPostId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                ApiError::Validation(ValidationError::InvalidId {
                    value: e.body_text(),
                })
            })?;

        Ok(Self(PostId::parse(&raw)?))
    }
}

/// Decode a post payload from the request body.
///
/// Reads raw bytes, so the `Content-Type` header is not required.
pub struct DraftBody(pub PostDraft);

impl<S> FromRequest<S> for DraftBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            ApiError::Validation(ValidationError::InvalidBody {
                reason: e.body_text(),
            })
        })?;

        Ok(Self(PostDraft::from_json(&bytes)?))
    }
}
