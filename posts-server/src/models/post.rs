//! Post record, its id, and the create/update payload

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::ValidationError;

/// Post identifier, assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct PostId(i64);

impl PostId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Parse an id from a path segment.
    ///
    /// Any signed 64-bit integer is accepted; whether it exists is the
    /// store's concern.
    ///
    /// # Example
    /// ```
    /// use posts_server::models::PostId;
    ///
    /// assert_eq!(PostId::parse("42").unwrap().get(), 42);
    /// assert!(PostId::parse("forty-two").is_err());
    /// assert!(PostId::parse("").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        s.parse::<i64>()
            .map(Self)
            .map_err(|_| ValidationError::InvalidId {
                value: s.to_owned(),
            })
    }

    pub fn get(self) -> i64 {
        self.0
    }

    /// The id following this one, or `None` at `i64::MAX`.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A stored post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub body: String,
}

impl Post {
    /// Attach an id to a payload.
    pub fn from_draft(id: PostId, draft: PostDraft) -> Self {
        Self {
            id,
            title: draft.title,
            body: draft.body,
        }
    }
}

/// Title and body supplied by a client on create/update.
///
/// Missing or null fields decode as empty strings and unknown fields are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostDraft {
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub body: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl PostDraft {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Decode a payload from a raw request body.
    ///
    /// Only the first JSON value is read; anything after it is ignored. A
    /// `null` body is an empty draft. An empty body is an error.
    ///
    /// # Example
    /// ```
    /// use posts_server::models::PostDraft;
    ///
    /// let draft = PostDraft::from_json(br#"{"title":"A","body":"B"}"#).unwrap();
    /// assert_eq!(draft, PostDraft::new("A", "B"));
    /// assert!(PostDraft::from_json(b"not json").is_err());
    /// ```
    pub fn from_json(bytes: &[u8]) -> Result<Self, ValidationError> {
        let mut values =
            serde_json::Deserializer::from_slice(bytes).into_iter::<Option<PostDraft>>();

        match values.next() {
            Some(Ok(draft)) => Ok(draft.unwrap_or_default()),
            Some(Err(e)) => Err(ValidationError::InvalidBody {
                reason: e.to_string(),
            }),
            None => Err(ValidationError::InvalidBody {
                reason: "empty body".into(),
            }),
        }
    }
}
