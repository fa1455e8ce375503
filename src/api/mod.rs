//! Network surface consumed by the draft coordinators.
//!
//! The contract is transport-free: coordinators see cancelable calls and
//! typed results, nothing else. `http` provides the blocking implementation
//! against the blog backend.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::core::{AuthToken, PostBody, PostId, RequestId, Username};
use crate::error::{Effect, Transience};

mod cancel;
pub mod http;

pub use cancel::CancelToken;
pub use http::HttpPostApi;

/// Author block embedded in a fetched record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostAuthor {
    pub username: Username,
    #[serde(default)]
    pub avatar: String,
}

/// One persisted post, as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: PostId,
    pub title: String,
    pub body: String,
    pub author: PostAuthor,
    #[serde(rename = "createdDate")]
    pub created_date: String,
}

impl PostRecord {
    /// Creation timestamp, when the server sent a parseable RFC 3339 date.
    pub fn created(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::parse(&self.created_date, &Rfc3339).ok()
    }

    /// Title/body payload for hydrating a draft.
    pub fn content(&self) -> PostBody {
        PostBody::new(self.title.clone(), self.body.clone())
    }
}

/// Errors surfaced by the network layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The caller canceled the request; the local result was discarded.
    #[error("request canceled")]
    Canceled,

    /// Connection-level failure before a response was interpreted.
    #[error("transport failure: {reason}")]
    Transport { reason: String },

    /// The server answered with a non-success status.
    #[error("server rejected request with status {status}")]
    Status { status: u16 },

    /// The response arrived but its body was not what the contract promises.
    #[error("malformed response body: {reason}")]
    Body { reason: String },
}

impl ApiError {
    pub fn transience(&self) -> Transience {
        match self {
            ApiError::Canceled => Transience::Retryable,
            ApiError::Transport { .. } => Transience::Retryable,
            ApiError::Status { status } if *status >= 500 => Transience::Retryable,
            ApiError::Status { .. } => Transience::Permanent,
            ApiError::Body { .. } => Transience::Unknown,
        }
    }

    pub fn effect(&self) -> Effect {
        match self {
            // The request may have reached the server before the local
            // result was discarded or the connection dropped.
            ApiError::Canceled | ApiError::Transport { .. } => Effect::Unknown,
            ApiError::Status { .. } => Effect::None,
            // A body error is reported after a success status: the write
            // went through even though we couldn't read the answer.
            ApiError::Body { .. } => Effect::Some,
        }
    }
}

/// Cancelable persistence operations for one post.
///
/// Every call corresponds 1:1 with a trigger from the reducer; the api never
/// retries on its own.
pub trait PostApi: Send + Sync {
    /// Fetch a record by id. `Ok(None)` means the record does not exist.
    fn fetch_post(
        &self,
        id: &PostId,
        request_id: RequestId,
        cancel: &CancelToken,
    ) -> Result<Option<PostRecord>, ApiError>;

    /// Persist a new post, returning the server-assigned id.
    fn create_post(
        &self,
        draft: &PostBody,
        token: &AuthToken,
        request_id: RequestId,
        cancel: &CancelToken,
    ) -> Result<PostId, ApiError>;

    /// Persist changes to an existing post.
    fn update_post(
        &self,
        id: &PostId,
        draft: &PostBody,
        token: &AuthToken,
        request_id: RequestId,
        cancel: &CancelToken,
    ) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_parses_wire_shape() {
        let json = r#"{
            "_id": "abc123",
            "title": "Hi",
            "body": "World",
            "author": { "username": "brad", "avatar": "https://gravatar.com/x" },
            "createdDate": "2026-02-03T04:05:06Z"
        }"#;
        let record: PostRecord = serde_json::from_str(json).expect("parse record");
        assert_eq!(record.id.as_str(), "abc123");
        assert_eq!(record.author.username.as_str(), "brad");
        assert!(record.created().is_some());
        assert_eq!(record.content(), PostBody::new("Hi", "World"));
    }

    #[test]
    fn record_tolerates_missing_avatar_and_id_alias() {
        let json = r#"{
            "id": "abc123",
            "title": "Hi",
            "body": "World",
            "author": { "username": "brad" },
            "createdDate": "not-a-date"
        }"#;
        let record: PostRecord = serde_json::from_str(json).expect("parse record");
        assert!(record.author.avatar.is_empty());
        assert!(record.created().is_none());
    }

    #[test]
    fn canceled_writes_have_unknown_effect() {
        assert_eq!(ApiError::Canceled.effect(), Effect::Unknown);
        assert!(ApiError::Canceled.transience().is_retryable());
        assert_eq!(ApiError::Status { status: 403 }.transience(), Transience::Permanent);
        assert_eq!(ApiError::Status { status: 502 }.transience(), Transience::Retryable);
    }
}
