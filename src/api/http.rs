//! Blocking HTTP implementation of the post api.
//!
//! Endpoints follow the blog backend's REST-ish surface:
//! - `GET  {base}/post/{id}`       fetch one record (empty body = missing)
//! - `POST {base}/create-post`     persist a new post, body echoes the id
//! - `POST {base}/post/{id}/edit`  persist changes to an existing post
//!
//! Cancellation is cooperative: the token is checked before the request is
//! issued and again before the result is surfaced. An abandoned response is
//! discarded, never applied.

use std::time::Duration;

use serde_json::{Value, json};
use ureq::Agent;

use super::{ApiError, CancelToken, PostApi, PostRecord};
use crate::config::ServerConfig;
use crate::core::{AuthToken, PostBody, PostId, RequestId};

pub struct HttpPostApi {
    agent: Agent,
    base: String,
}

impl HttpPostApi {
    pub fn new(server: &ServerConfig) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_millis(server.timeout_ms)))
            .build();
        Self {
            agent: Agent::new_with_config(config),
            base: server.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

impl PostApi for HttpPostApi {
    fn fetch_post(
        &self,
        id: &PostId,
        request_id: RequestId,
        cancel: &CancelToken,
    ) -> Result<Option<PostRecord>, ApiError> {
        if cancel.is_canceled() {
            return Err(ApiError::Canceled);
        }
        let url = self.url(&format!("/post/{id}"));
        tracing::debug!(%request_id, %id, "fetch post");

        let result = self.agent.get(&url).call();
        if cancel.is_canceled() {
            return Err(ApiError::Canceled);
        }
        let mut response = match result {
            Ok(response) => response,
            Err(ureq::Error::StatusCode(404)) => return Ok(None),
            Err(ureq::Error::StatusCode(status)) => return Err(ApiError::Status { status }),
            Err(err) => {
                return Err(ApiError::Transport {
                    reason: err.to_string(),
                });
            }
        };

        let value: Value = response.body_mut().read_json().map_err(|err| ApiError::Body {
            reason: err.to_string(),
        })?;
        // The backend answers `false` for a missing record.
        if !value.is_object() {
            return Ok(None);
        }
        serde_json::from_value(value)
            .map(Some)
            .map_err(|err| ApiError::Body {
                reason: err.to_string(),
            })
    }

    fn create_post(
        &self,
        draft: &PostBody,
        token: &AuthToken,
        request_id: RequestId,
        cancel: &CancelToken,
    ) -> Result<PostId, ApiError> {
        if cancel.is_canceled() {
            return Err(ApiError::Canceled);
        }
        let url = self.url("/create-post");
        tracing::debug!(%request_id, "create post");

        let payload = json!({
            "title": draft.title,
            "body": draft.body,
            "token": token.as_str(),
        });
        let result = self.agent.post(&url).send_json(&payload);
        if cancel.is_canceled() {
            return Err(ApiError::Canceled);
        }
        let mut response = result.map_err(map_write_error)?;

        let value: Value = response.body_mut().read_json().map_err(|err| ApiError::Body {
            reason: err.to_string(),
        })?;
        let raw = match value {
            Value::String(s) => s,
            other => {
                return Err(ApiError::Body {
                    reason: format!("expected the new post id, got {other}"),
                });
            }
        };
        PostId::new(raw).map_err(|err| ApiError::Body {
            reason: err.to_string(),
        })
    }

    fn update_post(
        &self,
        id: &PostId,
        draft: &PostBody,
        token: &AuthToken,
        request_id: RequestId,
        cancel: &CancelToken,
    ) -> Result<(), ApiError> {
        if cancel.is_canceled() {
            return Err(ApiError::Canceled);
        }
        let url = self.url(&format!("/post/{id}/edit"));
        tracing::debug!(%request_id, %id, "update post");

        let payload = json!({
            "title": draft.title,
            "body": draft.body,
            "token": token.as_str(),
        });
        let result = self.agent.post(&url).send_json(&payload);
        if cancel.is_canceled() {
            return Err(ApiError::Canceled);
        }
        result.map(|_| ()).map_err(map_write_error)
    }
}

fn map_write_error(err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::StatusCode(status) => ApiError::Status { status },
        other => ApiError::Transport {
            reason: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> HttpPostApi {
        HttpPostApi::new(&ServerConfig {
            base_url: "http://localhost:8080/".into(),
            timeout_ms: 50,
        })
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let api = api();
        assert_eq!(api.url("/create-post"), "http://localhost:8080/create-post");
    }

    #[test]
    fn canceled_token_short_circuits_before_any_io() {
        let api = api();
        let cancel = CancelToken::new();
        cancel.cancel();
        let id = PostId::new("abc").expect("valid id");
        let result = api.fetch_post(&id, RequestId::new(), &cancel);
        assert!(matches!(result, Err(ApiError::Canceled)));
    }
}
