//! Identity atoms
//!
//! PostId: record identifier used in request paths
//! Username: viewer/author identity for the ownership check
//! AuthToken: opaque bearer token consumed from the session
//! RequestId: per-attempt correlation id for logs

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Invalid identity value.
#[derive(Debug, Error, Clone)]
pub enum InvalidIdentity {
    #[error("post id `{raw}` is invalid: {reason}")]
    Post { raw: String, reason: String },
    #[error("username `{raw}` is invalid: {reason}")]
    Username { raw: String, reason: String },
    #[error("auth token is invalid: {reason}")]
    Token { reason: String },
}

/// Post identifier.
///
/// Server-assigned, opaque. Interpolated into request paths, so it must be
/// non-empty and free of path metacharacters.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    pub fn new(s: impl Into<String>) -> Result<Self, InvalidIdentity> {
        let s = s.into();
        if s.is_empty() {
            return Err(InvalidIdentity::Post {
                raw: s,
                reason: "empty".into(),
            });
        }
        if s.contains('/') || s.chars().any(char::is_whitespace) {
            return Err(InvalidIdentity::Post {
                raw: s,
                reason: "contains path separator or whitespace".into(),
            });
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PostId({:?})", self.0)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Username - non-empty string.
///
/// The server owns uniqueness; clients only compare for the ownership check.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    pub fn new(s: impl Into<String>) -> Result<Self, InvalidIdentity> {
        let s = s.into();
        if s.trim().is_empty() {
            Err(InvalidIdentity::Username {
                raw: s,
                reason: "empty".into(),
            })
        } else {
            Ok(Self(s))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Username({:?})", self.0)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bearer token for persist requests.
///
/// Debug output never reveals the token value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(s: impl Into<String>) -> Result<Self, InvalidIdentity> {
        let s = s.into();
        if s.trim().is_empty() {
            Err(InvalidIdentity::Token {
                reason: "empty".into(),
            })
        } else {
            Ok(Self(s))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(..)")
    }
}

/// Correlation id for one network attempt.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RequestId({})", self.0)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
