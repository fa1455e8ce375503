use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::core::InvalidIdentity;
use crate::workflow::WorkflowError;

/// Whether retrying this operation may succeed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Transience {
    /// Retry will never help without changing inputs/state.
    Permanent,
    /// Retry may help (transient outage, caller-initiated cancel).
    Retryable,
    /// Unknown if retry will help.
    Unknown,
}

impl Transience {
    pub fn is_retryable(self) -> bool {
        matches!(self, Transience::Retryable)
    }
}

/// What we know about the remote side effect when an error is returned.
///
/// Cancellation only discards the local result; the server may have
/// persisted the write anyway, hence `Unknown` for canceled requests.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Effect {
    /// Definitely no side effects occurred.
    None,
    /// Side effects definitely occurred.
    Some,
    /// We don't know if side effects occurred.
    Unknown,
}

impl Effect {
    pub fn as_str(self) -> &'static str {
        match self {
            Effect::None => "none",
            Effect::Some => "some",
            Effect::Unknown => "unknown",
        }
    }
}

/// Crate-level convenience error.
///
/// Not a "god error": it is a thin wrapper over canonical capability errors.
/// Field validation never appears here; it is draft state, recovered by the
/// user editing, and stays inside the reducer.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Identity(#[from] InvalidIdentity),
}

impl Error {
    pub fn transience(&self) -> Transience {
        match self {
            Error::Api(e) => e.transience(),
            Error::Workflow(e) => e.transience(),
            Error::Config(_) => Transience::Permanent,
            Error::Identity(_) => Transience::Permanent,
        }
    }

    pub fn effect(&self) -> Effect {
        match self {
            Error::Api(e) => e.effect(),
            Error::Workflow(e) => e.effect(),
            Error::Config(_) => Effect::None,
            Error::Identity(_) => Effect::None,
        }
    }
}
