//! Draft workflow: the editor command interpreter and its coordinators.
//!
//! The reducer stays pure; everything effectful lives here. Coordinators run
//! on worker threads, block only at the network call, and report back over a
//! channel. The editor applies those replies through the reducer in dispatch
//! order, so no two transitions ever interleave.

use thiserror::Error;

use crate::api::PostRecord;
use crate::core::{PostBody, PostId, Username};
use crate::error::{Effect, Transience};

mod editor;
mod hydration;
mod submission;

pub use editor::DraftEditor;

/// Message from a coordinator back to the owning editor.
///
/// A canceled request produces no reply at all; neither success nor failure
/// mutation may reach the reducer once the token is canceled.
#[derive(Debug)]
pub(crate) enum Reply {
    /// Hydration fetched the record.
    Hydrated(Box<PostRecord>),
    /// Hydration got an empty body: the record does not exist.
    Missing,
    /// A save round-trip succeeded. `new_id` is set for create drafts.
    Saved {
        body: PostBody,
        new_id: Option<PostId>,
    },
    /// A save round-trip failed (transport or server rejection).
    SaveError,
}

/// Workflow-level refusals, surfaced to embedders (e.g. the CLI).
///
/// Inside the editor these conditions become notices and navigation, per the
/// reference behavior; the typed form exists for callers that need an exit
/// status instead of a redirect.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("you must log in to view this page")]
    NotLoggedIn,

    #[error("viewer `{viewer}` does not own post `{id}`")]
    NotOwner { viewer: Username, id: PostId },

    #[error("post `{id}` was not found")]
    PostMissing { id: PostId },

    #[error("could not load post `{id}`: {reason}")]
    LoadFailed { id: PostId, reason: String },

    #[error("save did not complete: {reason}")]
    SaveIncomplete { reason: String },
}

impl WorkflowError {
    pub fn transience(&self) -> Transience {
        match self {
            WorkflowError::NotLoggedIn => Transience::Permanent,
            WorkflowError::NotOwner { .. } => Transience::Permanent,
            WorkflowError::PostMissing { .. } => Transience::Permanent,
            WorkflowError::LoadFailed { .. } => Transience::Retryable,
            WorkflowError::SaveIncomplete { .. } => Transience::Unknown,
        }
    }

    pub fn effect(&self) -> Effect {
        match self {
            // An incomplete save may have reached the server.
            WorkflowError::SaveIncomplete { .. } => Effect::Unknown,
            _ => Effect::None,
        }
    }
}
