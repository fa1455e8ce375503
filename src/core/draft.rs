//! Draft state: the composite record the reducer owns.

use serde::{Deserialize, Serialize};

use super::field::FieldState;
use super::identity::PostId;

/// Which instantiation of the machine this draft is.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftMode {
    /// No prior server state.
    Create,
    /// Hydrated from a fetched record; tracks dirtiness against it.
    Edit,
}

/// What happens to a blocked draft after a failed or canceled save.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveRecovery {
    /// Reference behavior: the draft stays unsaveable until a field changes.
    #[default]
    FailClosed,
    /// Re-enable saving once the failure is reported, fields permitting.
    Retry,
}

/// Title/body payload of one post, as sent to and received from the server.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostBody {
    pub title: String,
    pub body: String,
}

impl PostBody {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Full state of one draft instance.
///
/// Owned exclusively by the reducer; coordinators observe it and emit
/// actions, they never mutate it directly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DraftState {
    pub mode: DraftMode,
    /// Present for edit drafts; create drafts learn their id from the server.
    pub id: Option<PostId>,
    pub title: FieldState,
    pub body: FieldState,
    /// Save gate: true while a field is blank/invalid or a save is in flight.
    pub cant_save: bool,
    /// Monotonic submission counter. A trigger signal, not a display value:
    /// each increment corresponds to exactly one persist request.
    pub send_count: u64,
    pub is_fetching: bool,
    pub not_found: bool,
    pub recovery: SaveRecovery,
}

impl DraftState {
    /// Fresh create draft. Saving is blocked until both fields are filled.
    pub fn create(recovery: SaveRecovery) -> Self {
        Self {
            mode: DraftMode::Create,
            id: None,
            title: FieldState::new(),
            body: FieldState::new(),
            cant_save: true,
            send_count: 0,
            is_fetching: false,
            not_found: false,
            recovery,
        }
    }

    /// Fresh edit draft awaiting hydration for `id`.
    pub fn edit(id: PostId, recovery: SaveRecovery) -> Self {
        Self {
            mode: DraftMode::Edit,
            id: Some(id),
            title: FieldState::tracked(),
            body: FieldState::tracked(),
            cant_save: false,
            send_count: 0,
            is_fetching: true,
            not_found: false,
            recovery,
        }
    }

    /// Both fields hold a non-empty value.
    pub fn fields_present(&self) -> bool {
        !self.title.value.is_empty() && !self.body.value.is_empty()
    }

    /// Any field differs from its last persisted value.
    pub fn is_dirty(&self) -> bool {
        self.title.is_dirty() || self.body.is_dirty()
    }

    /// Current field values as a request payload.
    pub fn post_body(&self) -> PostBody {
        PostBody::new(self.title.value.clone(), self.body.value.clone())
    }
}
