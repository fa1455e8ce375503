//! Named transitions accepted by the draft reducer.

use super::draft::PostBody;

/// One intent dispatched at the reducer.
///
/// `EditTitle`/`EditBody` carry keystrokes; `ValidateTitle`/`ValidateBody`
/// re-run the field rule at a trigger point (blur). The remaining actions are
/// emitted by the coordinators.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    EditTitle(String),
    EditBody(String),
    ValidateTitle(String),
    ValidateBody(String),
    /// User intent to save. Validates both fields and gates atomically.
    Submit,
    /// Persist request left the queue; keeps the save gate closed.
    SaveStarted,
    /// Persist round-trip succeeded with these values.
    SaveFinished(PostBody),
    /// Persist round-trip failed (not canceled). Recovery policy decides
    /// whether the gate reopens.
    SaveFailed,
    /// Hydration fetch returned the record's content.
    FetchComplete(PostBody),
    /// Hydration fetch returned an empty body: the record does not exist.
    FetchMissing,
}

impl Action {
    /// Actions that touch field state and are therefore rejected once the
    /// draft has entered the terminal not-found state.
    pub(crate) fn mutates_fields(&self) -> bool {
        matches!(
            self,
            Action::EditTitle(_)
                | Action::EditBody(_)
                | Action::ValidateTitle(_)
                | Action::ValidateBody(_)
                | Action::Submit
                | Action::FetchComplete(_)
        )
    }
}
