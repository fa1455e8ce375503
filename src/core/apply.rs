//! Deterministic action application into DraftState.
//!
//! `apply` is the whole state machine: a pure transition function. Callers
//! (the editor interpreter) replace their copy with `Transition::next`; the
//! input state is never mutated.

use super::action::Action;
use super::draft::{DraftMode, DraftState, SaveRecovery};
use super::field::{self, FieldKind};

/// What a transition did, beyond producing the next state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// The submission counter advanced; exactly one persist request is owed.
    pub send_triggered: bool,
}

/// Result of applying one action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub next: DraftState,
    pub outcome: ApplyOutcome,
}

/// Apply one action to a draft, returning the next state.
///
/// Transitions are synchronous and run to completion; the 1:1 relationship
/// between `send_count` increments and `send_triggered` outcomes is the
/// contract the submission coordinator relies on.
pub fn apply(state: &DraftState, action: Action) -> Transition {
    let mut next = state.clone();
    let mut outcome = ApplyOutcome::default();

    // Terminal render state: a missing record accepts no further field work.
    if state.not_found && action.mutates_fields() {
        return Transition { next, outcome };
    }

    match action {
        Action::EditTitle(value) => {
            next.title.has_errors = false;
            next.title.value = value;
            refresh_save_gate(&mut next);
        }
        Action::EditBody(value) => {
            next.body.has_errors = false;
            next.body.value = value;
            refresh_save_gate(&mut next);
        }
        Action::ValidateTitle(raw) => {
            run_rule(&mut next, FieldKind::Title, &raw);
        }
        Action::ValidateBody(raw) => {
            run_rule(&mut next, FieldKind::Body, &raw);
        }
        Action::Submit => {
            // Validate both fields, then gate, inside this one transition.
            // Staggering the two would let a stale gate admit a submit
            // between partial validations.
            let title_raw = next.title.value.clone();
            let body_raw = next.body.value.clone();
            run_rule(&mut next, FieldKind::Title, &title_raw);
            run_rule(&mut next, FieldKind::Body, &body_raw);

            let dirty = match next.mode {
                DraftMode::Create => true,
                DraftMode::Edit => next.is_dirty(),
            };
            if dirty && !next.title.has_errors && !next.body.has_errors && !next.cant_save {
                next.cant_save = true;
                next.send_count += 1;
                outcome.send_triggered = true;
            }
        }
        Action::SaveStarted => {
            next.cant_save = true;
        }
        Action::SaveFinished(saved) => {
            if next.mode == DraftMode::Edit {
                next.title.old_value = Some(saved.title);
                next.body.old_value = Some(saved.body);
            }
            next.cant_save = false;
        }
        Action::SaveFailed => match next.recovery {
            // Reference behavior: the gate stays closed until a field changes.
            SaveRecovery::FailClosed => {}
            SaveRecovery::Retry => {
                if !next.title.has_errors && !next.body.has_errors {
                    refresh_save_gate(&mut next);
                }
            }
        },
        Action::FetchComplete(record) => {
            if next.mode == DraftMode::Edit {
                next.title.value = record.title.clone();
                next.title.old_value = Some(record.title);
                next.body.value = record.body.clone();
                next.body.old_value = Some(record.body);
                next.is_fetching = false;
                next.cant_save = !next.fields_present();
            }
        }
        Action::FetchMissing => {
            if next.mode == DraftMode::Edit {
                next.not_found = true;
                next.is_fetching = false;
            }
        }
    }

    Transition { next, outcome }
}

/// Recompute the save gate from field presence.
///
/// Invariant: a blank field always closes the gate.
fn refresh_save_gate(next: &mut DraftState) {
    next.cant_save = !next.fields_present();
}

fn run_rule(next: &mut DraftState, kind: FieldKind, raw: &str) {
    if let Some(message) = field::validate(kind, raw) {
        let target = match kind {
            FieldKind::Title => &mut next.title,
            FieldKind::Body => &mut next.body,
        };
        target.has_errors = true;
        target.message = message.to_string();
        next.cant_save = true;
    }
}
