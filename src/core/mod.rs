//! Core domain types for the draft machine
//!
//! Module hierarchy follows type dependency order:
//! - identity: PostId, Username, AuthToken, RequestId
//! - field: FieldState + the validation rule
//! - draft: DraftState composite
//! - action: named transitions
//! - apply: the pure transition function

pub mod action;
pub mod apply;
pub mod draft;
pub mod field;
pub mod identity;

pub use action::Action;
pub use apply::{ApplyOutcome, Transition, apply};
pub use draft::{DraftMode, DraftState, PostBody, SaveRecovery};
pub use field::{FieldKind, FieldState, validate};
pub use identity::{AuthToken, InvalidIdentity, PostId, RequestId, Username};
