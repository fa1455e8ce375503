#![forbid(unsafe_code)]

pub mod api;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod context;
pub mod core;
pub mod error;
mod paths;
pub mod telemetry;
pub mod workflow;

pub use error::{Effect, Error, Transience};
pub type Result<T> = std::result::Result<T, Error>;

// Re-export core types at crate root for convenience
pub use crate::api::{ApiError, CancelToken, HttpPostApi, PostApi, PostAuthor, PostRecord};
pub use crate::context::{AppContext, CurrentUser, Navigator, NoticeSink, Session, Severity};
pub use crate::core::{
    Action, ApplyOutcome, AuthToken, DraftMode, DraftState, FieldKind, FieldState,
    InvalidIdentity, PostBody, PostId, RequestId, SaveRecovery, Transition, Username, apply,
};
pub use crate::workflow::{DraftEditor, WorkflowError};
