//! Collaborator capabilities injected into each editor instance.
//!
//! Global app state (auth session, flash-notification channel, router) is
//! modeled as explicit read/write capability interfaces handed to the core
//! at construction, never as ambient mutable globals.

use std::sync::Arc;

use crate::core::{AuthToken, Username};

/// Flash-message severity, mirroring the notification channel's color coding.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Severity {
    Success,
    Danger,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Danger => "danger",
        }
    }
}

/// The authenticated viewer, as read from the session at mount time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentUser {
    pub username: Username,
    pub token: AuthToken,
}

/// Read capability over the app session.
pub trait Session: Send + Sync {
    /// The logged-in viewer, if any.
    fn current_user(&self) -> Option<CurrentUser>;
}

/// Write capability into the global flash-notification channel.
pub trait NoticeSink: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// Write capability over the app's navigation.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// The collaborator bundle an editor is constructed with.
#[derive(Clone)]
pub struct AppContext {
    pub session: Arc<dyn Session>,
    pub notices: Arc<dyn NoticeSink>,
    pub navigator: Arc<dyn Navigator>,
}

impl AppContext {
    pub fn new(
        session: Arc<dyn Session>,
        notices: Arc<dyn NoticeSink>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            session,
            notices,
            navigator,
        }
    }
}
