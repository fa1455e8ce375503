#![allow(dead_code)]

//! Recording collaborator doubles: session, notices, navigation.

use std::sync::{Arc, Mutex};

use inkpost::{
    AppContext, AuthToken, CurrentUser, Navigator, NoticeSink, Session, Severity, Username,
};

pub struct StaticSession {
    user: Option<CurrentUser>,
}

impl Session for StaticSession {
    fn current_user(&self) -> Option<CurrentUser> {
        self.user.clone()
    }
}

#[derive(Default)]
pub struct RecordedNotices {
    entries: Mutex<Vec<(String, Severity)>>,
}

impl RecordedNotices {
    pub fn entries(&self) -> Vec<(String, Severity)> {
        self.entries.lock().expect("notice lock").clone()
    }
}

impl NoticeSink for RecordedNotices {
    fn notify(&self, message: &str, severity: Severity) {
        self.entries
            .lock()
            .expect("notice lock")
            .push((message.to_string(), severity));
    }
}

#[derive(Default)]
pub struct RecordedNav {
    paths: Mutex<Vec<String>>,
}

impl RecordedNav {
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().expect("nav lock").clone()
    }
}

impl Navigator for RecordedNav {
    fn navigate(&self, path: &str) {
        self.paths.lock().expect("nav lock").push(path.to_string());
    }
}

pub struct TestContext {
    pub ctx: AppContext,
    pub notices: Arc<RecordedNotices>,
    pub nav: Arc<RecordedNav>,
}

/// Context with `user` logged in (token `"tok-<user>"`).
pub fn logged_in(user: &str) -> TestContext {
    build(Some(CurrentUser {
        username: Username::new(user).expect("valid test username"),
        token: AuthToken::new(format!("tok-{user}")).expect("valid test token"),
    }))
}

/// Context with nobody logged in.
pub fn logged_out() -> TestContext {
    build(None)
}

fn build(user: Option<CurrentUser>) -> TestContext {
    let notices = Arc::new(RecordedNotices::default());
    let nav = Arc::new(RecordedNav::default());
    let ctx = AppContext::new(
        Arc::new(StaticSession { user }),
        notices.clone(),
        nav.clone(),
    );
    TestContext { ctx, notices, nav }
}
