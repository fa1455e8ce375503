//! Edit-draft workflow: hydration, ownership, dirty-checking, not-found.

mod fixtures;

use std::sync::Arc;
use std::time::Duration;

use fixtures::api::{ApiCall, ScriptedApi, record};
use fixtures::context::logged_in;
use inkpost::{DraftEditor, PostId, SaveRecovery, Severity};

const PUMP: Duration = Duration::from_secs(5);

fn post_id(raw: &str) -> PostId {
    PostId::new(raw).expect("valid test id")
}

#[test]
fn hydration_populates_values_and_old_values() {
    let api = Arc::new(ScriptedApi::new().push_fetch(Ok(Some(record("p1", "A", "B", "brad")))));
    let test = logged_in("brad");
    let mut editor = DraftEditor::edit(
        test.ctx,
        api.clone(),
        SaveRecovery::FailClosed,
        post_id("p1"),
    );

    assert!(editor.state().is_fetching);
    assert!(editor.pump_one(PUMP), "hydration reply expected");

    let state = editor.state();
    assert!(!state.is_fetching);
    assert_eq!(state.title.value, "A");
    assert_eq!(state.title.old_value.as_deref(), Some("A"));
    assert_eq!(state.body.value, "B");
    assert_eq!(state.body.old_value.as_deref(), Some("B"));
    assert_eq!(api.calls(), vec![ApiCall::Fetch { id: "p1".into() }]);
    assert!(test.notices.entries().is_empty(), "owner sees no notice");
    assert!(test.nav.paths().is_empty());
}

#[test]
fn submit_without_changes_issues_no_request() {
    let api = Arc::new(ScriptedApi::new().push_fetch(Ok(Some(record("p1", "A", "B", "brad")))));
    let test = logged_in("brad");
    let mut editor = DraftEditor::edit(
        test.ctx,
        api.clone(),
        SaveRecovery::FailClosed,
        post_id("p1"),
    );
    assert!(editor.pump_one(PUMP));

    assert!(!editor.submit(), "no-change submit is refused");
    assert_eq!(editor.state().send_count, 0);
    assert_eq!(api.calls().len(), 1, "only the hydration fetch happened");
}

#[test]
fn changed_draft_saves_and_updates_the_baseline() {
    let api = Arc::new(
        ScriptedApi::new()
            .push_fetch(Ok(Some(record("p1", "A", "B", "brad"))))
            .push_save(Ok(String::new())),
    );
    let test = logged_in("brad");
    let mut editor = DraftEditor::edit(
        test.ctx,
        api.clone(),
        SaveRecovery::FailClosed,
        post_id("p1"),
    );
    assert!(editor.pump_one(PUMP));

    editor.edit_title("A2");
    editor.blur_title();
    assert!(editor.submit());
    assert_eq!(editor.state().send_count, 1);
    assert!(editor.pump_one(PUMP));

    let state = editor.state();
    assert!(!state.cant_save);
    assert_eq!(state.title.old_value.as_deref(), Some("A2"));
    assert!(!state.is_dirty(), "saved values are the new baseline");
    assert_eq!(
        test.notices.entries(),
        vec![("Post was updated.".to_string(), Severity::Success)]
    );
    assert!(test.nav.paths().is_empty(), "edit mode never navigates");

    let calls = api.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[1],
        ApiCall::Update {
            id: "p1".to_string(),
            title: "A2".to_string(),
            body: "B".to_string(),
            token: "tok-brad".to_string(),
        }
    );

    // Saving again without further edits is a no-op.
    assert!(!editor.submit());
    assert_eq!(editor.state().send_count, 1);
}

#[test]
fn non_owner_gets_permission_notice_and_redirect_after_hydration() {
    let api = Arc::new(ScriptedApi::new().push_fetch(Ok(Some(record("p1", "A", "B", "brad")))));
    let test = logged_in("mallory");
    let mut editor = DraftEditor::edit(test.ctx, api, SaveRecovery::FailClosed, post_id("p1"));

    assert!(editor.pump_one(PUMP));

    // Fetched data still lands in state before the redirect.
    assert_eq!(editor.state().title.value, "A");
    assert_eq!(
        test.notices.entries(),
        vec![(
            "You do not have permission to edit that post.".to_string(),
            Severity::Danger
        )]
    );
    assert_eq!(test.nav.paths(), vec!["/".to_string()]);
}

#[test]
fn missing_record_is_terminal() {
    let api = Arc::new(ScriptedApi::new().push_fetch(Ok(None)));
    let test = logged_in("brad");
    let mut editor = DraftEditor::edit(
        test.ctx,
        api.clone(),
        SaveRecovery::FailClosed,
        post_id("gone"),
    );

    assert!(editor.pump_one(PUMP));
    let state = editor.state();
    assert!(state.not_found);
    assert!(!state.is_fetching);

    // No further field work is accepted.
    editor.edit_title("sneaky");
    editor.blur_title();
    assert!(!editor.submit());
    assert_eq!(editor.state().title.value, "");
    assert_eq!(editor.state().send_count, 0);
    assert_eq!(api.calls().len(), 1);
}

#[test]
fn transport_failure_during_hydration_dispatches_nothing() {
    let api = Arc::new(ScriptedApi::new().push_fetch(Err(fixtures::api::transport_error())));
    let test = logged_in("brad");
    let mut editor = DraftEditor::edit(test.ctx, api, SaveRecovery::FailClosed, post_id("p1"));

    // The coordinator logs and stays silent; the draft keeps fetching.
    assert!(!editor.pump_one(Duration::from_millis(300)));
    assert!(editor.state().is_fetching);
    assert!(!editor.state().not_found);
    assert!(test.notices.entries().is_empty());
}
