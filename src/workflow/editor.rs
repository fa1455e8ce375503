//! The draft editor: single owner of one DraftState.
//!
//! Interprets the pure transitions, enqueues save jobs for the submission
//! worker, and applies coordinator replies back through the reducer in
//! dispatch order. Collaborator effects (notices, navigation, the ownership
//! check) happen here, at the point where the corresponding reply is applied.

use std::sync::Arc;
use std::time::Duration;

use crossbeam::channel::{Receiver, Sender, unbounded};

use super::submission::{SaveJob, SaveOp, spawn_worker};
use super::{Reply, hydration};
use crate::api::{CancelToken, PostApi, PostRecord};
use crate::context::{AppContext, CurrentUser, Severity};
use crate::core::{
    Action, ApplyOutcome, DraftMode, DraftState, PostId, RequestId, SaveRecovery, apply,
};

const LOGIN_REQUIRED: &str = "You must log in to view this page.";
const PERMISSION_DENIED: &str = "You do not have permission to edit that post.";
const CREATED: &str = "Congrats, you created a new post.";
const UPDATED: &str = "Post was updated.";

/// One create- or edit-draft instance.
///
/// Not shared: each instance owns an independent DraftState. A viewer who is
/// not logged in gets the login notice plus a redirect and the editor comes
/// up dormant: every operation is a no-op, preserving the guarantee that
/// each `send_count` increment maps to exactly one request.
pub struct DraftEditor {
    state: DraftState,
    ctx: AppContext,
    user: Option<CurrentUser>,
    job_tx: Option<Sender<SaveJob>>,
    reply_rx: Receiver<Reply>,
    save_cancel: Option<CancelToken>,
    fetch_cancel: Option<CancelToken>,
}

impl DraftEditor {
    /// Editor for a brand-new post.
    pub fn create(ctx: AppContext, api: Arc<dyn PostApi>, recovery: SaveRecovery) -> Self {
        Self::new(ctx, api, DraftState::create(recovery), None)
    }

    /// Editor for an existing post; hydration starts immediately.
    pub fn edit(
        ctx: AppContext,
        api: Arc<dyn PostApi>,
        recovery: SaveRecovery,
        id: PostId,
    ) -> Self {
        Self::new(ctx, api, DraftState::edit(id.clone(), recovery), Some(id))
    }

    fn new(
        ctx: AppContext,
        api: Arc<dyn PostApi>,
        state: DraftState,
        fetch: Option<PostId>,
    ) -> Self {
        let (reply_tx, reply_rx) = unbounded();

        let user = ctx.session.current_user();
        if user.is_none() {
            ctx.notices.notify(LOGIN_REQUIRED, Severity::Danger);
            ctx.navigator.navigate("/");
            return Self {
                state,
                ctx,
                user: None,
                job_tx: None,
                reply_rx,
                save_cancel: None,
                fetch_cancel: None,
            };
        }

        let (job_tx, job_rx) = unbounded();
        spawn_worker(api.clone(), job_rx, reply_tx.clone());

        let fetch_cancel = fetch.map(|id| {
            let cancel = CancelToken::new();
            hydration::spawn_fetch(api, id, cancel.clone(), reply_tx);
            cancel
        });

        Self {
            state,
            ctx,
            user,
            job_tx: Some(job_tx),
            reply_rx,
            save_cancel: None,
            fetch_cancel,
        }
    }

    pub fn state(&self) -> &DraftState {
        &self.state
    }

    /// The editor accepts work (viewer logged in, not torn down).
    pub fn is_active(&self) -> bool {
        self.job_tx.is_some()
    }

    pub fn edit_title(&mut self, value: impl Into<String>) {
        self.dispatch(Action::EditTitle(value.into()));
    }

    pub fn edit_body(&mut self, value: impl Into<String>) {
        self.dispatch(Action::EditBody(value.into()));
    }

    /// Blur trigger: re-run the title rule on the current value.
    pub fn blur_title(&mut self) {
        let raw = self.state.title.value.clone();
        self.dispatch(Action::ValidateTitle(raw));
    }

    pub fn blur_body(&mut self) {
        let raw = self.state.body.value.clone();
        self.dispatch(Action::ValidateBody(raw));
    }

    /// Attempt a save. Returns whether the submission counter advanced (and
    /// therefore whether exactly one request was enqueued).
    pub fn submit(&mut self) -> bool {
        let outcome = self.dispatch(Action::Submit);
        if outcome.send_triggered {
            self.dispatch(Action::SaveStarted);
            self.enqueue_save();
        }
        outcome.send_triggered
    }

    /// Drain all replies currently queued, applying each in dispatch order.
    /// Returns how many replies were received.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(reply) = self.reply_rx.try_recv() {
            self.handle_reply(reply);
            handled += 1;
        }
        handled
    }

    /// Wait up to `timeout` for one reply and apply it. Returns whether a
    /// reply arrived.
    pub fn pump_one(&mut self, timeout: Duration) -> bool {
        match self.reply_rx.recv_timeout(timeout) {
            Ok(reply) => {
                self.handle_reply(reply);
                true
            }
            Err(_) => false,
        }
    }

    /// Tear the editor down: cancel in-flight work and close the job queue.
    /// State stays readable; further operations are no-ops.
    pub fn close(&mut self) {
        if let Some(cancel) = self.fetch_cancel.take() {
            cancel.cancel();
        }
        if let Some(cancel) = self.save_cancel.take() {
            cancel.cancel();
        }
        self.job_tx = None;
    }

    fn dispatch(&mut self, action: Action) -> ApplyOutcome {
        if !self.is_active() {
            return ApplyOutcome::default();
        }
        tracing::trace!(?action, "apply");
        let transition = apply(&self.state, action);
        self.state = transition.next;
        transition.outcome
    }

    fn enqueue_save(&mut self) {
        let Some(user) = &self.user else {
            return;
        };
        let Some(job_tx) = &self.job_tx else {
            return;
        };

        // A new trigger supersedes any previous request.
        if let Some(previous) = self.save_cancel.take() {
            previous.cancel();
        }
        let cancel = CancelToken::new();
        self.save_cancel = Some(cancel.clone());

        let op = match (&self.state.mode, &self.state.id) {
            (DraftMode::Edit, Some(id)) => SaveOp::Update(id.clone()),
            _ => SaveOp::Create,
        };
        let job = SaveJob {
            seq: self.state.send_count,
            op,
            body: self.state.post_body(),
            token: user.token.clone(),
            request_id: RequestId::new(),
            cancel,
        };
        tracing::debug!(seq = job.seq, request_id = %job.request_id, "save triggered");
        // Ignore send errors - the worker is gone only after teardown.
        let _ = job_tx.send(job);
    }

    fn handle_reply(&mut self, reply: Reply) {
        if !self.is_active() {
            tracing::debug!("reply discarded after teardown");
            return;
        }
        match reply {
            Reply::Hydrated(record) => self.finish_hydration(*record),
            Reply::Missing => {
                self.dispatch(Action::FetchMissing);
            }
            Reply::Saved { body, new_id } => {
                self.save_cancel = None;
                self.dispatch(Action::SaveFinished(body));
                match self.state.mode {
                    DraftMode::Create => {
                        self.ctx.notices.notify(CREATED, Severity::Success);
                        if let Some(id) = new_id {
                            self.ctx.navigator.navigate(&format!("/post/{id}"));
                        }
                    }
                    DraftMode::Edit => {
                        self.ctx.notices.notify(UPDATED, Severity::Success);
                    }
                }
            }
            Reply::SaveError => {
                self.save_cancel = None;
                self.dispatch(Action::SaveFailed);
            }
        }
    }

    fn finish_hydration(&mut self, record: PostRecord) {
        self.fetch_cancel = None;
        let author = record.author.username.clone();
        // State is populated before the ownership redirect is issued; the
        // view unmounts immediately after, so the data is never shown.
        self.dispatch(Action::FetchComplete(record.content()));
        let owns = self
            .user
            .as_ref()
            .is_some_and(|user| user.username == author);
        if !owns {
            self.ctx.notices.notify(PERMISSION_DENIED, Severity::Danger);
            self.ctx.navigator.navigate("/");
        }
    }
}

impl Drop for DraftEditor {
    fn drop(&mut self) {
        self.close();
    }
}
